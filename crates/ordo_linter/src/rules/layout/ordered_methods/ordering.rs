//! Ordering policies and detection of out-of-order method pairs.

use std::fmt;

use super::partition::{MethodRef, Partition};

/// Decides whether two consecutive methods of a partition are in order.
pub trait OrderingPolicy: fmt::Debug + Send + Sync {
    fn style(&self) -> EnforcedStyle;

    fn is_ordered(&self, left: &MethodRef, right: &MethodRef) -> bool;
}

/// The configurable `EnforcedStyle` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnforcedStyle {
    #[default]
    Alphabetical,
}

impl EnforcedStyle {
    pub const ALL: &'static [Self] = &[Self::Alphabetical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alphabetical => "alphabetical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|style| style.as_str() == value)
    }

    pub fn policy(self) -> Box<dyn OrderingPolicy> {
        match self {
            Self::Alphabetical => Box::new(Alphabetical),
        }
    }
}

impl fmt::Display for EnforcedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive byte-wise comparison of method names. Equal names are in
/// order, so overloaded signatures of one method never conflict.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alphabetical;

impl OrderingPolicy for Alphabetical {
    fn style(&self) -> EnforcedStyle {
        EnforcedStyle::Alphabetical
    }

    fn is_ordered(&self, left: &MethodRef, right: &MethodRef) -> bool {
        left.name <= right.name
    }
}

/// Two consecutive methods of one partition in the wrong order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfOrder<'a> {
    pub previous: MethodRef<'a>,
    pub current: MethodRef<'a>,
}

/// Every consecutive out-of-order pair, partition by partition.
pub fn find_violations<'a>(
    partitions: &[Partition<'a>],
    policy: &dyn OrderingPolicy,
) -> Vec<OutOfOrder<'a>> {
    let mut violations = Vec::new();
    for partition in partitions {
        let methods: Vec<_> = partition.methods().copied().collect();
        for pair in methods.windows(2) {
            let (previous, current) = (pair[0], pair[1]);
            if !policy.is_ordered(&previous, &current) {
                violations.push(OutOfOrder { previous, current });
            }
        }
    }
    violations
}
