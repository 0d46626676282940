//! Partitioning of a scope's statements into independently ordered groups.
//!
//! A new group starts at every bare access modifier and whenever method
//! definitions switch between instance and singleton (`def self.`) context.

use std::collections::HashSet;

use ordo_ruby_cst::Statement;

use super::qualifier::{QualifierMatcher, is_bare_access_modifier};

/// A method definition that takes part in ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodRef<'a> {
    /// Index of the defining statement in its scope.
    pub index: usize,
    pub name: &'a str,
    pub singleton: bool,
}

impl<'a> MethodRef<'a> {
    /// The method defined by `stmt`: a plain `def`, or a configured qualifier
    /// wrapping one (`memoize def foo`).
    pub fn from_statement(stmt: &Statement<'a>, matcher: &QualifierMatcher) -> Option<Self> {
        let definition = stmt
            .definition()
            .or_else(|| matcher.wrapped_definition(stmt))?;
        Some(Self {
            index: stmt.index(),
            name: definition.name,
            singleton: definition.singleton,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member<'a> {
    Method(MethodRef<'a>),
    /// A qualifier or alias naming the method defined just before it.
    Qualifier { index: usize, target: &'a str },
}

/// A maximal run of statements sharing one access and singleton context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    members: Vec<Member<'a>>,
}

impl<'a> Partition<'a> {
    pub fn members(&self) -> &[Member<'a>] {
        &self.members
    }

    /// The method definitions, in source order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodRef<'a>> {
        self.members.iter().filter_map(|member| match member {
            Member::Method(method) => Some(method),
            Member::Qualifier { .. } => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

pub struct Partitioner<'r> {
    matcher: &'r QualifierMatcher,
    exempt: &'r HashSet<String>,
}

impl<'r> Partitioner<'r> {
    pub fn new(matcher: &'r QualifierMatcher, exempt: &'r HashSet<String>) -> Self {
        Self { matcher, exempt }
    }

    /// Split `statements` into partitions. Empty partitions are dropped.
    pub fn partition<'a>(&self, statements: &[Statement<'a>]) -> Vec<Partition<'a>> {
        let mut groups = vec![Partition::default()];
        let mut in_singleton = false;
        let mut last_method: Option<&'a str> = None;

        for stmt in statements {
            if is_bare_access_modifier(stmt) {
                groups.push(Partition::default());
                last_method = None;
                continue;
            }

            if let Some(method) = MethodRef::from_statement(stmt, self.matcher) {
                if self.exempt.contains(method.name) {
                    last_method = None;
                    continue;
                }
                if method.singleton != in_singleton {
                    groups.push(Partition::default());
                }
                in_singleton = method.singleton;
                last_method = Some(method.name);
                push_member(&mut groups, Member::Method(method));
                continue;
            }

            if let Some(target) = self.matcher.target(stmt)
                && last_method == Some(target)
            {
                push_member(
                    &mut groups,
                    Member::Qualifier {
                        index: stmt.index(),
                        target,
                    },
                );
            }
        }

        groups.retain(|group| !group.is_empty());
        groups
    }
}

fn push_member<'a>(groups: &mut [Partition<'a>], member: Member<'a>) {
    if let Some(group) = groups.last_mut() {
        group.members.push(member);
    }
}
