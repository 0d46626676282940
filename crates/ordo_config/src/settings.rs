//! Settings of the `OrderedMethods` rule.
//!
//! Keys keep the PascalCase spelling used by RuboCop configuration so an
//! existing `.rubocop.yml` section translates one to one.

use serde::Deserialize;

/// The `[OrderedMethods]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OrderedMethodsSettings {
    /// Whether the rule runs at all.
    pub enabled: bool,

    /// Name of the ordering policy. Validated when the rule is built.
    pub enforced_style: String,

    /// Method names exempt from ordering.
    pub ignored_methods: Vec<String>,

    /// Same as `IgnoredMethods`; both lists are merged.
    pub allowed_methods: Vec<String>,

    /// Extra qualifier macros (e.g. `memoize`) on top of the built-in set.
    pub method_qualifiers: Vec<String>,

    /// Signature annotations to keep with their method (`"sorbet"`).
    pub signature: Option<String>,
}

impl OrderedMethodsSettings {
    pub const RULE_NAME: &'static str = "OrderedMethods";
    pub const DEFAULT_STYLE: &'static str = "alphabetical";

    /// Every method name exempt from ordering.
    pub fn exempt_methods(&self) -> impl Iterator<Item = &str> {
        self.ignored_methods
            .iter()
            .chain(&self.allowed_methods)
            .map(String::as_str)
    }
}

impl Default for OrderedMethodsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            enforced_style: Self::DEFAULT_STYLE.to_string(),
            ignored_methods: Vec::new(),
            allowed_methods: Vec::new(),
            method_qualifiers: Vec::new(),
            signature: None,
        }
    }
}
