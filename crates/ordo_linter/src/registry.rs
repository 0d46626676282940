//! Rule registry for mapping rule names to rule implementations.

use std::collections::HashMap;

use ordo_config::OrdoConfig;
use thiserror::Error;

use crate::Rule;

/// A rule setting with a value the rule does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Invalid \"{key}\" config for {rule}. Expected one of: {expected}")]
    InvalidOption {
        rule: &'static str,
        key: &'static str,
        expected: String,
    },
}

/// Trait for rules that can be constructed from `ordo.toml` settings.
pub trait FromSettings: Rule + Sized {
    /// The name this rule is configured under.
    const RULE_NAME: &'static str;

    /// Create a rule instance from the loaded configuration.
    fn from_settings(config: &OrdoConfig) -> Result<Self, SettingsError>;
}

/// A factory function that creates a boxed rule from configuration.
type RuleFactory = fn(&OrdoConfig) -> Result<Box<dyn Rule>, SettingsError>;

/// Registry mapping rule names to rule factories.
pub struct RuleRegistry {
    factories: HashMap<&'static str, RuleFactory>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with all built-in rules registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register::<crate::rules::OrderedMethods>();
        registry
    }

    /// Register a rule type that implements FromSettings.
    pub fn register<R: FromSettings + 'static>(&mut self) {
        self.factories.insert(R::RULE_NAME, |config| {
            Ok(Box::new(R::from_settings(config)?) as Box<dyn Rule>)
        });
    }

    /// Create a rule by name.
    /// Returns None if the name is not recognized.
    pub fn create_rule(
        &self,
        name: &str,
        config: &OrdoConfig,
    ) -> Option<Result<Box<dyn Rule>, SettingsError>> {
        self.factories.get(name).map(|factory| factory(config))
    }

    /// Check if a rule name is registered.
    pub fn has_rule(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// All registered rule names, sorted.
    pub fn rule_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creates_ordered_methods() {
        let registry = RuleRegistry::builtin();
        let rule = registry
            .create_rule("OrderedMethods", &OrdoConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(rule.name(), "OrderedMethods");
        assert!(registry.has_rule("OrderedMethods"));
    }

    #[test]
    fn test_registry_reports_invalid_settings() {
        let registry = RuleRegistry::builtin();
        let config = OrdoConfig::parse("[OrderedMethods]\nSignature = \"rbs\"\n").unwrap();
        let err = registry
            .create_rule("OrderedMethods", &config)
            .unwrap()
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "Invalid \"Signature\" config for Layout/OrderedMethods. Expected one of: sorbet"
        );
    }

    #[test]
    fn test_registry_unknown_rule() {
        let registry = RuleRegistry::builtin();
        assert!(
            registry
                .create_rule("UnknownRule", &OrdoConfig::default())
                .is_none()
        );
        assert_eq!(registry.rule_names(), ["OrderedMethods"]);
    }
}
