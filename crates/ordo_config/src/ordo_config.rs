//! Parser for ordo.toml configuration files.
//!
//! ```toml
//! [OrderedMethods]
//! IgnoredMethods = ["initialize"]
//! Signature = "sorbet"
//!
//! [fix]
//! unsafe_fixes = false
//! max_iterations = 200
//!
//! [fix.rules]
//! OrderedMethods = "check"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::OrderedMethodsSettings;

/// File names searched for, in order, in the working directory.
pub const CONFIG_FILE_NAMES: &[&str] = &["ordo.toml", ".ordo.toml", "config/ordo.toml"];

/// Cap on fixer passes per file.
pub const DEFAULT_MAX_ITERATIONS: usize = 200;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// How a rule should handle violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleMode {
    /// Report and auto-fix violations.
    #[default]
    Fix,
    /// Only report violations.
    Check,
    /// Skip the rule entirely.
    Disabled,
}

impl<'de> Deserialize<'de> for RuleMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "fix" => Ok(RuleMode::Fix),
            "check" => Ok(RuleMode::Check),
            "disabled" | "disable" | "off" => Ok(RuleMode::Disabled),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid rule mode: {s}. Expected fix, check, or disabled"
            ))),
        }
    }
}

/// Fix-related configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    /// Whether to apply unsafe fixes without --unsafe flag.
    pub unsafe_fixes: bool,

    /// Maximum number of lint-and-fix passes per file.
    pub max_iterations: usize,

    /// Per-rule fix mode overrides.
    pub rules: HashMap<String, RuleMode>,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            unsafe_fixes: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            rules: HashMap::new(),
        }
    }
}

/// Root ordo.toml configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OrdoConfig {
    /// Fix behavior configuration.
    #[serde(default)]
    pub fix: FixConfig,

    /// Settings of the method ordering rule.
    #[serde(default, rename = "OrderedMethods")]
    pub ordered_methods: OrderedMethodsSettings,
}

impl OrdoConfig {
    /// Parse an ordo.toml file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse ordo.toml content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Look for a config file under `dir`, trying [`CONFIG_FILE_NAMES`] in order.
    pub fn discover(dir: &Path) -> Option<std::path::PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Get the fix mode for a specific rule.
    ///
    /// `Enabled = false` in the rule's own table wins over `[fix.rules]`.
    pub fn rule_mode(&self, rule_name: &str) -> RuleMode {
        if rule_name == OrderedMethodsSettings::RULE_NAME && !self.ordered_methods.enabled {
            return RuleMode::Disabled;
        }
        self.fix
            .rules
            .get(rule_name)
            .copied()
            .unwrap_or(RuleMode::Fix)
    }

    /// Check if a rule is enabled.
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rule_mode(rule_name) != RuleMode::Disabled
    }

    /// Check if a rule should be auto-fixed.
    pub fn should_fix(&self, rule_name: &str) -> bool {
        self.rule_mode(rule_name) == RuleMode::Fix
    }
}
