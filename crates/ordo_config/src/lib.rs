//! Configuration for ordo: `ordo.toml` loading and rule settings.

mod ordo_config;
mod settings;

pub use ordo_config::{
    CONFIG_FILE_NAMES, ConfigError, DEFAULT_MAX_ITERATIONS, FixConfig, OrdoConfig, RuleMode,
};
pub use settings::OrderedMethodsSettings;
