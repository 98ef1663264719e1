//! # meta-config
//!
//! Layered configuration loading for metaparse using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`METAPARSE_*` prefix, `__` as separator)
//! 2. Project-level `./metaparse.toml`
//! 3. User-level `~/.config/metaparse/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `METAPARSE_INCLUDES__MAX_DEPTH` -> `includes.max_depth`,
//! `METAPARSE_OUTPUT__INDENT` -> `output.indent`. `METAPARSE_LOG` is the log
//! filter read by the binary and is not part of this configuration.
//!
//! # Usage
//!
//! ```no_run
//! use meta_config::MetaConfig;
//!
//! let config = MetaConfig::load().expect("config");
//! let options = config.includes.parse_options(&[]).expect("options");
//! assert_eq!(options.max_include_depth, config.includes.max_depth);
//! ```

mod error;
mod includes;
mod output;

pub use error::ConfigError;
pub use includes::IncludeConfig;
pub use output::OutputConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local configuration file, relative to the working directory.
pub const PROJECT_CONFIG_FILE: &str = "metaparse.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "METAPARSE_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetaConfig {
    #[serde(default)]
    pub includes: IncludeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl MetaConfig {
    /// Load and validate configuration from all sources.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`METAPARSE_*` prefix)
    /// 2. `./metaparse.toml` (project-local)
    /// 3. `~/.config/metaparse/config.toml` (user-global)
    /// 4. Default values
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is
    /// out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and validate from an already built figment.
    ///
    /// # Errors
    /// See [`MetaConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["log"]).split("__"))
    }

    /// Reject values the parser cannot work with.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.includes.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "includes.max_depth".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.includes.max_search_dirs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "includes.max_search_dirs".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("metaparse").join("config.toml"))
    }
}
