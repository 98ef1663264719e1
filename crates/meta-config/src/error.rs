//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// More `-I` directories than `includes.max_search_dirs` allows.
    #[error("Too many include paths: {given} given, at most {max} allowed")]
    TooManySearchDirs { given: usize, max: usize },
}
