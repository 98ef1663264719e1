//! Include resolution settings.

use std::path::PathBuf;

use meta_parser::options::{
    DEFAULT_MAX_INCLUDE_DEPTH, DEFAULT_SKIP_INCLUDE_PREFIXES, DEFAULT_SKIP_INCLUDES,
};
use meta_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_max_depth() -> usize {
    DEFAULT_MAX_INCLUDE_DEPTH
}

const fn default_max_search_dirs() -> usize {
    5
}

fn default_skip() -> Vec<String> {
    DEFAULT_SKIP_INCLUDES.iter().map(ToString::to_string).collect()
}

fn default_skip_prefixes() -> Vec<String> {
    DEFAULT_SKIP_INCLUDE_PREFIXES
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IncludeConfig {
    /// Directories searched after the command-line `-I` directories.
    #[serde(default)]
    pub search_dirs: Vec<PathBuf>,

    /// How deep nested includes are followed for `#define`s.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of `-I` directories accepted on the command line.
    #[serde(default = "default_max_search_dirs")]
    pub max_search_dirs: usize,

    /// Include names that are never opened.
    #[serde(default = "default_skip")]
    pub skip: Vec<String>,

    /// Include path prefixes that are never opened.
    #[serde(default = "default_skip_prefixes")]
    pub skip_prefixes: Vec<String>,
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self {
            search_dirs: Vec::new(),
            max_depth: default_max_depth(),
            max_search_dirs: default_max_search_dirs(),
            skip: default_skip(),
            skip_prefixes: default_skip_prefixes(),
        }
    }
}

impl IncludeConfig {
    /// Build parser options. `cli_dirs` come first in the search order.
    ///
    /// # Errors
    /// Returns [`ConfigError::TooManySearchDirs`] if more than
    /// `max_search_dirs` command-line directories are given.
    pub fn parse_options(&self, cli_dirs: &[PathBuf]) -> Result<ParseOptions, ConfigError> {
        if cli_dirs.len() > self.max_search_dirs {
            return Err(ConfigError::TooManySearchDirs {
                given: cli_dirs.len(),
                max: self.max_search_dirs,
            });
        }

        Ok(ParseOptions {
            search_dirs: cli_dirs
                .iter()
                .chain(&self.search_dirs)
                .cloned()
                .collect(),
            max_include_depth: self.max_depth,
            skip_includes: self.skip.clone(),
            skip_include_prefixes: self.skip_prefixes.clone(),
        })
    }
}
