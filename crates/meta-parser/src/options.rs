//! Options controlling include resolution.

use std::path::PathBuf;

/// Default bound on nested include following.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 3;

/// Headers that define many macros irrelevant to test metadata, or macros
/// that must not be expanded at all.
pub const DEFAULT_SKIP_INCLUDES: &[&str] = &["tst_test.h", "config.h", "tst_taint.h"];

/// Include path prefixes of the internal compatibility headers.
pub const DEFAULT_SKIP_INCLUDE_PREFIXES: &[&str] = &["lapi/"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Extra directories consulted, in order, after the directory of the
    /// file containing the `#include`.
    pub search_dirs: Vec<PathBuf>,
    /// Include nesting bound. This caps work only; cycles are not detected.
    pub max_include_depth: usize,
    /// Include names (without quotes) that are never opened.
    pub skip_includes: Vec<String>,
    /// Include name prefixes that are never opened.
    pub skip_include_prefixes: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            search_dirs: Vec::new(),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            skip_includes: DEFAULT_SKIP_INCLUDES.iter().map(ToString::to_string).collect(),
            skip_include_prefixes: DEFAULT_SKIP_INCLUDE_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn with_search_dirs(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.search_dirs.extend(dirs);
        self
    }

    /// True if an include of `name` must not be opened.
    #[must_use]
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip_includes.iter().any(|skip| skip == name)
            || self
                .skip_include_prefixes
                .iter()
                .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_skip_known_headers() {
        let options = ParseOptions::default();
        assert_eq!(options.max_include_depth, 3);
        assert!(options.is_skipped("tst_test.h"));
        assert!(options.is_skipped("config.h"));
        assert!(options.is_skipped("lapi/syscalls.h"));
        assert!(!options.is_skipped("my_test.h"));
        assert!(!options.is_skipped("sub/tst_test.h"));
    }

    #[test]
    fn search_dirs_keep_order() {
        let options = ParseOptions::default()
            .with_search_dirs([PathBuf::from("a"), PathBuf::from("b")])
            .with_search_dirs([PathBuf::from("c")]);
        assert_eq!(
            options.search_dirs,
            vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")]
        );
    }
}
