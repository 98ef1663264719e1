//! `#include` resolution and macro collection from included headers.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::macros::MacroTable;
use crate::options::ParseOptions;
use crate::scanner::Scanner;

/// Resolves quoted includes against the including file's directory and the
/// configured search directories.
#[derive(Debug, Clone, Copy)]
pub struct IncludeResolver<'o> {
    options: &'o ParseOptions,
}

impl<'o> IncludeResolver<'o> {
    #[must_use]
    pub const fn new(options: &'o ParseOptions) -> Self {
        Self { options }
    }

    /// Resolve the raw include operand `target` (for example `"foo.h"`).
    ///
    /// System includes (`<...>`) and skipped headers resolve to `None`. The
    /// first directory containing the file wins.
    #[must_use]
    pub fn resolve(&self, current_dir: &Path, target: &str) -> Option<PathBuf> {
        let inner = target.strip_prefix('"')?;
        let name = inner.strip_suffix('"').unwrap_or(inner);
        if name.is_empty() {
            return None;
        }

        if self.options.is_skipped(name) {
            debug!(include = target, "include skipped");
            return None;
        }

        let found = std::iter::once(current_dir)
            .chain(self.options.search_dirs.iter().map(PathBuf::as_path))
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file());

        match &found {
            Some(path) => debug!(path = %path.display(), "include"),
            None => debug!(include = target, "include not found"),
        }
        found
    }

    /// Handle an `#include` whose operand is next in `scanner`: resolve it
    /// relative to `current_dir` and collect macros from it.
    pub fn include(
        &self,
        scanner: &mut Scanner<'_>,
        current_dir: &Path,
        depth: usize,
        macros: &mut MacroTable,
    ) {
        let Some(target) = scanner.read_raw_word() else {
            return;
        };
        if let Some(path) = self.resolve(current_dir, &target) {
            self.follow(&path, depth, macros);
        }
    }

    /// Collect `#define`s from `path`, following its own includes until the
    /// depth bound is reached. Unreadable headers are skipped.
    pub fn follow(&self, path: &Path, depth: usize, macros: &mut MacroTable) {
        if depth >= self.options.max_include_depth {
            debug!(path = %path.display(), depth, "include depth limit reached");
            return;
        }

        let src = match fs::read(path) {
            Ok(src) => src,
            Err(error) => {
                debug!(path = %path.display(), %error, "cannot read include");
                return;
            }
        };
        let dir = parent_dir(path);

        let mut scanner = Scanner::new(&src);
        let mut directive = false;
        while let Some(tok) = scanner.next_token(None) {
            if tok.is_punct('#') {
                directive = true;
                continue;
            }
            if !std::mem::take(&mut directive) {
                continue;
            }

            if tok.is_word("define") {
                macros.collect_define(&mut scanner);
            } else if tok.is_word("include") {
                self.include(&mut scanner, dir, depth + 1, macros);
            }
        }

        debug!(path = %path.display(), "include end");
    }
}

/// Directory of `path`; empty (the working directory) for a bare file name.
#[must_use]
pub fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}
