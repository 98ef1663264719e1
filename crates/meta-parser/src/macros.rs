//! Object-like macro table built from `#define` lines.
//!
//! Only the name and the body text are kept. Bodies are substituted for
//! matching identifier tokens exactly once; a body is never re-scanned.

use std::collections::HashMap;

use tracing::debug;

use crate::scanner::{Scanner, Token, TokenKind};

/// Names starting with this prefix are internal and never recorded.
const RESERVED_PREFIX: char = '_';

#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    entries: HashMap<String, String>,
}

impl MacroTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a macro. A later definition of the same name replaces the
    /// earlier one; the replaced body is returned.
    pub fn define(&mut self, name: impl Into<String>, body: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), body.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Substitute `name` with its macro body, if any.
    #[must_use]
    pub fn apply<'t>(&'t self, name: &'t str) -> &'t str {
        match self.get(name) {
            Some(body) => {
                debug!(name, body, "applying macro");
                body
            }
            None => name,
        }
    }

    /// Token text after macro substitution. String literals are never
    /// substituted.
    #[must_use]
    pub fn expand<'t>(&'t self, token: &'t Token) -> &'t str {
        match token.kind {
            TokenKind::Word => self.apply(&token.text),
            TokenKind::Punct | TokenKind::Str => &token.text,
        }
    }

    /// Read the rest of a `#define` line from `scanner` and record it.
    ///
    /// The scanner must be positioned right after the `define` keyword.
    /// Macros with an empty body or a reserved name are skipped.
    pub fn collect_define(&mut self, scanner: &mut Scanner<'_>) {
        let Some(name) = scanner.read_raw_word() else {
            return;
        };

        let body = read_body(scanner);
        if name.starts_with(RESERVED_PREFIX) || body.is_empty() {
            return;
        }

        debug!(name = %name, body = %body, "macro");
        self.define(name, body);
    }
}

/// Read a macro body up to the end of its logical line.
///
/// A quoted body is returned without quotes and with `\"` unescaped.
/// Otherwise backslash-newline joins lines and surrounding spaces and tabs
/// are trimmed.
fn read_body(scanner: &mut Scanner<'_>) -> String {
    scanner.skip_inline_space();

    if scanner.peek() == Some(b'"') {
        scanner.bump();
        let body = read_quoted(scanner);
        scanner.skip_line();
        return body;
    }

    let mut buf = Vec::new();
    while let Some(c) = scanner.bump() {
        if c != b'\n' {
            buf.push(c);
            continue;
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        if buf.last() == Some(&b'\\') {
            buf.pop();
            continue;
        }
        break;
    }

    String::from_utf8_lossy(&buf)
        .trim_matches(|c: char| c == ' ' || c == '\t')
        .to_string()
}

fn read_quoted(scanner: &mut Scanner<'_>) -> String {
    let mut buf = Vec::new();
    while let Some(c) = scanner.bump() {
        if c == b'"' {
            if buf.last() != Some(&b'\\') {
                break;
            }
            buf.pop();
        }
        buf.push(c);
    }
    String::from_utf8_lossy(&buf).into_owned()
}
