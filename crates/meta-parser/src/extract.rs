//! Test struct extraction.
//!
//! Walks a test source once, following `#define`/`#include` lines into the
//! macro table and collecting doc comments, until the header
//! `static struct tst_test test = {` is seen. The initializer's
//! `.field = value` pairs then become entries of the result map.
//!
//! Values are scalars (after macro substitution), brace-enclosed arrays
//! (nested, with adjacent tokens in one slot concatenated and a trailing
//! `NULL` terminator dropped) or `ARRAY_SIZE(id)`, which is resolved to the
//! element count of the array `id`.

use std::fs;
use std::path::{Path, PathBuf};

use meta_core::{Map, Node};
use tracing::{debug, warn};

use crate::array_size;
use crate::error::ParserError;
use crate::include::{IncludeResolver, parent_dir};
use crate::macros::MacroTable;
use crate::options::ParseOptions;
use crate::scanner::{Scanner, Token};

/// Token sequence opening the metadata initializer.
const STRUCT_HEADER: [&str; 6] = ["static", "struct", "tst_test", "test", "=", "{"];

/// Key the doc comment lines are stored under.
pub const DOC_KEY: &str = "doc";

/// Extract the raw metadata map from the file at `path`.
///
/// A missing file is reported and yields `Ok(None)`, as does a file with no
/// doc comment and no test struct.
///
/// # Errors
/// Returns `ParserError` on read failures and on `ARRAY_SIZE` values that
/// cannot be resolved.
pub fn extract_file(path: &Path, options: &ParseOptions) -> Result<Option<Map>, ParserError> {
    if !path.exists() {
        warn!("file {} does not exist", path.display());
        return Ok(None);
    }

    let src = fs::read(path)?;
    extract_source(&src, path, options)
}

/// Extract the raw metadata map from `src`, read from `path`.
///
/// `path` only locates relative includes.
///
/// # Errors
/// See [`extract_file`].
pub fn extract_source(
    src: &[u8],
    path: &Path,
    options: &ParseOptions,
) -> Result<Option<Map>, ParserError> {
    Extractor::new(src, parent_dir(path).to_path_buf(), options).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    /// Expecting a field name.
    Name,
    /// Expecting `=` after the name.
    Assign,
    /// Expecting the value, possibly behind a cast.
    Value,
    /// Inside a parenthesized cast, at the given nesting depth.
    Cast(usize),
    /// Value done, waiting for `,`.
    Separator,
}

struct Extractor<'a> {
    scanner: Scanner<'a>,
    dir: PathBuf,
    includes: IncludeResolver<'a>,
    macros: MacroTable,
    doc: Vec<Node>,
    fields: Map,
}

impl<'a> Extractor<'a> {
    fn new(src: &'a [u8], dir: PathBuf, options: &'a ParseOptions) -> Self {
        Self {
            scanner: Scanner::new(src),
            dir,
            includes: IncludeResolver::new(options),
            macros: MacroTable::new(),
            doc: Vec::new(),
            fields: Map::new(),
        }
    }

    fn run(mut self) -> Result<Option<Map>, ParserError> {
        let mut matched = 0;
        let mut found = false;

        while let Some(tok) = self.scanner.next_token(Some(&mut self.doc)) {
            if tok.matches(STRUCT_HEADER[matched]) {
                matched += 1;
            } else {
                if tok.is_punct('#') {
                    self.directive();
                }
                matched = 0;
            }

            if matched == STRUCT_HEADER.len() {
                found = true;
                self.parse_fields()?;
                matched = 0;
            }
        }

        if !self.doc.is_empty() {
            let doc = std::mem::take(&mut self.doc);
            self.fields.insert(DOC_KEY, Node::Array(doc))?;
            found = true;
        }

        Ok(found.then_some(self.fields))
    }

    fn directive(&mut self) {
        let Some(tok) = self.scanner.next_token(Some(&mut self.doc)) else {
            return;
        };

        if tok.is_word("define") {
            self.macros.collect_define(&mut self.scanner);
        } else if tok.is_word("include") {
            self.includes
                .include(&mut self.scanner, &self.dir, 0, &mut self.macros);
        }
    }

    fn parse_fields(&mut self) -> Result<(), ParserError> {
        let mut state = FieldState::Name;
        let mut name = String::new();

        while let Some(tok) = self.scanner.next_token(Some(&mut self.doc)) {
            if tok.is_punct('}') {
                return Ok(());
            }

            state = match state {
                FieldState::Name => {
                    name = tok.text;
                    FieldState::Assign
                }
                FieldState::Assign => {
                    if tok.is_punct('=') {
                        FieldState::Value
                    } else {
                        warn!(field = %name, token = %tok.text, "expected '='");
                        FieldState::Assign
                    }
                }
                FieldState::Value if tok.is_punct('(') => FieldState::Cast(0),
                FieldState::Value if tok.is_punct(',') => FieldState::Value,
                FieldState::Value => {
                    self.field_value(&name, &tok)?;
                    FieldState::Separator
                }
                FieldState::Cast(depth) if tok.is_punct('(') => FieldState::Cast(depth + 1),
                FieldState::Cast(0) if tok.is_punct(')') => FieldState::Value,
                FieldState::Cast(depth) if tok.is_punct(')') => FieldState::Cast(depth - 1),
                FieldState::Cast(depth) => FieldState::Cast(depth),
                FieldState::Separator if tok.is_punct(',') => FieldState::Name,
                FieldState::Separator => FieldState::Separator,
            };
        }

        Ok(())
    }

    fn field_value(&mut self, name: &str, tok: &Token) -> Result<(), ParserError> {
        let key = name.strip_prefix('.').unwrap_or(name);

        let value = if tok.is_punct('{') {
            Node::Array(self.parse_array())
        } else if tok.is_word("ARRAY_SIZE") {
            self.array_size(key)?
        } else if tok.is_word("NULL") {
            return Ok(());
        } else {
            Node::text(self.macros.expand(tok))
        };

        if key.is_empty() {
            warn!(token = %tok.text, "value without a field name");
            return Ok(());
        }

        self.fields.insert(key, value)?;
        Ok(())
    }

    /// Parse a brace-enclosed array whose `{` was already consumed.
    fn parse_array(&mut self) -> Vec<Node> {
        let mut items = Vec::new();
        let mut entry: Option<String> = None;

        while let Some(tok) = self.scanner.next_token(None) {
            if tok.is_punct('{') {
                finalize_entry(&mut entry, &mut items);
                let nested = self.parse_array();
                if !nested.is_empty() {
                    items.push(Node::Array(nested));
                }
            } else if tok.is_punct('}') {
                finalize_entry(&mut entry, &mut items);
                if matches!(items.last(), Some(Node::Null)) {
                    items.pop();
                }
                return items;
            } else if tok.is_punct(',') {
                finalize_entry(&mut entry, &mut items);
            } else if tok.is_word("NULL") {
                finalize_entry(&mut entry, &mut items);
                items.push(Node::Null);
            } else {
                entry
                    .get_or_insert_with(String::new)
                    .push_str(self.macros.expand(&tok));
            }
        }

        finalize_entry(&mut entry, &mut items);
        items
    }

    fn array_size(&mut self, field: &str) -> Result<Node, ParserError> {
        let malformed = || ParserError::MalformedArraySize {
            field: field.to_string(),
        };

        if !self
            .scanner
            .next_token(None)
            .is_some_and(|tok| tok.is_punct('('))
        {
            return Err(malformed());
        }
        let id = self.scanner.next_token(None).ok_or_else(malformed)?.text;

        debug!(array = %id, "computing array length");
        let len = array_size::resolve_array_len(&mut self.scanner, &self.dir, &id, &self.includes)
            .ok_or_else(|| ParserError::ArraySizeUnresolved {
                field: field.to_string(),
                id,
            })?;

        Ok(Node::int(i64::try_from(len).unwrap_or(i64::MAX)))
    }
}

fn finalize_entry(entry: &mut Option<String>, items: &mut Vec<Node>) {
    if let Some(text) = entry.take() {
        items.push(Node::Text(text));
    }
}

#[cfg(test)]
mod tests;
