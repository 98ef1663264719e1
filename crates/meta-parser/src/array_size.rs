//! Element counting for `ARRAY_SIZE(id)` values.
//!
//! The array is declared elsewhere, so the file is scanned again from the top
//! looking for `id ... = {`. If that fails, the headers pulled in with
//! `#include` are searched one level deep.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::include::IncludeResolver;
use crate::scanner::{Scanner, TokenKind};

/// Count the top-level elements of the brace initializer next in `scanner`.
///
/// The count is the number of top-level commas, plus one unless the last
/// token before the closing brace is a comma. `{}` therefore counts as one.
/// Returns `None` if the next token is not `{` or input ends early.
pub fn count_initializer(scanner: &mut Scanner<'_>) -> Option<usize> {
    if !scanner.next_token(None)?.is_punct('{') {
        return None;
    }

    let mut commas = 0usize;
    let mut depth = 0usize;
    let mut trailing_comma = false;

    loop {
        let tok = scanner.next_token(None)?;
        if tok.is_punct('}') && depth == 0 {
            return Some(commas + usize::from(!trailing_comma));
        }

        trailing_comma = depth == 0 && tok.is_punct(',');
        if trailing_comma {
            commas += 1;
        } else if tok.is_punct('{') {
            depth += 1;
        } else if tok.is_punct('}') {
            depth -= 1;
        }
    }
}

/// Scan forward from the current position for the declaration of `id` and
/// count its elements. Subscripts like `[]` or `[N]` between the name and
/// `=` are ignored.
pub fn scan_for_array(scanner: &mut Scanner<'_>, id: &str) -> Option<usize> {
    let mut prev_is_id = false;
    let mut subscript = 0usize;

    while let Some(tok) = scanner.next_token(None) {
        if tok.is_punct('[') {
            subscript += 1;
            continue;
        }
        if tok.is_punct(']') {
            subscript = subscript.saturating_sub(1);
            continue;
        }
        if subscript > 0 {
            continue;
        }

        if prev_is_id && tok.is_punct('=') {
            if let Some(len) = count_initializer(scanner) {
                debug!(array = id, len, "array length");
                return Some(len);
            }
        }
        prev_is_id = tok.kind == TokenKind::Word && tok.text == id;
    }

    None
}

/// Find the element count of array `id` for a file being parsed.
///
/// Searches the whole file behind `scanner`, then the quoted headers it
/// includes (resolved from `current_dir`). The scanner position is restored
/// before returning.
pub fn resolve_array_len(
    scanner: &mut Scanner<'_>,
    current_dir: &Path,
    id: &str,
    includes: &IncludeResolver<'_>,
) -> Option<usize> {
    let saved = scanner.position();

    scanner.rewind();
    let mut len = scan_for_array(scanner, id);

    if len.is_none() {
        scanner.rewind();
        len = scan_included_headers(scanner, current_dir, id, includes);
    }

    scanner.seek(saved);
    len
}

fn scan_included_headers(
    scanner: &mut Scanner<'_>,
    current_dir: &Path,
    id: &str,
    includes: &IncludeResolver<'_>,
) -> Option<usize> {
    let mut directive = false;
    while let Some(tok) = scanner.next_token(None) {
        if tok.is_punct('#') {
            directive = true;
            continue;
        }
        if !std::mem::take(&mut directive) || !tok.is_word("include") {
            continue;
        }

        let Some(path) = scanner
            .read_raw_word()
            .and_then(|target| includes.resolve(current_dir, &target))
        else {
            continue;
        };

        match fs::read(&path) {
            Ok(header) => {
                if let Some(len) = scan_for_array(&mut Scanner::new(&header), id) {
                    return Some(len);
                }
            }
            Err(error) => debug!(path = %path.display(), %error, "cannot read include"),
        }
    }
    None
}
