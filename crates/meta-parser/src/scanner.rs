//! Token scanner over raw C source bytes.
//!
//! The scanner understands just enough of C to walk a test source: it skips
//! whitespace and comments, returns string literals without their quotes,
//! groups identifier/number/path characters into words and returns a fixed
//! set of punctuation bytes as one-character tokens. Every other byte outside
//! a string literal is dropped.
//!
//! Block comments opened with `/*\` followed by a newline are doc comments.
//! When a doc sink is supplied, each of their lines is appended to it.

use meta_core::Node;

/// Bytes returned as one-character tokens.
const PUNCT: &[u8] = b"{};()=,[]#|+*%";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A one-character punctuation token.
    Punct,
    /// Identifier, number, or path-like run of `[A-Za-z0-9._-]`.
    Word,
    /// String literal contents without the surrounding quotes.
    Str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct && self.text.len() == 1 && self.text.starts_with(c)
    }

    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text == word
    }

    /// Match a word or punctuation token by text. String literals never match.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.kind != TokenKind::Str && self.text == text
    }
}

/// Cursor over an in-memory source buffer.
///
/// The position can be saved and restored with [`Scanner::position`] and
/// [`Scanner::seek`], which is how a second pass over the same file is done.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub const fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.src.len());
    }

    pub const fn rewind(&mut self) {
        self.pos = 0;
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    pub(crate) fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Return the next token, or `None` at end of input.
    ///
    /// `doc` receives the lines of any doc comment passed over; with `None`
    /// doc comments are skipped like ordinary comments.
    pub fn next_token(&mut self, mut doc: Option<&mut Vec<Node>>) -> Option<Token> {
        let mut buf = Vec::new();

        while let Some(c) = self.peek() {
            match c {
                c if PUNCT.contains(&c) => {
                    if !buf.is_empty() {
                        break;
                    }
                    self.pos += 1;
                    return Some(Token::new(TokenKind::Punct, char::from(c)));
                }
                c if is_word_byte(c) => {
                    buf.push(c);
                    self.pos += 1;
                }
                b'"' => {
                    if !buf.is_empty() {
                        break;
                    }
                    self.pos += 1;
                    return Some(self.string_literal());
                }
                // A comment does not end a pending word: `a/* x */b` is `ab`.
                b'/' => match self.peek_at(1) {
                    Some(b'/') => {
                        self.pos += 2;
                        self.skip_line();
                    }
                    Some(b'*') => {
                        self.pos += 2;
                        self.block_comment(doc.as_deref_mut());
                    }
                    _ => self.pos += 1,
                },
                c if c.is_ascii_whitespace() => {
                    self.pos += 1;
                    if !buf.is_empty() {
                        break;
                    }
                }
                _ => self.pos += 1,
            }
        }

        (!buf.is_empty()).then(|| Token::new(TokenKind::Word, lossy(&buf)))
    }

    /// Consume everything up to and including the next newline.
    pub fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == b'\n' {
                break;
            }
        }
    }

    pub(crate) fn skip_inline_space(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
    }

    /// Read a raw run of non-whitespace bytes after optional spaces and tabs.
    ///
    /// Used for preprocessor operands such as the include target `"foo.h"`
    /// or a macro name, which are not tokenized.
    pub fn read_raw_word(&mut self) -> Option<String> {
        self.skip_inline_space();
        let start = self.pos;
        while self.peek().is_some_and(|c| !c.is_ascii_whitespace()) {
            self.pos += 1;
        }
        (self.pos > start).then(|| lossy(&self.src[start..self.pos]))
    }

    fn string_literal(&mut self) -> Token {
        let mut buf = Vec::new();
        while let Some(c) = self.bump() {
            if c == b'"' && !ends_with_escape(&buf) {
                break;
            }
            buf.push(c);
        }
        Token::new(TokenKind::Str, lossy(&buf))
    }

    fn block_comment(&mut self, doc: Option<&mut Vec<Node>>) {
        if let Some(doc) = doc {
            let rest = &self.src[self.pos..];
            let opener = [b"\\\n".as_slice(), b"\\\r\n".as_slice()]
                .into_iter()
                .find(|prefix| rest.starts_with(prefix));
            if let Some(opener) = opener {
                self.pos += opener.len();
                self.doc_comment(doc);
                return;
            }
        }

        match find(&self.src[self.pos..], b"*/") {
            Some(idx) => self.pos += idx + 2,
            None => self.pos = self.src.len(),
        }
    }

    fn doc_comment(&mut self, doc: &mut Vec<Node>) {
        let mut line = Vec::new();
        while let Some(c) = self.bump() {
            match c {
                b'\n' => {
                    doc.push(Node::Text(doc_line(&line)));
                    line.clear();
                }
                b'*' if self.peek() == Some(b'/') => {
                    self.pos += 1;
                    return;
                }
                _ => line.push(c),
            }
        }
    }
}

const fn is_word_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'.' | b'_' | b'-')
}

/// True if `buf` ends with an odd number of backslashes.
fn ends_with_escape(buf: &[u8]) -> bool {
    buf.iter().rev().take_while(|&&c| c == b'\\').count() % 2 == 1
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn doc_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    strip_doc_prefix(&lossy(raw)).to_string()
}

/// Strip leading whitespace plus one `*` and one following whitespace
/// character. A line without a leading `*` is returned unchanged.
#[must_use]
pub fn strip_doc_prefix(line: &str) -> &str {
    let trimmed = line.trim_start_matches(|c: char| c.is_ascii_whitespace());
    match trimmed.strip_prefix('*') {
        Some(rest) => rest
            .strip_prefix(|c: char| c.is_ascii_whitespace())
            .unwrap_or(rest),
        None => line,
    }
}
