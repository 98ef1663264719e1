//! JSON rendering of a [`Node`] tree.
//!
//! Layout: array and map bodies are indented two spaces per level relative to
//! the base indentation, closing brackets line up with the base. The value of
//! a map entry starts right after `"key": ` on the same line. Empty
//! containers render as `[]` and `{}`.
//!
//! String escaping covers backslash and double quote. A tab expands to eight
//! spaces, which the catalog consumers expect. Raw control bytes below `0x20`
//! are dropped with a warning instead of being escaped.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{CharEscape, Formatter, Serializer};
use tracing::warn;

use crate::node::Node;

const INDENT_STEP: usize = 2;
const TAB_EXPANSION: &[u8] = b"        ";

/// [`Formatter`] producing the catalog layout.
#[derive(Debug, Clone)]
pub struct CatalogFormatter {
    base: usize,
    depth: usize,
    has_value: bool,
}

impl CatalogFormatter {
    /// `base` is the column closing brackets of the outermost value line up with.
    #[must_use]
    pub const fn new(base: usize) -> Self {
        Self {
            base,
            depth: 0,
            has_value: false,
        }
    }

    fn pad<W: ?Sized + Write>(&self, writer: &mut W) -> io::Result<()> {
        let width = self.base + INDENT_STEP * self.depth;
        write!(writer, "{:width$}", "")
    }

    fn open<W: ?Sized + Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(bracket)
    }

    fn close<W: ?Sized + Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        if self.has_value {
            writer.write_all(b"\n")?;
            self.pad(writer)?;
        }
        writer.write_all(bracket)
    }

    fn next_line<W: ?Sized + Write>(&self, writer: &mut W, first: bool) -> io::Result<()> {
        writer.write_all(if first { b"\n" } else { b",\n" })?;
        self.pad(writer)
    }
}

impl Formatter for CatalogFormatter {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"[")
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"]")
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.next_line(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"{")
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"}")
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.next_line(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn write_char_escape<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        char_escape: CharEscape,
    ) -> io::Result<()> {
        let byte = match char_escape {
            CharEscape::Quote => return writer.write_all(b"\\\""),
            CharEscape::ReverseSolidus => return writer.write_all(b"\\\\"),
            CharEscape::Solidus => return writer.write_all(b"/"),
            CharEscape::Tab => return writer.write_all(TAB_EXPANSION),
            CharEscape::Backspace => 0x08,
            CharEscape::FormFeed => 0x0c,
            CharEscape::LineFeed => b'\n',
            CharEscape::CarriageReturn => b'\r',
            CharEscape::AsciiControl(byte) => byte,
        };
        warn!(byte, "invalid character for JSON, dropped");
        Ok(())
    }
}

/// Write `node` as JSON. `indent` is the column of the closing bracket.
///
/// # Errors
/// Propagates I/O errors from `out`.
pub fn write_json<W: Write>(node: &Node, out: &mut W, indent: usize) -> serde_json::Result<()> {
    let mut serializer = Serializer::with_formatter(out, CatalogFormatter::new(indent));
    node.serialize(&mut serializer)
}

/// Render `node` into a string.
///
/// # Errors
/// Returns an error only if serialization itself fails.
pub fn to_json_string(node: &Node, indent: usize) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    write_json(node, &mut buf, indent)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write one catalog entry: `<indent>"name": <node>` followed by a newline.
///
/// # Errors
/// Propagates I/O errors from `out`.
pub fn write_fragment<W: Write>(
    out: &mut W,
    name: &str,
    node: &Node,
    indent: usize,
) -> serde_json::Result<()> {
    write!(out, "{:indent$}", "").map_err(serde_json::Error::io)?;
    name.serialize(&mut Serializer::with_formatter(&mut *out, CatalogFormatter::new(indent)))?;
    out.write_all(b": ").map_err(serde_json::Error::io)?;
    write_json(node, &mut *out, indent)?;
    out.write_all(b"\n").map_err(serde_json::Error::io)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::node::Map;

    fn render(node: &Node, indent: usize) -> String {
        to_json_string(node, indent).unwrap()
    }

    fn metadata_map() -> Node {
        let mut map = Map::new();
        map.insert("needs_root", Node::text("1")).unwrap();
        map.insert("test_variants", Node::int(3)).unwrap();
        map.insert(
            "doc",
            Node::from(vec![Node::text("first"), Node::text("second")]),
        )
        .unwrap();
        Node::from(map)
    }

    #[test]
    fn scalars_render_inline() {
        assert_eq!(render(&Node::null(), 4), "null");
        assert_eq!(render(&Node::bool(true), 4), "true");
        assert_eq!(render(&Node::int(-12), 4), "-12");
        assert_eq!(render(&Node::text("x"), 4), "\"x\"");
    }

    #[test]
    fn empty_containers_are_compact() {
        assert_eq!(render(&Node::array(), 2), "[]");
        assert_eq!(render(&Node::map(), 2), "{}");
    }

    #[test]
    fn map_layout_with_base_indent() {
        let expected = "{\n    \"needs_root\": \"1\",\n    \"test_variants\": 3,\n    \"doc\": [\n      \"first\",\n      \"second\"\n    ]\n  }";
        assert_eq!(render(&metadata_map(), 2), expected);
    }

    #[test]
    fn nested_arrays_indent_per_level() {
        let node = Node::from(vec![
            Node::from(vec![Node::text("a"), Node::text("b")]),
            Node::text("c"),
        ]);
        let expected = "[\n  [\n    \"a\",\n    \"b\"\n  ],\n  \"c\"\n]";
        assert_eq!(render(&node, 0), expected);
    }

    #[test]
    fn fragment_has_name_and_trailing_newline() {
        let mut map = Map::new();
        map.insert("fname", Node::text("foo.c")).unwrap();
        let mut buf = Vec::new();
        write_fragment(&mut buf, "foo", &Node::from(map), 2).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "  \"foo\": {\n    \"fname\": \"foo.c\"\n  }\n"
        );
    }

    #[test]
    fn rendered_output_parses_as_json() {
        let rendered = format!("{{{}}}", {
            let mut buf = Vec::new();
            write_fragment(&mut buf, "t", &metadata_map(), 2).unwrap();
            String::from_utf8(buf).unwrap()
        });
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["t"]["test_variants"], 3);
        assert_eq!(parsed["t"]["doc"][1], "second");
    }

    #[rstest]
    #[case::plain("hello world", "hello world")]
    #[case::backslash(r"a\b", r"a\b")]
    #[case::quote(r#"say "hi""#, r#"say "hi""#)]
    #[case::both(r#"\"quoted\"\\"#, r#"\"quoted\"\\"#)]
    #[case::tab("a\tb", "a        b")]
    #[case::unicode("zażółć", "zażółć")]
    fn escaping_round_trips_through_json_parser(#[case] input: &str, #[case] expected: &str) {
        let rendered = render(&Node::text(input), 0);
        let parsed: String = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn control_bytes_are_dropped() {
        let rendered = render(&Node::text("a\u{1}b\nc"), 0);
        assert_eq!(rendered, "\"abc\"");
    }

    #[test]
    fn tab_and_control_bytes_in_keys() {
        let mut map = Map::new();
        map.insert("a\tb\u{7}", Node::int(1)).unwrap();
        assert_eq!(render(&Node::from(map), 0), "{\n  \"a        b\": 1\n}");
    }

    #[test]
    fn empty_container_inside_populated_one() {
        let node = Node::from(vec![Node::array(), Node::map()]);
        assert_eq!(render(&node, 0), "[\n  [],\n  {}\n]");
    }

    #[test]
    fn keys_are_escaped() {
        let mut map = Map::new();
        map.insert("we\"ird", Node::null()).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&render(&Node::from(map), 0)).unwrap();
        assert!(parsed.get("we\"ird").is_some());
    }
}
