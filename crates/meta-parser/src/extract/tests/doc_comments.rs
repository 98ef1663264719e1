use pretty_assertions::assert_eq;

use super::*;

// ── Doc comment capture ───────────────────────────────────────

#[test]
fn doc_block_then_struct() {
    let map = extract_fields(
        "/*\\\n * doc line\n */\nstatic struct tst_test test = { .needs_root = 1, };\n",
    );
    assert_eq!(map.keys().collect::<Vec<_>>(), ["needs_root", "doc"]);
    assert_eq!(map.get("doc"), Some(&texts(&["doc line"])));
}

#[test]
fn doc_without_struct_is_still_metadata() {
    let map = extract_fields("/*\\\n * [Description]\n *\n * Checks things.\n */\nint main(void) {}\n");
    assert_eq!(map.len(), 1);
    assert_eq!(
        map.get("doc"),
        Some(&texts(&["[Description]", "", "Checks things."]))
    );
}

#[test]
fn plain_block_comments_are_not_captured() {
    let map = extract_fields(
        "/*\n * Copyright (c) 2024\n */\n/** not doc */\nstatic struct tst_test test = { .a = 1 };",
    );
    assert!(!map.contains_key("doc"));
}

#[test]
fn multiple_doc_blocks_accumulate() {
    let map = extract_fields(
        "/*\\\n * first\n */\nint x;\n/*\\\n * second\n */\nstatic struct tst_test test = { .a = 1 };",
    );
    assert_eq!(map.get("doc"), Some(&texts(&["first", "second"])));
}

#[test]
fn doc_inside_struct_is_captured() {
    let map = extract_fields(
        "static struct tst_test test = {\n/*\\\n * inner\n */\n.a = 1,\n};",
    );
    assert_eq!(text(&map, "a"), "1");
    assert_eq!(map.get("doc"), Some(&texts(&["inner"])));
}

#[test]
fn doc_in_array_value_is_skipped() {
    let map = extract_fields(
        "static struct tst_test test = { .a = { x, /*\\\n * hidden\n */ y }, };",
    );
    assert_eq!(map.get("a"), Some(&texts(&["x", "y"])));
    assert!(!map.contains_key("doc"));
}

#[test]
fn crlf_doc_lines() {
    let map = extract_fields("/*\\\r\n * windows line\r\n */\r\n");
    assert_eq!(map.get("doc"), Some(&texts(&["windows line"])));
}

#[test]
fn lines_without_star_keep_indentation() {
    let map = extract_fields("/*\\\n   indented\n*\tstarred\n */\n");
    assert_eq!(map.get("doc"), Some(&texts(&["   indented", "starred"])));
}
