use pretty_assertions::assert_eq;

use super::*;

// ── Bracketed array values ────────────────────────────────────

#[test]
fn flat_array() {
    let map = extract_fields(
        "static struct tst_test test = { .needs_kconfigs = (const char *[]) {\"CONFIG_A\", \"CONFIG_B\", NULL}, };",
    );
    assert_eq!(map.get("needs_kconfigs"), Some(&texts(&["CONFIG_A", "CONFIG_B"])));
}

#[test]
fn trailing_null_terminator_is_dropped() {
    let map = extract_fields("static struct tst_test test = { .a = { x, NULL, }, };");
    assert_eq!(map.get("a"), Some(&texts(&["x"])));
}

#[test]
fn inner_null_is_kept() {
    let map = extract_fields("static struct tst_test test = { .a = { NULL, x }, };");
    assert_eq!(
        map.get("a"),
        Some(&Node::Array(vec![Node::Null, Node::text("x")]))
    );
}

#[test]
fn nested_arrays() {
    let map = extract_fields(
        "static struct tst_test test = {\n.tags = (const struct tst_tag[]) {\n\t{\"linux-git\", \"abc123\"},\n\t{\"CVE\", \"2020-1\"},\n\t{}\n},\n};",
    );
    assert_eq!(
        map.get("tags"),
        Some(&Node::Array(vec![
            texts(&["linux-git", "abc123"]),
            texts(&["CVE", "2020-1"]),
        ]))
    );
}

#[test]
fn empty_nested_arrays_are_discarded() {
    let map = extract_fields("static struct tst_test test = { .a = { {}, {NULL}, { y } }, };");
    assert_eq!(map.get("a"), Some(&Node::Array(vec![texts(&["y"])])));
}

#[test]
fn adjacent_tokens_are_concatenated() {
    let map = extract_fields(
        "#define PREFIX \"/sys/\"\nstatic struct tst_test test = { .save_restore = { PREFIX \"kernel/x\", B C }, };",
    );
    assert_eq!(map.get("save_restore"), Some(&texts(&["/sys/kernel/x", "BC"])));
}

#[test]
fn operators_join_flag_expressions() {
    let map = extract_fields("static struct tst_test test = { .a = { A | B, C }, };");
    assert_eq!(map.get("a"), Some(&texts(&["A|B", "C"])));
}

#[test]
fn empty_array_value() {
    let map = extract_fields("static struct tst_test test = { .a = {}, .b = 1, };");
    assert_eq!(map.get("a"), Some(&Node::Array(Vec::new())));
    assert_eq!(text(&map, "b"), "1");
}
