use super::*;

mod array_values;
mod doc_comments;

fn extract(source: &str) -> Option<Map> {
    extract_source(source.as_bytes(), Path::new("test.c"), &ParseOptions::default())
        .expect("extraction should succeed")
}

fn extract_fields(source: &str) -> Map {
    extract(source).expect("source should contain metadata")
}

fn text(map: &Map, key: &str) -> String {
    match map.get(key) {
        Some(Node::Text(value)) => value.clone(),
        other => panic!("field {key:?} is not text: {other:?}"),
    }
}

fn texts(items: &[&str]) -> Node {
    Node::Array(items.iter().map(|s| Node::text(*s)).collect())
}
