use meta_core::{Map, Node, write_fragment, write_json};
use meta_parser::TestMetadata;

use crate::cli::OutputFormat;

/// Render extracted metadata in the requested format.
pub fn render(metadata: &TestMetadata, format: OutputFormat, indent: usize) -> anyhow::Result<String> {
    let node = metadata.clone().into_node();
    match format {
        OutputFormat::Fragment => {
            let mut buf = Vec::new();
            write_fragment(&mut buf, metadata.name(), &node, indent)?;
            Ok(String::from_utf8(buf)?)
        }
        OutputFormat::Json => {
            let mut root = Map::new();
            root.insert(metadata.name(), node)?;
            let mut buf = Vec::new();
            write_json(&Node::Map(root), &mut buf, 0)?;
            buf.push(b'\n');
            Ok(String::from_utf8(buf)?)
        }
    }
}
