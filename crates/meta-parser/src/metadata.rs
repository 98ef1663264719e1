use std::collections::BTreeSet;
use std::path::Path;

use meta_core::{Map, Node};

/// Key the source path is stored under.
pub const FNAME_KEY: &str = "fname";

/// Metadata extracted from one test source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestMetadata {
    pub(crate) path: String,
    pub(crate) fields: Map,
    /// Flags inserted by implication expansion rather than by the author.
    pub(crate) synthesized: BTreeSet<String>,
    /// Redundant author flags already reported.
    pub(crate) reported: BTreeSet<String>,
}

impl TestMetadata {
    /// Wrap the raw field map extracted from `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, fields: Map) -> Self {
        Self {
            path: path.into(),
            fields,
            synthesized: BTreeSet::new(),
            reported: BTreeSet::new(),
        }
    }

    /// Fragment name: the file name without its extension.
    #[must_use]
    pub fn name(&self) -> &str {
        let path = Path::new(&self.path);
        path.file_stem()
            .or_else(|| path.file_name())
            .and_then(|name| name.to_str())
            .unwrap_or(&self.path)
    }

    /// Path exactly as given on input.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn fields(&self) -> &Map {
        &self.fields
    }

    /// Flags added by [`TestMetadata::normalize`], in name order.
    pub fn synthesized(&self) -> impl Iterator<Item = &str> {
        self.synthesized.iter().map(String::as_str)
    }

    /// Consume into the root map node for emission.
    #[must_use]
    pub fn into_node(self) -> Node {
        Node::Map(self.fields)
    }
}
