//! # meta-core
//!
//! Generic data tree for extracted test metadata.
//!
//! A [`Node`] is one of array, map, text, integer, boolean or null. Maps keep
//! insertion order, which is also the order fields are emitted in. The
//! [`json`] module renders a tree through `serde_json` with the fixed
//! indentation layout expected by the catalog tooling that concatenates
//! per-file fragments.

pub mod errors;
pub mod json;
pub mod node;

pub use errors::TreeError;
pub use json::{CatalogFormatter, to_json_string, write_fragment, write_json};
pub use node::{Map, Node, NodeKind};
