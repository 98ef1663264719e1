//! # meta-parser
//!
//! Extraction of test metadata from C test sources.
//!
//! A source file is scanned once. `#define` lines (including those of the
//! headers it includes, up to a bounded depth) feed a macro table, special
//! `/*\` doc comments are captured line by line, and the initializer of
//! `static struct tst_test test = { ... }` is parsed into a map of fields.
//! `ARRAY_SIZE(id)` values are resolved by counting the elements of the array
//! `id` declared in the same file or in an included header.
//!
//! [`describe_file`] runs the whole pipeline, including normalization (noise
//! filtering, implied flags and type coercion).

pub mod array_size;
pub mod error;
pub mod extract;
pub mod include;
pub mod macros;
pub mod metadata;
pub mod normalize;
pub mod options;
pub mod scanner;

use std::path::Path;

use tracing::warn;

pub use error::ParserError;
pub use extract::{extract_file, extract_source};
pub use macros::MacroTable;
pub use metadata::TestMetadata;
pub use normalize::NormalizeReport;
pub use options::ParseOptions;

/// Extract and normalize the metadata of the test source at `path`.
///
/// Returns `Ok(None)` when there is nothing to report: the file does not
/// exist, it has neither a doc comment nor a test struct, or an `ARRAY_SIZE`
/// value could not be resolved (logged as a warning).
///
/// # Errors
/// Returns `ParserError` on read failures and on fields whose value cannot be
/// converted to their fixed kind.
pub fn describe_file(
    path: &Path,
    options: &ParseOptions,
) -> Result<Option<TestMetadata>, ParserError> {
    let fields = match extract_file(path, options) {
        Ok(Some(fields)) => fields,
        Ok(None) => return Ok(None),
        Err(error) if error.is_recoverable() => {
            warn!(file = %path.display(), %error, "no metadata extracted");
            return Ok(None);
        }
        Err(error) => return Err(error),
    };

    let mut metadata = TestMetadata::new(path.display().to_string(), fields);
    metadata.normalize()?;
    Ok(Some(metadata))
}
