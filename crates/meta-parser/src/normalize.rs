//! Post-processing applied to extracted metadata before it is emitted.

use meta_core::{Node, NodeKind};
use tracing::{debug, warn};

use crate::error::ParserError;
use crate::metadata::{FNAME_KEY, TestMetadata};

/// Fields that never carry documentation value: callbacks, buffers and
/// derived counts.
pub const FILTERED_FIELDS: &[&str] = &[
    "bufs",
    "cleanup",
    "mntpoint",
    "setup",
    "tcnt",
    "test",
    "test_all",
];

/// A flag whose presence implies other flags.
#[derive(Debug, Clone, Copy)]
pub struct Implication {
    pub flag: &'static str,
    pub implies: &'static [&'static str],
}

pub const IMPLICATIONS: &[Implication] = &[
    Implication {
        flag: "mount_device",
        implies: &["format_device", "needs_device", "needs_tmpdir"],
    },
    Implication {
        flag: "format_device",
        implies: &["needs_device", "needs_tmpdir"],
    },
    Implication {
        flag: "all_filesystems",
        implies: &["needs_device", "needs_tmpdir"],
    },
    Implication {
        flag: "needs_device",
        implies: &["needs_tmpdir"],
    },
    Implication {
        flag: "needs_checkpoints",
        implies: &["needs_tmpdir"],
    },
    Implication {
        flag: "resource_files",
        implies: &["needs_tmpdir"],
    },
];

/// Fields with a fixed scalar kind.
pub const FIELD_KINDS: &[(&str, NodeKind)] = &[("test_variants", NodeKind::Integer)];

/// Value given to flags inserted by implication.
pub const IMPLIED_PLACEHOLDER: &str = "1";

/// What a normalization pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Noise fields removed.
    pub filtered: Vec<String>,
    /// Author-declared flags that another declared flag already implies.
    pub useless_tags: Vec<String>,
    /// Fields converted to their fixed kind.
    pub coerced: Vec<String>,
    /// Flags inserted by implication.
    pub implied: Vec<String>,
}

impl NormalizeReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
            && self.useless_tags.is_empty()
            && self.coerced.is_empty()
            && self.implied.is_empty()
    }
}

impl TestMetadata {
    /// Normalize the extracted fields in place.
    ///
    /// Removes noise fields, reports redundant flags, converts fields with a
    /// fixed kind, inserts implied flags and finally records the source path
    /// under `fname`. Running it again changes nothing and reports nothing.
    ///
    /// # Errors
    /// Returns `ParserError::Coercion` or `ParserError::KindMismatch` when a
    /// fixed-kind field holds a value that cannot be converted.
    pub fn normalize(&mut self) -> Result<NormalizeReport, ParserError> {
        let mut report = NormalizeReport::default();

        self.filter_fields(&mut report);
        self.report_useless_tags(&mut report);
        self.coerce_kinds(&mut report)?;
        self.insert_implied(&mut report)?;

        self.fields
            .insert(FNAME_KEY, Node::text(self.path.as_str()))?;

        Ok(report)
    }

    fn filter_fields(&mut self, report: &mut NormalizeReport) {
        for name in FILTERED_FIELDS {
            if self.fields.remove(name).is_some() {
                report.filtered.push((*name).to_string());
            }
        }
    }

    /// Must run before any implied flag is inserted, so that only flags the
    /// author wrote are reported.
    fn report_useless_tags(&mut self, report: &mut NormalizeReport) {
        for rule in IMPLICATIONS {
            if !self.fields.contains_key(rule.flag) {
                continue;
            }
            for &implied in rule.implies {
                if !self.fields.contains_key(implied)
                    || self.synthesized.contains(implied)
                    || self.reported.contains(implied)
                {
                    continue;
                }

                warn!(file = %self.path, tag = implied, implied_by = rule.flag, "useless tag");
                self.reported.insert(implied.to_string());
                report.useless_tags.push(implied.to_string());
            }
        }
    }

    fn coerce_kinds(&mut self, report: &mut NormalizeReport) -> Result<(), ParserError> {
        for &(field, expected) in FIELD_KINDS {
            let Some(node) = self.fields.get_mut(field) else {
                continue;
            };

            let found = node.kind();
            if found == expected {
                continue;
            }

            let coerced = match (&*node, expected) {
                (Node::Text(value), NodeKind::Integer) => {
                    let parsed = value.trim_start().parse::<i64>().map_err(|_| {
                        ParserError::Coercion {
                            field: field.to_string(),
                            value: value.clone(),
                            expected,
                        }
                    })?;
                    debug!(field, value = parsed, "normalizing to integer");
                    Node::int(parsed)
                }
                _ => {
                    return Err(ParserError::KindMismatch {
                        field: field.to_string(),
                        found,
                        expected,
                    });
                }
            };
            *node = coerced;
            report.coerced.push(field.to_string());
        }
        Ok(())
    }

    fn insert_implied(&mut self, report: &mut NormalizeReport) -> Result<(), ParserError> {
        for rule in IMPLICATIONS {
            if !self.fields.contains_key(rule.flag) {
                continue;
            }
            for &implied in rule.implies {
                if self.fields.contains_key(implied) {
                    continue;
                }
                debug!(flag = implied, implied_by = rule.flag, "inserting implied flag");
                self.fields.insert(implied, Node::text(IMPLIED_PLACEHOLDER))?;
                self.synthesized.insert(implied.to_string());
                report.implied.push(implied.to_string());
            }
        }
        Ok(())
    }
}
