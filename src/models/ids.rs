use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a knowledge-base record, cited as evidence in answers.
///
/// The identifier doubles as the human-readable citation shown to users:
/// `"<source> (Page <n>)"` for a PDF page and `"<source>"` for a whole
/// plain-text document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates an identifier from an arbitrary string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for one page of a paged source document.
    pub fn for_page(source: &str, page: u32) -> Self {
        Self(format!("{source} (Page {page})"))
    }

    /// Identifier for an unpaged source document.
    pub fn for_document(source: &str) -> Self {
        Self(source.to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
