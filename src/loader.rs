//! Document loading.
//!
//! Reads the configured source documents once, splits PDFs into one record
//! per page and keeps the resulting records in load order.

mod document_loader;
mod extractor;

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Record;

pub use document_loader::{
    DocumentLoader, DocumentLoaderBuilder, LoadOutcome, SourceReport, SourceStatus,
};
pub use extractor::{ExtractedPage, LopdfExtractor, PageExtractor};

/// Errors that can occur while reading a single source document.
///
/// These never abort loading; the source is skipped and the error is kept
/// in its `SourceReport`.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a readable PDF
    #[error("Failed to parse PDF {}: {source}", .path.display())]
    Pdf {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// The file extension is not a supported source format
    #[error("Unsupported source format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Immutable, ordered collection of records loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    records: Vec<Record>,
}

impl KnowledgeBase {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Records in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for KnowledgeBase {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}
