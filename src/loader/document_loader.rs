//! Loads the fixed source list into an in-memory knowledge base.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::Record;

use super::extractor::{LopdfExtractor, PageExtractor};
use super::{KnowledgeBase, LoadError};

/// What happened to one configured source during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    /// The file was read and produced this many records
    Loaded { records: usize },
    /// The file does not exist and was skipped
    Missing,
    /// The file exists but could not be read
    Failed(String),
}

/// Per-source load report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source: String,
    pub path: PathBuf,
    pub status: SourceStatus,
}

impl SourceReport {
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, SourceStatus::Loaded { .. })
    }
}

/// Knowledge base plus the per-source report produced while loading it.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub knowledge_base: KnowledgeBase,
    pub report: Vec<SourceReport>,
}

/// Kind of source file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Pdf,
    PlainText,
}

impl SourceKind {
    fn of(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "md" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Builder for constructing `DocumentLoader` instances.
#[derive(Default)]
pub struct DocumentLoaderBuilder {
    docs_dir: Option<PathBuf>,
    sources: Vec<String>,
    extractor: Option<Arc<dyn PageExtractor>>,
}

impl DocumentLoaderBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory source names are resolved against.
    pub fn docs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.docs_dir = Some(dir.into());
        self
    }

    /// Sets the ordered list of source file names.
    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the PDF page extractor.
    pub fn extractor(mut self, extractor: Arc<dyn PageExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Builds the loader. Defaults to the current directory and `lopdf`.
    #[must_use]
    pub fn build(self) -> DocumentLoader {
        DocumentLoader {
            docs_dir: self.docs_dir.unwrap_or_else(|| PathBuf::from(".")),
            sources: self.sources,
            extractor: self
                .extractor
                .unwrap_or_else(|| Arc::new(LopdfExtractor)),
        }
    }
}

/// Reads a fixed list of source documents into records.
///
/// Loading never fails as a whole: missing files, unreadable files and
/// empty pages are skipped, and the outcome is recorded in the report.
pub struct DocumentLoader {
    docs_dir: PathBuf,
    sources: Vec<String>,
    extractor: Arc<dyn PageExtractor>,
}

impl DocumentLoader {
    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Loads every configured source in list order.
    ///
    /// Records keep source-list order, then page order; matching relies on
    /// this order to break score ties.
    pub fn load(&self) -> LoadOutcome {
        let mut records = Vec::new();
        let mut report = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let path = self.docs_dir.join(source);
            let status = if !path.is_file() {
                tracing::debug!(path = %path.display(), "source not found, skipping");
                SourceStatus::Missing
            } else {
                match self.load_source(source, &path) {
                    Ok(loaded) => {
                        let count = loaded.len();
                        records.extend(loaded);
                        tracing::debug!(source = %source, records = count, "loaded source");
                        SourceStatus::Loaded { records: count }
                    }
                    Err(e) => {
                        tracing::warn!(source = %source, error = %e, "skipping unreadable source");
                        SourceStatus::Failed(e.to_string())
                    }
                }
            };

            report.push(SourceReport {
                source: source.clone(),
                path,
                status,
            });
        }

        tracing::info!(
            records = records.len(),
            sources = report.iter().filter(|r| r.is_loaded()).count(),
            "knowledge base loaded"
        );

        LoadOutcome {
            knowledge_base: KnowledgeBase::new(records),
            report,
        }
    }

    fn load_source(&self, source: &str, path: &Path) -> Result<Vec<Record>, LoadError> {
        match SourceKind::of(path) {
            Some(SourceKind::Pdf) => Ok(self
                .extractor
                .extract_pages(path)?
                .into_iter()
                .filter_map(|page| {
                    let text = page.text?;
                    let text = text.trim();
                    (!text.is_empty()).then(|| Record::from_page(source, page.number, text))
                })
                .collect()),
            Some(SourceKind::PlainText) => {
                let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })?;
                let text = text.trim();
                if text.is_empty() {
                    Ok(Vec::new())
                } else {
                    Ok(vec![Record::from_document(source, text)])
                }
            }
            None => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}
