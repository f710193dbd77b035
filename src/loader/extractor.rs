//! Page text extraction.
//!
//! `PageExtractor` is the seam between the loader and the PDF library, so
//! loader tests can supply pages without real PDF files.

use std::path::Path;

use super::LoadError;

/// Text of one page, or `None` if the page could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// 1-based page number
    pub number: u32,
    pub text: Option<String>,
}

/// Extracts per-page text from a paged document.
pub trait PageExtractor: Send + Sync {
    /// Returns every page of the document in page order.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the document as a whole cannot be opened.
    /// Individual unreadable pages are reported as `text: None`.
    fn extract_pages(&self, path: &Path) -> Result<Vec<ExtractedPage>, LoadError>;
}

/// `PageExtractor` backed by `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl PageExtractor for LopdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<ExtractedPage>, LoadError> {
        let document = lopdf::Document::load(path).map_err(|source| LoadError::Pdf {
            path: path.to_path_buf(),
            source,
        })?;

        let pages = document
            .get_pages()
            .keys()
            .map(|&number| {
                let text = match document.extract_text(&[number]) {
                    Ok(text) => Some(text),
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            page = number,
                            error = %e,
                            "skipping unreadable page"
                        );
                        None
                    }
                };
                ExtractedPage { number, text }
            })
            .collect();

        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn invalid_pdf_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let result = LopdfExtractor.extract_pages(&path);
        assert!(matches!(result, Err(LoadError::Pdf { .. })));
    }
}
