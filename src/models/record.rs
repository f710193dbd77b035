use super::RecordId;

/// One page (or whole document) of extracted text with its source identity.
///
/// Records are created once at load time and never mutated. The lowercased
/// text is folded eagerly so every query scan works on the same copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    text: String,
    folded: String,
    source: String,
    page: Option<u32>,
}

impl Record {
    /// Creates a record for a single page of a paged document.
    ///
    /// # Examples
    ///
    /// ```
    /// use smartcampus::Record;
    ///
    /// let record = Record::from_page("shuttle.pdf", 2, "Route A departs at 7am");
    /// assert_eq!(record.id().as_str(), "shuttle.pdf (Page 2)");
    /// assert_eq!(record.page(), Some(2));
    /// ```
    pub fn from_page(source: impl Into<String>, page: u32, text: impl Into<String>) -> Self {
        let source = source.into();
        Self::build(RecordId::for_page(&source, page), source, Some(page), text.into())
    }

    /// Creates a record covering a whole unpaged document.
    pub fn from_document(source: impl Into<String>, text: impl Into<String>) -> Self {
        let source = source.into();
        Self::build(RecordId::for_document(&source), source, None, text.into())
    }

    fn build(id: RecordId, source: String, page: Option<u32>, text: String) -> Self {
        let folded = text.to_lowercase();
        Self {
            id,
            text,
            folded,
            source,
            page,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns the original extracted text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the lowercased text used for matching.
    pub fn folded_text(&self) -> &str {
        &self.folded
    }

    /// Returns the source document file name.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the 1-based page number, if the source is paged.
    pub fn page(&self) -> Option<u32> {
        self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folded_text_is_lowercase_copy() {
        let record = Record::from_page("catalog.pdf", 10, "Computer SCIENCE Courses");
        assert_eq!(record.text(), "Computer SCIENCE Courses");
        assert_eq!(record.folded_text(), "computer science courses");
    }

    #[test]
    fn document_record_has_no_page() {
        let record = Record::from_document("faq.txt", "Parking permits are sold online");
        assert_eq!(record.page(), None);
        assert_eq!(record.source(), "faq.txt");
        assert_eq!(record.id().as_str(), "faq.txt");
    }
}
