//! Types for keyword match results.

use crate::models::RecordId;

/// Scoring variants supported by the keyword matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Sum of per-token occurrence counts; keeps the top three records.
    #[default]
    TokenCount,
    /// Whole-query substring test; keeps the first matching record.
    Substring,
}

impl MatchMode {
    /// Parse from string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "token-count" | "token_count" | "count" => Some(Self::TokenCount),
            "substring" => Some(Self::Substring),
            _ => None,
        }
    }

    /// Number of records kept after ranking.
    pub fn default_top_n(self) -> usize {
        match self {
            Self::TokenCount => 3,
            Self::Substring => 1,
        }
    }

    /// Retrieval method label written to the interaction log.
    pub fn label(self) -> &'static str {
        match self {
            Self::TokenCount => "Keyword_Count_v1",
            Self::Substring => "Keyword_Search_v1",
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenCount => write!(f, "token-count"),
            Self::Substring => write!(f, "substring"),
        }
    }
}

/// Result of matching a query against the knowledge base.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Answer text (truncated top record, or the fixed not-found message)
    answer: String,
    /// Identifiers of the retained records, best first
    evidence: Vec<RecordId>,
    /// Heuristic confidence in [0, 1]
    confidence: f64,
    /// Score of the best record (0 when nothing matched)
    top_score: usize,
    /// Scoring variant that produced this result
    mode: MatchMode,
}

impl MatchResult {
    /// Creates a result for a query that matched at least one record.
    pub fn found(
        answer: String,
        evidence: Vec<RecordId>,
        confidence: f64,
        top_score: usize,
        mode: MatchMode,
    ) -> Self {
        Self {
            answer,
            evidence,
            confidence: confidence.clamp(0.0, 1.0),
            top_score,
            mode,
        }
    }

    /// Creates the degraded response for a query with no matching record.
    pub fn not_found(answer: impl Into<String>, confidence: f64, mode: MatchMode) -> Self {
        Self {
            answer: answer.into(),
            evidence: Vec::new(),
            confidence: confidence.clamp(0.0, 1.0),
            top_score: 0,
            mode,
        }
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn evidence(&self) -> &[RecordId] {
        &self.evidence
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn top_score(&self) -> usize {
        self.top_score
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Returns true if no record matched the query.
    pub fn is_not_found(&self) -> bool {
        self.evidence.is_empty()
    }
}
