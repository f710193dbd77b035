//! Keyword matching over the in-memory knowledge base.

use crate::models::Record;
use crate::utils::truncate_chars;

use super::types::{MatchMode, MatchResult};

/// Answer returned when no record matches the query.
pub const NOT_FOUND_ANSWER: &str =
    "I couldn't find specific information in the current campus documents.";

/// Confidence reported when no record matches.
pub const NOT_FOUND_CONFIDENCE: f64 = 0.2;

/// Maximum number of characters of record text returned as the answer.
pub const DEFAULT_ANSWER_BUDGET: usize = 1000;

/// Token-count scores above this value use the high confidence bucket.
const STRONG_SCORE_THRESHOLD: usize = 2;
const STRONG_CONFIDENCE: f64 = 0.9;
const WEAK_CONFIDENCE: f64 = 0.6;
const SUBSTRING_CONFIDENCE: f64 = 0.95;

/// Maps a top score onto the fixed confidence buckets of a mode.
///
/// Non-decreasing in `top_score` for every mode.
pub fn confidence_for(mode: MatchMode, top_score: usize) -> f64 {
    match (mode, top_score) {
        (_, 0) => NOT_FOUND_CONFIDENCE,
        (MatchMode::TokenCount, s) if s > STRONG_SCORE_THRESHOLD => STRONG_CONFIDENCE,
        (MatchMode::TokenCount, _) => WEAK_CONFIDENCE,
        (MatchMode::Substring, _) => SUBSTRING_CONFIDENCE,
    }
}

/// Builder for constructing `KeywordMatcher` instances.
#[derive(Debug, Default)]
pub struct KeywordMatcherBuilder {
    mode: Option<MatchMode>,
    top_n: Option<usize>,
    answer_budget: Option<usize>,
}

impl KeywordMatcherBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scoring variant.
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Overrides how many records are kept as evidence.
    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n.max(1));
        self
    }

    /// Overrides the answer length in characters.
    pub fn answer_budget(mut self, budget: usize) -> Self {
        self.answer_budget = Some(budget);
        self
    }

    /// Builds the `KeywordMatcher`, falling back to the mode's defaults.
    #[must_use]
    pub fn build(self) -> KeywordMatcher {
        let mode = self.mode.unwrap_or_default();
        KeywordMatcher {
            mode,
            top_n: self.top_n.unwrap_or_else(|| mode.default_top_n()),
            answer_budget: self.answer_budget.unwrap_or(DEFAULT_ANSWER_BUDGET),
        }
    }
}

/// Answers queries by counting keyword occurrences in every record.
///
/// Matching is a pure function of the query and the record slice: the same
/// inputs always produce the same answer, evidence and confidence. Records
/// with equal scores keep their load order, so the first-loaded record wins
/// a tie.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    mode: MatchMode,
    top_n: usize,
    answer_budget: usize,
}

impl KeywordMatcher {
    /// Creates a matcher with the default settings for `mode`.
    #[must_use]
    pub fn new(mode: MatchMode) -> Self {
        KeywordMatcherBuilder::new().mode(mode).build()
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Scores every record against `query` and returns the best answer.
    ///
    /// # Examples
    ///
    /// ```
    /// use smartcampus::{KeywordMatcher, MatchMode, Record};
    ///
    /// let records = vec![Record::from_page("shuttle.pdf", 1, "The shuttle schedule begins at 6am")];
    /// let matcher = KeywordMatcher::new(MatchMode::TokenCount);
    ///
    /// let result = matcher.match_query(&records, "shuttle");
    /// assert_eq!(result.evidence()[0].as_str(), "shuttle.pdf (Page 1)");
    /// assert_eq!(result.confidence(), 0.6);
    /// ```
    pub fn match_query(&self, records: &[Record], query: &str) -> MatchResult {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.not_found();
        }
        let tokens: Vec<&str> = needle.split_whitespace().collect();

        let mut ranked: Vec<(usize, &Record)> = records
            .iter()
            .map(|record| (self.score(record, &needle, &tokens), record))
            .filter(|(score, _)| *score > 0)
            .collect();

        // sort_by is stable: equal scores keep load order
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.truncate(self.top_n);

        let Some(&(top_score, best)) = ranked.first() else {
            return self.not_found();
        };

        let evidence = ranked.iter().map(|(_, record)| record.id().clone()).collect();

        MatchResult::found(
            truncate_chars(best.text(), self.answer_budget),
            evidence,
            confidence_for(self.mode, top_score),
            top_score,
            self.mode,
        )
    }

    /// Relevance of one record for an already-lowercased query.
    fn score(&self, record: &Record, needle: &str, tokens: &[&str]) -> usize {
        let haystack = record.folded_text();
        match self.mode {
            MatchMode::TokenCount => tokens
                .iter()
                .map(|token| haystack.matches(token).count())
                .sum(),
            MatchMode::Substring => usize::from(haystack.contains(needle)),
        }
    }

    fn not_found(&self) -> MatchResult {
        MatchResult::not_found(NOT_FOUND_ANSWER, NOT_FOUND_CONFIDENCE, self.mode)
    }
}
