//! Query answering by keyword matching.
//!
//! This module provides the `KeywordMatcher` struct which scores every
//! knowledge-base record against a query and returns the best answer with
//! its evidence identifiers and a bucketed confidence.

mod keyword_matcher;
mod types;

pub use keyword_matcher::{
    DEFAULT_ANSWER_BUDGET, KeywordMatcher, KeywordMatcherBuilder, NOT_FOUND_ANSWER,
    NOT_FOUND_CONFIDENCE, confidence_for,
};
pub use types::{MatchMode, MatchResult};
