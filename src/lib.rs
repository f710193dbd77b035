pub mod config;
pub mod doctor;
pub mod interaction_log;
pub mod loader;
pub mod matcher;
pub mod models;
pub mod service;
pub mod tui;
pub mod utils;

pub use config::AppConfig;
pub use interaction_log::{InteractionLog, LogError, LogSummary};
pub use loader::{DocumentLoader, DocumentLoaderBuilder, KnowledgeBase, LoadError};
pub use matcher::{KeywordMatcher, KeywordMatcherBuilder, MatchMode, MatchResult};
pub use models::{InteractionLogEntry, Record, RecordId, Verdict};
pub use service::{AskOutcome, AssistantService};
