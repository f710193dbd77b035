use std::time::Instant;

use anyhow::{Context, Result};
use time::OffsetDateTime;

use crate::config::AppConfig;
use crate::interaction_log::{InteractionLog, LogSummary};
use crate::loader::{DocumentLoaderBuilder, KnowledgeBase, SourceReport};
use crate::matcher::{KeywordMatcher, MatchResult};
use crate::models::InteractionLogEntry;

/// Task type recorded for every campus question.
pub const TASK_TYPE: &str = "campus_query";

/// Outcome of one answered query.
#[derive(Debug, Clone)]
pub struct AskOutcome {
    /// Answer, evidence and confidence returned by the matcher
    pub result: MatchResult,
    /// The row appended to the interaction log
    pub entry: InteractionLogEntry,
}

impl AskOutcome {
    /// Measured matching latency, rounded as logged.
    pub fn latency_ms(&self) -> f64 {
        self.entry.latency_ms
    }
}

/// Service layer answering campus questions.
///
/// AssistantService owns the knowledge base (loaded once, read-only
/// afterwards), the matcher and the interaction log. It is UI-independent
/// and used by both the CLI and the TUI.
///
/// # Examples
///
/// ```
/// use smartcampus::{AssistantService, InteractionLog, KeywordMatcher, MatchMode, Record};
///
/// # fn main() -> anyhow::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let service = AssistantService::new(
///     vec![Record::from_page("shuttle.pdf", 1, "The shuttle schedule begins at 6am")].into(),
///     KeywordMatcher::new(MatchMode::TokenCount),
///     InteractionLog::new(dir.path().join("metrics.csv")),
/// );
///
/// let outcome = service.ask("shuttle")?;
/// assert_eq!(outcome.result.confidence(), 0.6);
/// # Ok(())
/// # }
/// ```
pub struct AssistantService {
    knowledge: KnowledgeBase,
    matcher: KeywordMatcher,
    log: InteractionLog,
    load_report: Vec<SourceReport>,
}

impl AssistantService {
    /// Creates a service over an already-loaded knowledge base.
    pub fn new(knowledge: KnowledgeBase, matcher: KeywordMatcher, log: InteractionLog) -> Self {
        Self {
            knowledge,
            matcher,
            log,
            load_report: Vec::new(),
        }
    }

    /// Loads the configured sources and wires up matcher and log.
    ///
    /// Loading skips missing or unreadable sources, so this never fails; the
    /// per-source outcome is available from `load_report()`.
    pub fn from_config(config: &AppConfig) -> Self {
        let outcome = DocumentLoaderBuilder::new()
            .docs_dir(&config.docs_dir)
            .sources(config.sources.iter().cloned())
            .build()
            .load();

        Self {
            knowledge: outcome.knowledge_base,
            matcher: KeywordMatcher::new(config.match_mode),
            log: InteractionLog::new(&config.log_file),
            load_report: outcome.report,
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    pub fn log(&self) -> &InteractionLog {
        &self.log
    }

    /// Per-source report from `from_config` (empty for `new`).
    pub fn load_report(&self) -> &[SourceReport] {
        &self.load_report
    }

    /// Answers `query` and appends exactly one row to the interaction log.
    ///
    /// Latency covers the match only. A query with no matching record is
    /// not an error: it yields the degraded not-found answer and is logged
    /// like any other query.
    ///
    /// # Errors
    ///
    /// Returns an error if the log row cannot be written.
    pub fn ask(&self, query: &str) -> Result<AskOutcome> {
        let started = Instant::now();
        let result = self.matcher.match_query(self.knowledge.records(), query);
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        let entry = InteractionLogEntry::new(
            OffsetDateTime::now_utc(),
            TASK_TYPE,
            self.matcher.mode().label(),
            latency_ms,
            result.evidence().to_vec(),
            result.confidence(),
        );

        self.log
            .append(&entry)
            .context("Failed to record interaction")?;

        tracing::info!(
            query = %query,
            confidence = result.confidence(),
            evidence = result.evidence().len(),
            latency_ms = entry.latency_ms,
            "answered query"
        );

        Ok(AskOutcome { result, entry })
    }

    /// Returns the last `n` logged interactions, oldest first.
    pub fn recent_interactions(&self, n: usize) -> Result<Vec<InteractionLogEntry>> {
        self.log
            .tail(n)
            .context("Failed to read interaction log")
    }

    /// Computes dashboard metrics over the interaction log.
    pub fn summary(&self) -> Result<LogSummary> {
        self.log
            .summary()
            .context("Failed to read interaction log")
    }
}
