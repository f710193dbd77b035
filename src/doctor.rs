//! Health check utilities for smartcampus.
//!
//! Provides the `doctor` command functionality:
//! - Documents directory and per-source availability
//! - Knowledge base size and matching settings
//! - Interaction log writability, readability and dashboard statistics

use std::path::Path;

use crate::interaction_log::{InteractionLog, LogSummary};
use crate::loader::{SourceReport, SourceStatus};
use crate::matcher::{KeywordMatcher, MatchMode};
use crate::service::AssistantService;

// ANSI color codes for terminal output
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Health status for a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Component is healthy
    Ok,
    /// Component has a warning but is functional
    Warning(String),
    /// Component is not functional
    Error(String),
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, HealthStatus::Ok)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, HealthStatus::Error(_))
    }
}

/// Documents directory and knowledge base information.
#[derive(Debug)]
pub struct DocumentsHealth {
    pub status: HealthStatus,
    pub docs_dir: String,
    pub total_records: usize,
    pub sources: Vec<SourceReport>,
}

/// Interaction log information.
#[derive(Debug)]
pub struct LogHealth {
    pub status: HealthStatus,
    pub file_path: String,
    pub summary: Option<LogSummary>,
}

/// Matching settings in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherInfo {
    pub mode: MatchMode,
    pub top_n: usize,
}

impl From<&KeywordMatcher> for MatcherInfo {
    fn from(matcher: &KeywordMatcher) -> Self {
        Self {
            mode: matcher.mode(),
            top_n: matcher.top_n(),
        }
    }
}

/// Complete doctor report.
#[derive(Debug)]
pub struct HealthReport {
    pub documents: DocumentsHealth,
    pub matcher: MatcherInfo,
    pub log: LogHealth,
}

impl HealthReport {
    /// Returns true if any component is not functional.
    pub fn has_errors(&self) -> bool {
        self.documents.status.is_error() || self.log.status.is_error()
    }
}

// ============================================================================
// Health Check Functions
// ============================================================================

/// Performs all health checks and prints results.
pub fn run_health_checks(docs_dir: &Path, service: &AssistantService) -> HealthReport {
    let report = collect_health(docs_dir, service);
    print_health_report(&report);
    report
}

/// Performs all health checks without printing.
pub fn collect_health(docs_dir: &Path, service: &AssistantService) -> HealthReport {
    HealthReport {
        documents: check_documents_health(
            docs_dir,
            service.load_report(),
            service.knowledge_base().len(),
        ),
        matcher: MatcherInfo::from(service.matcher()),
        log: check_log_health(service.log()),
    }
}

fn check_documents_health(
    docs_dir: &Path,
    sources: &[SourceReport],
    total_records: usize,
) -> DocumentsHealth {
    let status = if !docs_dir.is_dir() {
        HealthStatus::Error("Documents directory does not exist".to_string())
    } else if total_records == 0 {
        HealthStatus::Warning("No records loaded; every query will be answered as not found".to_string())
    } else if sources.iter().any(|s| !s.is_loaded()) {
        let skipped = sources.iter().filter(|s| !s.is_loaded()).count();
        HealthStatus::Warning(format!("{skipped} source(s) skipped"))
    } else {
        HealthStatus::Ok
    };

    DocumentsHealth {
        status,
        docs_dir: docs_dir.display().to_string(),
        total_records,
        sources: sources.to_vec(),
    }
}

fn check_log_health(log: &InteractionLog) -> LogHealth {
    let file_path = log.path().display().to_string();

    if let Err(e) = log.check_writable() {
        return LogHealth {
            status: HealthStatus::Error(format!("Not writable: {e}")),
            file_path,
            summary: None,
        };
    }

    match log.summary() {
        Ok(summary) if summary.total_queries == 0 => LogHealth {
            status: HealthStatus::Warning("No queries logged yet".to_string()),
            file_path,
            summary: Some(summary),
        },
        Ok(summary) => LogHealth {
            status: HealthStatus::Ok,
            file_path,
            summary: Some(summary),
        },
        Err(e) => LogHealth {
            status: HealthStatus::Error(format!("Unreadable: {e}")),
            file_path,
            summary: None,
        },
    }
}

// ============================================================================
// Pretty Printing
// ============================================================================

fn status_symbol(status: &HealthStatus) -> &'static str {
    match status {
        HealthStatus::Ok => "\u{2713}",
        HealthStatus::Warning(_) => "!",
        HealthStatus::Error(_) => "\u{2717}",
    }
}

fn status_color(status: &HealthStatus) -> &'static str {
    match status {
        HealthStatus::Ok => GREEN,
        HealthStatus::Warning(_) => YELLOW,
        HealthStatus::Error(_) => RED,
    }
}

fn status_text(status: &HealthStatus, ok_text: &str) -> String {
    match status {
        HealthStatus::Ok => ok_text.to_string(),
        HealthStatus::Warning(w) => w.clone(),
        HealthStatus::Error(e) => e.clone(),
    }
}

fn print_health_report(report: &HealthReport) {
    let docs = &report.documents;
    let log = &report.log;
    let matcher = &report.matcher;

    println!("{}smartcampus doctor{}", BOLD, RESET);
    println!();

    // Documents section
    println!("{}Documents{}", BOLD, RESET);
    println!(
        "  {}{}{} Status: {}",
        status_color(&docs.status),
        status_symbol(&docs.status),
        RESET,
        status_text(&docs.status, "All sources loaded")
    );
    println!("    {}Directory: {}{}", DIM, docs.docs_dir, RESET);
    for source in &docs.sources {
        let (color, detail) = match &source.status {
            SourceStatus::Loaded { records } => (GREEN, format!("{records} record(s)")),
            SourceStatus::Missing => (YELLOW, "missing".to_string()),
            SourceStatus::Failed(e) => (RED, e.clone()),
        };
        println!("    {}-{} {} {}({}){}", color, RESET, source.source, DIM, detail, RESET);
    }
    println!("  Records:    {:>6}", docs.total_records);
    println!();

    println!("{}Matching{}", BOLD, RESET);
    println!("  Mode:       {}", matcher.mode);
    println!("  Evidence:   top {}", matcher.top_n);
    println!();

    // Interaction log section
    println!("{}Interaction log{}", BOLD, RESET);
    println!(
        "  {}{}{} Status: {}",
        status_color(&log.status),
        status_symbol(&log.status),
        RESET,
        status_text(&log.status, "Readable and writable")
    );
    println!("    {}Path: {}{}", DIM, log.file_path, RESET);
    if let Some(summary) = &log.summary {
        print_summary(summary);
    }
}

/// Prints the dashboard metrics block shared by `doctor` and `stats`.
pub fn print_summary(summary: &LogSummary) {
    println!("  Queries:     {:>8}", summary.total_queries);
    match summary.avg_latency_ms {
        Some(avg) => println!("  Avg latency: {:>6.0}ms", avg),
        None => println!("  Avg latency: {:>8}", "-"),
    }
    match summary.faithfulness_rate {
        Some(rate) => println!("  Faithfulness:{:>7.0}%", rate * 100.0),
        None => println!("  Faithfulness:{:>8}", "-"),
    }
}
