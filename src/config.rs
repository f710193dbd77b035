//! Runtime configuration.
//!
//! Defaults are overridden by environment variables (which `main` may load
//! from a `.env` file) and then by command-line flags.

use std::path::PathBuf;

use crate::interaction_log::DEFAULT_LOG_FILE;
use crate::matcher::MatchMode;

/// Campus documents loaded when no source list is configured.
pub const DEFAULT_SOURCES: [&str; 6] = [
    "2026-spring-shuttle-schedule.pdf",
    "umkc-volker-campus-map.pdf",
    "umkc-health-sciences-campus-map.pdf",
    "2025ccfsr.pdf",
    "visual-identity-guidelines.pdf",
    "2025-2026 University Catalog_Archived 9-10-25.pdf",
];

/// Application configuration shared by the CLI and TUI.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory source names are resolved against
    pub docs_dir: PathBuf,
    /// Interaction log CSV file
    pub log_file: PathBuf,
    /// Scoring variant used by the matcher
    pub match_mode: MatchMode,
    /// Ordered source file names
    pub sources: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("."),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            match_mode: MatchMode::default(),
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Creates configuration from environment variables with fallback defaults.
    ///
    /// # Environment Variables
    ///
    /// - `SMARTCAMPUS_DOCS_DIR` (path, default `.`)
    /// - `SMARTCAMPUS_LOG_FILE` (path, default `logs/product_metrics.csv`)
    /// - `SMARTCAMPUS_MATCH_MODE` (`token-count` | `substring`, default `token-count`)
    /// - `SMARTCAMPUS_SOURCES` (comma-separated file names, default: the campus documents)
    ///
    /// Empty or unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let docs_dir = non_empty_var("SMARTCAMPUS_DOCS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.docs_dir);

        let log_file = non_empty_var("SMARTCAMPUS_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        let match_mode = non_empty_var("SMARTCAMPUS_MATCH_MODE")
            .and_then(|s| MatchMode::parse(&s))
            .unwrap_or(defaults.match_mode);

        let sources = non_empty_var("SMARTCAMPUS_SOURCES")
            .map(|s| parse_source_list(&s))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.sources);

        Self {
            docs_dir,
            log_file,
            match_mode,
            sources,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses a comma-separated source list.
///
/// Splits on commas, trims whitespace from each name, and filters out empty strings.
pub fn parse_source_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
