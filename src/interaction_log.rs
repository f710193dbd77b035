//! Append-only CSV log of answered queries.
//!
//! The log backs the reporting dashboard: every query appends exactly one
//! row, rows are never rewritten, and the header is written once when the
//! file is created.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::InteractionLogEntry;

/// Default location of the interaction log, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "logs/product_metrics.csv";

/// Errors that can occur while reading or appending to the interaction log.
#[derive(Debug, Error)]
pub enum LogError {
    /// The log file or its directory could not be accessed
    #[error("Failed to access log file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be encoded or decoded
    #[error("Malformed log data: {0}")]
    Csv(#[from] csv::Error),
}

/// Dashboard metrics computed over the whole log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSummary {
    /// Number of logged queries
    pub total_queries: usize,
    /// Mean latency in milliseconds (None when the log is empty)
    pub avg_latency_ms: Option<f64>,
    /// Fraction of rows marked PASS (None when the log is empty)
    pub faithfulness_rate: Option<f64>,
}

impl LogSummary {
    fn from_entries(entries: &[InteractionLogEntry]) -> Self {
        if entries.is_empty() {
            return Self {
                total_queries: 0,
                avg_latency_ms: None,
                faithfulness_rate: None,
            };
        }

        let total = entries.len() as f64;
        let latency_sum: f64 = entries.iter().map(|e| e.latency_ms).sum();
        let passes = entries.iter().filter(|e| e.verdict.is_pass()).count() as f64;

        Self {
            total_queries: entries.len(),
            avg_latency_ms: Some(latency_sum / total),
            faithfulness_rate: Some(passes / total),
        }
    }
}

/// Handle on the interaction log file.
///
/// The file is opened per operation, so the handle holds no OS resources.
#[derive(Debug, Clone)]
pub struct InteractionLog {
    path: PathBuf,
}

impl InteractionLog {
    /// Creates a handle for the log at `path`. The file is created lazily on
    /// the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the log file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Appends one row, writing the header first if the file is new.
    ///
    /// The row (and header, for a new file) is encoded in memory and handed
    /// to the OS in a single append write.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Io` if the directory or file cannot be written and
    /// `LogError::Csv` if the entry cannot be encoded.
    pub fn append(&self, entry: &InteractionLogEntry) -> Result<(), LogError> {
        let write_header = std::fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let mut encoder = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(Vec::new());
        encoder.serialize(entry)?;
        let buffer = encoder
            .into_inner()
            .map_err(|e| self.io_error(e.into_error()))?;

        let mut file = self.open_for_append()?;
        file.write_all(&buffer)
            .map_err(|source| self.io_error(source))?;

        tracing::debug!(
            path = %self.path.display(),
            confidence = entry.confidence,
            verdict = %entry.verdict,
            "appended interaction"
        );

        Ok(())
    }

    /// Reads every row in file order. A missing file reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read_all(&self) -> Result<Vec<InteractionLogEntry>, LogError> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let entries = reader
            .deserialize()
            .collect::<Result<Vec<InteractionLogEntry>, csv::Error>>()?;
        Ok(entries)
    }

    /// Returns the last `n` rows, oldest first.
    pub fn tail(&self, n: usize) -> Result<Vec<InteractionLogEntry>, LogError> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(n);
        entries.drain(..skip);
        Ok(entries)
    }

    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> Result<usize, LogError> {
        Ok(self.read_all()?.len())
    }

    /// Computes the dashboard metrics over the whole log.
    pub fn summary(&self) -> Result<LogSummary, LogError> {
        Ok(LogSummary::from_entries(&self.read_all()?))
    }

    /// Verifies that a row could be appended, without writing anything.
    ///
    /// Creates the parent directory and an empty file if they are missing.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Io` if the directory or file cannot be opened for
    /// appending.
    pub fn check_writable(&self) -> Result<(), LogError> {
        self.open_for_append().map(|_| ())
    }

    fn open_for_append(&self) -> Result<File, LogError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> LogError {
        LogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordId, Verdict};
    use tempfile::tempdir;
    use time::OffsetDateTime;

    fn entry(latency_ms: f64, confidence: f64, evidence: &[&str]) -> InteractionLogEntry {
        InteractionLogEntry::new(
            OffsetDateTime::now_utc(),
            "campus_query",
            "Keyword_Count_v1",
            latency_ms,
            evidence.iter().map(|id| RecordId::new(*id)).collect(),
            confidence,
        )
    }

    #[test]
    fn missing_log_reads_as_empty() {
        let dir = tempdir().unwrap();
        let log = InteractionLog::new(dir.path().join("absent.csv"));

        assert!(!log.exists());
        assert!(log.read_all().unwrap().is_empty());
        assert_eq!(log.row_count().unwrap(), 0);
    }

    #[test]
    fn first_append_creates_directory_and_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("product_metrics.csv");
        let log = InteractionLog::new(&path);

        log.append(&entry(1.5, 0.9, &["map.pdf (Page 1)"])).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,user_task_type,retrieval_conf,latency_ms,evidence_ids,confidence,faithfulness_indicator")
        );
        assert!(lines.next().is_some());
        assert!(lines.next().is_none());
    }

    #[test]
    fn check_writable_creates_empty_log() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("metrics.csv");
        let log = InteractionLog::new(&path);

        log.check_writable().unwrap();

        assert!(log.exists());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);

        // the first real append still writes the header
        log.append(&entry(1.0, 0.6, &[])).unwrap();
        assert_eq!(log.row_count().unwrap(), 1);
    }

    #[test]
    fn check_writable_fails_when_parent_is_a_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("logs"), "not a directory").unwrap();
        let log = InteractionLog::new(dir.path().join("logs").join("metrics.csv"));

        let result = log.check_writable();
        assert!(matches!(result, Err(LogError::Io { .. })));
        assert!(log.append(&entry(1.0, 0.6, &[])).is_err());
    }

    #[test]
    fn header_is_written_only_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metrics.csv");
        let log = InteractionLog::new(&path);

        for _ in 0..3 {
            log.append(&entry(2.0, 0.6, &[])).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let header_count = contents
            .lines()
            .filter(|line| line.starts_with("timestamp,"))
            .count();
        assert_eq!(header_count, 1);
        assert_eq!(contents.lines().count(), 4);
        assert_eq!(log.row_count().unwrap(), 3);
    }

    #[test]
    fn each_append_adds_exactly_one_row() {
        let dir = tempdir().unwrap();
        let log = InteractionLog::new(dir.path().join("metrics.csv"));

        for expected in 1..=4 {
            log.append(&entry(0.3, 0.2, &[])).unwrap();
            assert_eq!(log.row_count().unwrap(), expected);
        }
    }

    #[test]
    fn rows_read_back_with_evidence_and_verdict() {
        let dir = tempdir().unwrap();
        let log = InteractionLog::new(dir.path().join("metrics.csv"));

        let written = entry(12.346, 0.95, &["shuttle.pdf (Page 1)", "faq.txt"]);
        log.append(&written).unwrap();

        let rows = log.read_all().unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.latency_ms, 12.35);
        assert_eq!(row.confidence, 0.95);
        assert_eq!(row.verdict, Verdict::Pass);
        assert_eq!(
            row.evidence_ids,
            vec![RecordId::new("shuttle.pdf (Page 1)"), RecordId::new("faq.txt")]
        );
        assert_eq!(row.task_type, "campus_query");
        assert_eq!(row.retrieval_method, "Keyword_Count_v1");
    }

    #[test]
    fn tail_returns_last_rows_oldest_first() {
        let dir = tempdir().unwrap();
        let log = InteractionLog::new(dir.path().join("metrics.csv"));

        for latency in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0] {
            log.append(&entry(latency, 0.6, &[])).unwrap();
        }

        let tail = log.tail(5).unwrap();
        let latencies: Vec<f64> = tail.iter().map(|e| e.latency_ms).collect();
        assert_eq!(latencies, vec![2.0, 3.0, 4.0, 5.0, 6.0]);

        assert_eq!(log.tail(100).unwrap().len(), 6);
        assert!(log.tail(0).unwrap().is_empty());
    }

    #[test]
    fn summary_reports_dashboard_metrics() {
        let dir = tempdir().unwrap();
        let log = InteractionLog::new(dir.path().join("metrics.csv"));

        log.append(&entry(10.0, 0.9, &["a"])).unwrap();
        log.append(&entry(20.0, 0.6, &["b"])).unwrap();
        log.append(&entry(30.0, 0.95, &["c"])).unwrap();
        log.append(&entry(40.0, 0.2, &[])).unwrap();

        let summary = log.summary().unwrap();
        assert_eq!(summary.total_queries, 4);
        assert_eq!(summary.avg_latency_ms, Some(25.0));
        assert_eq!(summary.faithfulness_rate, Some(0.5));
    }

    #[test]
    fn summary_of_empty_log() {
        let dir = tempdir().unwrap();
        let log = InteractionLog::new(dir.path().join("metrics.csv"));

        let summary = log.summary().unwrap();
        assert_eq!(summary.total_queries, 0);
        assert_eq!(summary.avg_latency_ms, None);
        assert_eq!(summary.faithfulness_rate, None);
    }

    #[test]
    fn malformed_log_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metrics.csv");
        std::fs::write(
            &path,
            "timestamp,user_task_type,retrieval_conf,latency_ms,evidence_ids,confidence,faithfulness_indicator\nnot-a-date,x,y,z,[],0.1,FAIL\n",
        )
        .unwrap();

        let log = InteractionLog::new(&path);
        assert!(matches!(log.read_all(), Err(LogError::Csv(_))));
    }
}
