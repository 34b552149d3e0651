//! Append-only status log
//!
//! Each cycle opens the file in append mode, writes one line per site and
//! closes it again. Nothing is ever truncated or rotated.

use crate::checker::{SiteStatus, StatusResult};
use crate::report::traits::{ReportError, ReportResult};
use chrono::NaiveDateTime;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Timestamp layout of every log line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a single log line, without the trailing newline
///
/// `2024-05-01 12:00:00 - https://example.com: 200`
pub fn format_log_line(timestamp: &NaiveDateTime, entry: &SiteStatus) -> String {
    format!(
        "{} - {}: {}",
        timestamp.format(TIMESTAMP_FORMAT),
        entry.site,
        entry.outcome
    )
}

/// File sink for per-cycle status lines
#[derive(Debug, Clone)]
pub struct StatusLog {
    path: PathBuf,
}

impl StatusLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line per entry, all stamped with `timestamp`
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of lines written
    /// * `Err(ReportError)` - The file could not be opened or written
    pub fn append(&self, result: &StatusResult, timestamp: &NaiveDateTime) -> ReportResult<usize> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        let mut writer = BufWriter::new(file);
        let mut written = 0;

        for entry in result {
            writeln!(writer, "{}", format_log_line(timestamp, entry)).map_err(|e| self.io_error(e))?;
            written += 1;
        }

        writer.flush().map_err(|e| self.io_error(e))?;

        tracing::debug!("Appended {} lines to {}", written, self.path.display());
        Ok(written)
    }

    fn io_error(&self, source: std::io::Error) -> ReportError {
        ReportError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
