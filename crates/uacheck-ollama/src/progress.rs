//! Download progress tracking for model pulls

use std::fmt;

use crate::types::PullProgress;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Follows the digest being downloaded across pull records.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    current_digest: Option<String>,
    last_status: Option<String>,
}

/// A displayable progress line.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// True when this record starts a different blob than the previous one.
    pub new_line: bool,
    pub status: String,
    pub digest: String,
    pub completed: u64,
    pub total: u64,
    pub percentage: f64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one record. Returns an update only for records that carry both
    /// `completed` and `total`.
    pub fn observe(&mut self, record: &PullProgress) -> Option<ProgressUpdate> {
        if let Some(status) = &record.status {
            self.last_status = Some(status.clone());
        }

        let (completed, total) = match (record.completed, record.total) {
            (Some(completed), Some(total)) => (completed, total),
            _ => return None,
        };

        let digest = record.digest.clone().unwrap_or_default();
        let new_line = self.current_digest.as_deref() != Some(digest.as_str());
        if new_line {
            self.current_digest = Some(digest.clone());
        }

        Some(ProgressUpdate {
            new_line,
            status: record.status.clone().unwrap_or_default(),
            digest,
            completed,
            total,
            percentage: percentage(completed, total),
        })
    }

    pub fn last_status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }
}

impl ProgressUpdate {
    pub fn completed_mb(&self) -> u64 {
        self.completed / BYTES_PER_MB
    }

    pub fn total_mb(&self) -> u64 {
        self.total / BYTES_PER_MB
    }
}

impl fmt::Display for ProgressUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.2}%) [{} MB/{} MB]",
            self.status,
            self.percentage,
            self.completed_mb(),
            self.total_mb()
        )
    }
}

fn percentage(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}
