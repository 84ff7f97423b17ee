//! Configuration and statistics for BUFR writer operations
//!
//! This module provides the writer configuration and the statistics tracking
//! accumulated while writing messages to a BUFR output file.

use serde::{Deserialize, Serialize};

use crate::app::services::message_builder::BuildReport;

/// Configuration for BUFR file writing
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Overwrite existing output files instead of skipping them
    pub force_overwrite: bool,

    /// Show a progress bar while writing
    pub show_progress: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            force_overwrite: false,
            show_progress: true,
        }
    }
}

impl WriterConfig {
    /// Create a new WriterConfig with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether existing output files are overwritten
    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    /// Set whether a progress bar is shown
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

/// Writing statistics for progress reporting and diagnostics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WritingStats {
    /// Messages written to the output file
    pub messages_written: usize,

    /// Observation rows that failed to encode
    pub messages_failed: usize,

    /// Total bytes written to storage
    pub bytes_written: usize,

    /// Fields assigned across all messages
    pub fields_set: usize,

    /// Fields skipped because the value or key was rejected
    pub fields_failed: usize,

    /// Lookup entries with no value across all messages
    pub fields_missing: usize,
}

impl WritingStats {
    /// Create new empty writing statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one message's build counters into the totals
    pub fn absorb_build_report(&mut self, report: &BuildReport) {
        self.fields_set += report.fields_set;
        self.fields_failed += report.fields_failed;
        self.fields_missing += report.fields_missing;
    }

    /// Get success rate as percentage
    pub fn success_rate(&self) -> f64 {
        let total_attempts = self.messages_written + self.messages_failed;
        if total_attempts == 0 {
            100.0
        } else {
            (self.messages_written as f64 / total_attempts as f64) * 100.0
        }
    }

    /// Check if any rows failed to encode
    pub fn has_errors(&self) -> bool {
        self.messages_failed > 0
    }

    /// Format bytes in human-readable format
    pub fn format_bytes(bytes: usize) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Format statistics as human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "WritingStats {{ messages: {}, failed: {}, size: {}, fields set: {}, fields failed: {}, fields missing: {} }}",
            self.messages_written,
            self.messages_failed,
            Self::format_bytes(self.bytes_written),
            self.fields_set,
            self.fields_failed,
            self.fields_missing
        )
    }
}
