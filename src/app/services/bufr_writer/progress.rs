//! Progress reporting for BUFR writing operations
//!
//! This module provides progress bar management with real-time statistics
//! during message encoding runs.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::app::services::bufr_writer::config::WritingStats;

/// Progress reporter for BUFR writing operations
#[derive(Debug, Default)]
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    total_messages: usize,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            total_messages: 0,
        }
    }

    /// Set up progress reporting for the writing operation
    pub fn setup_progress(&mut self, total_messages: usize) {
        self.total_messages = total_messages;

        let pb = ProgressBar::new(total_messages as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} messages ({percent}%) | {msg}")
                .unwrap()
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        pb.set_message("Encoding BUFR messages");

        debug!("Progress bar initialized for {} messages", total_messages);
        self.progress_bar = Some(pb);
    }

    /// Update progress with the number of messages written
    pub fn increment(&self, messages_written: usize) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(messages_written as u64);
        }
    }

    /// Set a custom message for the progress bar
    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    /// Update progress bar with current statistics
    pub fn update_with_stats(&self, stats: &WritingStats) {
        if let Some(ref pb) = self.progress_bar {
            let message = format!(
                "Writing... {} messages, {}",
                stats.messages_written,
                WritingStats::format_bytes(stats.bytes_written)
            );
            pb.set_message(message);
        }
    }

    /// Finish progress reporting with a completion message
    pub fn finish(&self, stats: &WritingStats) {
        if let Some(ref pb) = self.progress_bar {
            let completion_message = format!(
                "Completed: {} messages, {}",
                stats.messages_written,
                WritingStats::format_bytes(stats.bytes_written)
            );
            pb.finish_with_message(completion_message.clone());
            debug!("Progress reporting completed: {}", completion_message);
        }
    }

    /// Finish progress reporting with an error message
    pub fn finish_with_error(&self, error_message: &str) {
        if let Some(ref pb) = self.progress_bar {
            let error_msg = format!("Failed: {}", error_message);
            pb.finish_with_message(error_msg);
            debug!("Progress reporting finished with error: {}", error_message);
        }
    }

    /// Check if progress reporting is enabled
    pub fn is_enabled(&self) -> bool {
        self.progress_bar.is_some()
    }

    /// Get the total number of messages being tracked
    pub fn total_messages(&self) -> usize {
        self.total_messages
    }

    /// Get current position from the progress bar
    pub fn current_position(&self) -> u64 {
        if let Some(ref pb) = self.progress_bar {
            pb.position()
        } else {
            0
        }
    }
}
