//! Core BUFR file writer implementation
//!
//! This module contains the main BufrFileWriter struct handling streaming
//! message output. BUFR messages are self-delimiting, so a file is simply
//! the concatenation of its messages in row order.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use crate::app::services::bufr_writer::{
    config::{WriterConfig, WritingStats},
    progress::ProgressReporter,
};
use crate::app::services::message_builder::BuildReport;
use crate::constants::PROGRESS_UPDATE_INTERVAL;
use crate::{Error, Result};

/// Streaming writer producing one BUFR file per observation file
pub struct BufrFileWriter {
    /// Output file path
    output_path: PathBuf,
    /// Writer configuration
    config: WriterConfig,
    /// Buffered output file handle
    file: BufWriter<File>,
    /// Progress reporter for user feedback
    progress_reporter: ProgressReporter,
    /// Writing statistics
    stats: WritingStats,
}

impl BufrFileWriter {
    /// Create a writer, truncating any existing file at the path
    pub async fn create(output_path: &Path, config: WriterConfig) -> Result<Self> {
        info!("Creating BUFR output file: {}", output_path.display());

        let file = File::create(output_path).await.map_err(|e| {
            Error::io(
                format!("failed to create {}", output_path.display()),
                e,
            )
        })?;

        Ok(Self {
            output_path: output_path.to_path_buf(),
            config,
            file: BufWriter::new(file),
            progress_reporter: ProgressReporter::new(),
            stats: WritingStats::default(),
        })
    }

    /// Set up progress reporting for the expected number of messages
    pub fn setup_progress(&mut self, total_messages: usize) {
        if self.config.show_progress {
            self.progress_reporter.setup_progress(total_messages);
        }
    }

    /// Append one encoded message to the file
    pub async fn write_message(&mut self, encoded: &[u8]) -> Result<()> {
        self.file.write_all(encoded).await.map_err(|e| {
            Error::io(
                format!("failed to write to {}", self.output_path.display()),
                e,
            )
        })?;

        self.stats.messages_written += 1;
        self.stats.bytes_written += encoded.len();
        self.progress_reporter.increment(1);
        if self.stats.messages_written % PROGRESS_UPDATE_INTERVAL == 0 {
            self.progress_reporter.update_with_stats(&self.stats);
        }
        Ok(())
    }

    /// Record a row that failed to encode
    pub fn record_failure(&mut self) {
        self.stats.messages_failed += 1;
        self.progress_reporter.increment(1);
    }

    /// Fold one message's build counters into the file statistics
    pub fn absorb_report(&mut self, report: &BuildReport) {
        self.stats.absorb_build_report(report);
    }

    /// Flush buffered output and return the final statistics
    pub async fn finalize(mut self) -> Result<WritingStats> {
        self.file.flush().await.map_err(|e| {
            Error::io(
                format!("failed to flush {}", self.output_path.display()),
                e,
            )
        })?;

        self.progress_reporter.finish(&self.stats);
        debug!("Finalized {}: {}", self.output_path.display(), self.stats.summary());
        Ok(self.stats)
    }

    /// Current writing statistics
    pub fn stats(&self) -> &WritingStats {
        &self.stats
    }

    /// The path being written
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_writer_concatenates_messages() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("KAN_L.bufr");
        let config = WriterConfig::new().with_progress(false);

        let mut writer = BufrFileWriter::create(&output_path, config).await.unwrap();
        writer.write_message(b"BUFR-first-7777").await.unwrap();
        writer.write_message(b"BUFR-second-7777").await.unwrap();
        let stats = writer.finalize().await.unwrap();

        assert_eq!(stats.messages_written, 2);
        assert_eq!(stats.bytes_written, 31);

        let contents = std::fs::read(&output_path).unwrap();
        assert_eq!(contents, b"BUFR-first-7777BUFR-second-7777");
    }

    #[tokio::test]
    async fn test_writer_counts_failures() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("out.bufr");
        let config = WriterConfig::new().with_progress(false);

        let mut writer = BufrFileWriter::create(&output_path, config).await.unwrap();
        writer.write_message(b"BUFR7777").await.unwrap();
        writer.record_failure();
        writer.record_failure();

        assert_eq!(writer.stats().messages_failed, 2);
        let stats = writer.finalize().await.unwrap();
        assert!((stats.success_rate() - 33.33).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_writer_create_fails_on_missing_directory() {
        let result = BufrFileWriter::create(
            Path::new("/nonexistent/dir/out.bufr"),
            WriterConfig::default(),
        )
        .await;
        assert!(result.is_err());
    }
}
