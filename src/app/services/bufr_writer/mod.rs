//! BUFR file writer for encoded observation messages
//!
//! This module writes the messages produced by the encoder to disk, one
//! output file per input observation file. BUFR messages are self-delimiting
//! (`BUFR` ... `7777`), so an output file is the plain concatenation of its
//! messages in row order with no framing between them.
//!
//! # Key Features
//!
//! - **Streaming output**: Messages are written as rows encode, nothing is
//!   held beyond the buffered file handle
//! - **Progress reporting**: Optional progress bar with live statistics
//! - **Skip accounting**: Rows that fail to encode are counted, not fatal
//!
//! # Architecture
//!
//! The module is organized into logical components:
//!
//! - [`config`] - Configuration structure and statistics tracking
//! - [`writer`] - Core BufrFileWriter implementation
//! - [`progress`] - Progress reporting and user feedback
//! - [`utils`] - Convenience functions for batch writing
//!
//! # Basic Usage
//!
//! ```rust
//! use std::path::Path;
//! use bufr_exporter::app::services::bufr_writer::{BufrFileWriter, WriterConfig};
//!
//! # async fn example(messages: Vec<Vec<u8>>) -> bufr_exporter::Result<()> {
//! let config = WriterConfig::default();
//! let mut writer = BufrFileWriter::create(Path::new("KAN_L.bufr"), config).await?;
//!
//! writer.setup_progress(messages.len());
//! for message in &messages {
//!     writer.write_message(message).await?;
//! }
//! let stats = writer.finalize().await?;
//!
//! println!("Wrote {} messages", stats.messages_written);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod progress;
pub mod utils;
pub mod writer;

// Re-export main types for convenient access
pub use config::{WriterConfig, WritingStats};
pub use progress::ProgressReporter;
pub use utils::write_messages_to_file;
pub use writer::BufrFileWriter;
