//! Convenience functions for BUFR writing workflows

use std::path::Path;

use crate::app::services::bufr_writer::{
    config::{WriterConfig, WritingStats},
    writer::BufrFileWriter,
};
use crate::Result;

/// Write a batch of already-encoded messages to one BUFR file
///
/// High-level wrapper used where the encode/write loop does not need
/// per-message control.
pub async fn write_messages_to_file(
    output_path: &Path,
    messages: &[Vec<u8>],
    config: WriterConfig,
) -> Result<WritingStats> {
    let mut writer = BufrFileWriter::create(output_path, config).await?;
    writer.setup_progress(messages.len());
    for message in messages {
        writer.write_message(message).await?;
    }
    writer.finalize().await
}
