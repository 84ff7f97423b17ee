//! BUFR Exporter Library
//!
//! A Rust library for converting automatic weather station (AWS) observation
//! files into WMO BUFR edition 4 messages.
//!
//! This library provides tools for:
//! - Parsing whitespace- or comma-delimited AWS observation tables
//! - Loading lookup tables that map observation columns to BUFR standard names
//! - Encoding synoptic land-station messages (template 3 07 080) without an
//!   external BUFR library
//! - Applying unit conversions and null-sentinel suppression per field
//! - Writing one BUFR file per observation file, one message per row
//! - Comprehensive error handling with skip-and-log recovery

pub mod config;
pub mod constants;

// Embedded BUFR encoding engine
pub mod bufr {
    pub mod bits;
    pub mod descriptor;
    pub mod message;
    pub mod tables;
    pub mod template;

    pub use descriptor::Descriptor;
    pub use message::{BufrMessage, BufrValue, MessageConfig};
}

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod bufr_writer;
        pub mod lookup;
        pub mod message_builder;
        pub mod obs_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Observation, StationMetadata};
pub use bufr::{BufrMessage, BufrValue};
pub use config::Config;

/// Result type alias for the BUFR exporter
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for BUFR export operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Observation table format error
    #[error("Observation table error in file '{file}': {message}")]
    TableFormat { file: String, message: String },

    /// BUFR encoding error
    #[error("BUFR encoding error: {message}")]
    BufrEncoding { message: String },

    /// BUFR key could not be resolved against the message template
    #[error("Unknown BUFR key: {key}")]
    KeyNotFound { key: String },

    /// Value does not fit the bit width of its BUFR element
    #[error("Value out of range for BUFR key '{key}': {value}")]
    ValueOutOfRange { key: String, value: f64 },

    /// BUFR file writing error
    #[error("BUFR writing error: {message}")]
    BufrWriting { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Lookup table error
    #[error("Lookup table error: {message}")]
    Lookup { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Invalid file-matching pattern
    #[error("Invalid file pattern '{pattern}': {message}")]
    Pattern {
        pattern: String,
        message: String,
        #[source]
        source: glob::PatternError,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an observation table format error
    pub fn table_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TableFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a BUFR encoding error
    pub fn bufr_encoding(message: impl Into<String>) -> Self {
        Self::BufrEncoding {
            message: message.into(),
        }
    }

    /// Create an unknown-key error
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Create a value-out-of-range error
    pub fn value_out_of_range(key: impl Into<String>, value: f64) -> Self {
        Self::ValueOutOfRange {
            key: key.into(),
            value,
        }
    }

    /// Create a BUFR writing error
    pub fn bufr_writing(message: impl Into<String>) -> Self {
        Self::BufrWriting {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a lookup table error
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid-pattern error
    pub fn pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: source.msg.to_string(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Create an I/O error with a simple message
    pub fn io_error(message: impl Into<String>) -> Self {
        let message_str = message.into();
        Self::Io {
            message: message_str.clone(),
            source: std::io::Error::new(std::io::ErrorKind::Other, message_str),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<glob::GlobError> for Error {
    fn from(error: glob::GlobError) -> Self {
        let path = error.path().display().to_string();
        Self::Io {
            message: format!("failed to read matched path '{path}'"),
            source: error.into_error(),
        }
    }
}
