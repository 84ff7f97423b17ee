//! Lookup tables mapping observation columns to BUFR keys
//!
//! Each lookup entry pairs a source column name with the ecCodes-style key
//! it populates and the value kind used when assigning it. A built-in table
//! covers the standard hourly transmission format; a user-supplied CSV with
//! the header `CSV_column,standard_name,type` replaces it per run.
//!
//! ## Usage
//!
//! ```rust
//! use bufr_exporter::app::services::lookup::LookupTable;
//!
//! # fn example() -> bufr_exporter::Result<()> {
//! let table = LookupTable::built_in();
//! for entry in table.entries() {
//!     println!("{} -> {}", entry.csv_column, entry.standard_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod defaults;

#[cfg(test)]
pub mod tests;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bufr::{BufrMessage, MessageConfig};
use crate::{Error, Result};

/// How a mapped value is assigned to its BUFR key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Floating-point measurement
    Float,
    /// Integer or code-table value
    Int,
    /// Character data
    Str,
}

impl FromStr for ValueKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float" => Ok(Self::Float),
            "int" => Ok(Self::Int),
            "str" => Ok(Self::Str),
            other => Err(Error::lookup(format!(
                "unknown value type '{other}' (expected float, int or str)"
            ))),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float => write!(f, "float"),
            Self::Int => write!(f, "int"),
            Self::Str => write!(f, "str"),
        }
    }
}

/// One column-to-key mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupEntry {
    /// Source column name in the observation file
    pub csv_column: String,

    /// BUFR key the column populates, plain or ranked (`#2#timePeriod`)
    pub standard_name: String,

    /// Assignment kind for the value
    pub value_kind: ValueKind,
}

/// An ordered set of column mappings with its provenance
#[derive(Debug, Clone)]
pub struct LookupTable {
    entries: Vec<LookupEntry>,
    source: String,
}

impl LookupTable {
    /// The built-in mapping for the standard hourly transmission format
    pub fn built_in() -> Self {
        Self {
            entries: defaults::built_in_entries(),
            source: "built-in".to_string(),
        }
    }

    /// Load a mapping from a `CSV_column,standard_name,type` file
    ///
    /// Rows with an empty standard name mark unmapped columns and are
    /// skipped; a table that maps nothing at all is an error.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading lookup table: {}", path.display());
        let file_name = path.display().to_string();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| Error::csv_parsing(&file_name, "failed to open lookup table", Some(e)))?;

        let mut entries = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result
                .map_err(|e| Error::csv_parsing(&file_name, format!("row {}", row + 2), Some(e)))?;
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            // a column without a standard name is deliberately unmapped
            let standard_name = record.get(1).unwrap_or("").to_string();
            if standard_name.is_empty() {
                debug!("Skipping unmapped column '{}' (row {})", &record[0], row + 2);
                continue;
            }
            if record.len() < 3 {
                return Err(Error::csv_parsing(
                    &file_name,
                    format!("row {} has {} fields, expected 3", row + 2, record.len()),
                    None,
                ));
            }

            let csv_column = record[0].to_string();
            if csv_column.is_empty() {
                return Err(Error::csv_parsing(
                    &file_name,
                    format!("row {} maps an empty column name", row + 2),
                    None,
                ));
            }

            entries.push(LookupEntry {
                csv_column,
                standard_name,
                value_kind: record[2].parse()?,
            });
        }

        if entries.is_empty() {
            return Err(Error::lookup(format!(
                "lookup table '{file_name}' contains no mappings"
            )));
        }
        debug!("Loaded {} lookup entries", entries.len());

        Ok(Self {
            entries,
            source: file_name,
        })
    }

    /// Entries in table order
    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    /// Where the table came from ("built-in" or a file path)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of mappings in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no mappings
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every mapped key against a message template
    ///
    /// Builds an empty prototype message for the configuration and reports,
    /// per entry, whether its key resolves. Used by the `lookup` command to
    /// catch typos before a long encoding run.
    pub fn report(&self, config: &MessageConfig) -> Result<MappingReport> {
        let prototype = BufrMessage::new(config.clone())?;
        let entries = self
            .entries
            .iter()
            .map(|entry| MappingEntry {
                csv_column: entry.csv_column.clone(),
                standard_name: entry.standard_name.clone(),
                value_kind: entry.value_kind,
                resolves: prototype.contains_key(&entry.standard_name),
            })
            .collect();
        Ok(MappingReport {
            source: self.source.clone(),
            template: config.template,
            entries,
        })
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::built_in()
    }
}

/// Resolution report for a lookup table against one template
#[derive(Debug, Clone, Serialize)]
pub struct MappingReport {
    /// Table provenance
    pub source: String,

    /// Template the keys were resolved against
    pub template: u32,

    /// Per-entry resolution results
    pub entries: Vec<MappingEntry>,
}

impl MappingReport {
    /// Number of entries whose key did not resolve
    pub fn unresolved(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.resolves).count()
    }
}

/// One entry of a [`MappingReport`]
#[derive(Debug, Clone, Serialize)]
pub struct MappingEntry {
    /// Source column name
    pub csv_column: String,

    /// BUFR key
    pub standard_name: String,

    /// Assignment kind
    pub value_kind: ValueKind,

    /// True when the key resolves against the template
    pub resolves: bool,
}
