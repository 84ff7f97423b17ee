//! Header analysis for hourly observation files
//!
//! This module maps column names from the header row to field positions and
//! verifies that the date/time columns every record needs are present.

use std::collections::HashMap;

use crate::constants::columns;
use crate::{Error, Result};

/// Column layout of one observation file
///
/// Built from the header row; positions are used to pull fields out of each
/// data record, and the measurement list drives value extraction.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    /// Column name to field position
    pub name_to_index: HashMap<String, usize>,

    /// Column names in file order
    names: Vec<String>,
}

impl ColumnIndex {
    /// Analyze a header row and verify the required date/time columns
    pub fn from_header(fields: &[String]) -> Result<Self> {
        let mut name_to_index = HashMap::new();
        for (index, name) in fields.iter().enumerate() {
            name_to_index.insert(name.clone(), index);
        }

        for required in columns::REQUIRED {
            if !name_to_index.contains_key(*required) {
                return Err(Error::table_format(
                    "header",
                    format!("required column '{required}' not found"),
                ));
            }
        }

        Ok(Self {
            name_to_index,
            names: fields.to_vec(),
        })
    }

    /// Field position of a column, if the file has it
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Measurement columns in file order (everything except date/time)
    pub fn measurement_columns(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|name| !columns::REQUIRED.contains(name))
    }

    /// Column counts as (total, measurements)
    pub fn stats(&self) -> (usize, usize) {
        let total = self.names.len();
        (total, total - columns::REQUIRED.len())
    }
}
