//! Test utilities for lookup table testing

use std::io::Write;
use tempfile::NamedTempFile;


/// Helper to create a lookup CSV file with given rows
pub fn create_lookup_file(rows: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "CSV_column,standard_name,type").unwrap();
    write!(temp_file, "{}", rows).unwrap();
    temp_file
}
