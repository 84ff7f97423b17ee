//! Configuration management and validation.
//!
//! Provides the layered run configuration: built-in defaults, overridden by
//! an optional TOML file (either passed on the command line or found in the
//! user configuration directory), overridden again by command-line flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::models::StationMetadata;
use crate::bufr::MessageConfig;
use crate::constants;
use crate::{Error, Result};

/// Name of the application's directory under the user configuration root
const CONFIG_DIR_NAME: &str = "bufr-exporter";

/// Name of the configuration file
const CONFIG_FILE_NAME: &str = "config.toml";

/// Processing parameters for a conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Directory receiving the generated BUFR files
    pub output_dir: PathBuf,

    /// Glob pattern selecting observation files within the input directory
    pub file_pattern: String,

    /// Lookup table path; when unset, `variables_bufr.csv` next to the input
    /// data is used if present, otherwise the built-in mapping
    pub lookup_path: Option<PathBuf>,

    /// Overwrite existing output files instead of skipping them
    pub force: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            file_pattern: constants::HOURLY_FILE_PATTERN.to_string(),
            lookup_path: None,
            force: false,
        }
    }
}

/// BUFR identification-section settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Originating/generating centre
    pub centre: u16,

    /// Originating/generating sub-centre
    pub subcentre: u16,

    /// Update sequence number
    pub update_sequence: u8,

    /// Data category
    pub data_category: u8,

    /// International data sub-category
    pub intl_sub_category: u8,

    /// Local data sub-category
    pub local_sub_category: u8,

    /// Master tables version number
    pub master_tables_version: u8,

    /// Local tables version number
    pub local_tables_version: u8,

    /// Unexpanded data-description template
    pub template: u32,

    /// Cloud layer replication count in emitted messages
    pub cloud_layers: u32,

    /// Below-station cloud replication count in emitted messages
    pub clouds_below_station: u32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            centre: constants::ORIGINATING_CENTRE,
            subcentre: constants::ORIGINATING_SUBCENTRE,
            update_sequence: constants::UPDATE_SEQUENCE_NUMBER,
            data_category: constants::DATA_CATEGORY,
            intl_sub_category: constants::INTL_DATA_SUBCATEGORY,
            local_sub_category: constants::LOCAL_DATA_SUBCATEGORY,
            master_tables_version: constants::MASTER_TABLES_VERSION,
            local_tables_version: constants::LOCAL_TABLES_VERSION,
            template: constants::SYNOP_LAND_TEMPLATE,
            cloud_layers: constants::CLOUD_LAYER_COUNT,
            clouds_below_station: constants::CLOUD_BELOW_STATION_COUNT,
        }
    }
}

impl EncodingConfig {
    /// Build the per-message configuration these settings describe
    ///
    /// The typical time is a placeholder; the message builder replaces it
    /// with each observation's timestamp.
    pub fn to_message_config(&self) -> MessageConfig {
        MessageConfig::new()
            .with_centre(self.centre, self.subcentre)
            .with_template(self.template)
            .with_delayed_counts(vec![self.cloud_layers, self.clouds_below_station])
            .with_identification(
                self.update_sequence,
                self.data_category,
                self.intl_sub_category,
                self.local_sub_category,
                self.master_tables_version,
                self.local_tables_version,
            )
    }
}

/// Global configuration for BUFR export runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Processing parameters
    pub processing: ProcessingConfig,

    /// Station identity written into every message
    pub station: StationMetadata,

    /// BUFR identification-section settings
    pub encoding: EncodingConfig,
}

impl Config {
    /// Load configuration with layering
    ///
    /// An explicit path must exist and parse. With no explicit path, the
    /// file in the user configuration directory is used when present,
    /// falling back to the built-in defaults.
    pub fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
            if path.is_file() {
                debug!("Using configuration from {}", path.display());
                return Self::load_file(&path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load and parse one TOML configuration file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read {}", path.display()), e))?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            Error::configuration(format!("invalid configuration {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values no run could use
    pub fn validate(&self) -> Result<()> {
        self.station.validate()?;
        if self.processing.file_pattern.is_empty() {
            return Err(Error::configuration("file_pattern must not be empty"));
        }
        if let Err(e) = glob::Pattern::new(&self.processing.file_pattern) {
            return Err(Error::pattern(self.processing.file_pattern.clone(), e));
        }
        Ok(())
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.processing.output_dir = output_dir.into();
        self
    }

    /// Set the observation file pattern
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.processing.file_pattern = pattern.into();
        self
    }

    /// Set the lookup table path
    pub fn with_lookup_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.processing.lookup_path = Some(path.into());
        self
    }

    /// Enable overwriting of existing output files
    pub fn with_force(mut self, force: bool) -> Self {
        self.processing.force = force;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.processing.output_dir, PathBuf::from("BUFR_out"));
        assert_eq!(config.processing.file_pattern, "*hour*");
        assert!(config.processing.lookup_path.is_none());
        assert!(!config.processing.force);
        assert_eq!(config.encoding.centre, 98);
        assert_eq!(config.encoding.template, 307080);
        assert_eq!(config.station.block_number, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            [processing]
            output_dir = "exports"
            force = true

            [station]
            block_number = 4
            station_number = 360
            name = "KAN_L"
            "#,
        )
        .unwrap();

        assert_eq!(config.processing.output_dir, PathBuf::from("exports"));
        assert!(config.processing.force);
        // unset sections keep their defaults
        assert_eq!(config.processing.file_pattern, "*hour*");
        assert_eq!(config.encoding.master_tables_version, 13);
        assert_eq!(config.station.block_number, 4);
        assert_eq!(config.station.station_number, 360);
        assert_eq!(config.station.name.as_deref(), Some("KAN_L"));
        // station defaults survive partial override
        assert_eq!(config.station.station_type, 0);
    }

    #[test]
    fn test_load_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            "[encoding]\ncentre = 94\ncloud_layers = 2\nclouds_below_station = 1"
        )
        .unwrap();

        let config = Config::load_file(temp_file.path()).unwrap();
        assert_eq!(config.encoding.centre, 94);

        let message_config = config.encoding.to_message_config();
        assert_eq!(message_config.originating_centre, 94);
        assert_eq!(message_config.delayed_counts, vec![2, 1]);
    }

    #[test]
    fn test_load_file_rejects_bad_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "processing = \"not a table\"").unwrap();
        assert!(Config::load_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_load_file_rejects_unknown_station_fields() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[station]\nblokc_number = 4").unwrap();
        assert!(Config::load_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_station() {
        let config: Config = toml::from_str("[station]\nblock_number = 100").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let config = Config::default().with_file_pattern("[unclosed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let result = Config::load_layered(Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_methods() {
        let config = Config::default()
            .with_output_dir("out")
            .with_file_pattern("*day*")
            .with_lookup_path("vars.csv")
            .with_force(true);

        assert_eq!(config.processing.output_dir, PathBuf::from("out"));
        assert_eq!(config.processing.file_pattern, "*day*");
        assert_eq!(
            config.processing.lookup_path,
            Some(PathBuf::from("vars.csv"))
        );
        assert!(config.processing.force);
    }
}
