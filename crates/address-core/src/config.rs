//! Configuration management for the address extractor

use serde::{Deserialize, Serialize};
use crate::constants::{DEFAULT_COUNTRY_CODE, DEFAULT_RETURN_MARKER, MIN_ADDRESS_LINES};
use crate::country::CountryNameIndex;
use crate::error::{AddressError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extractor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Country used when the text does not name one
    #[serde(alias = "country", default = "default_country")]
    pub default_country: String,

    /// Lines containing this word are treated as return addresses
    #[serde(default = "default_return_marker")]
    pub return_marker: String,

    #[serde(default = "default_min_lines")]
    pub min_lines: usize,

    /// Persisted country index; the bundled index is used when absent
    #[serde(alias = "countries_file", default)]
    pub country_index_path: Option<PathBuf>,

    /// Retry country detection with ASCII folding and encoding repair
    #[serde(default = "default_true")]
    pub ascii_fallback: bool,

    /// Derive the country from a postal code when no country line matched
    #[serde(default = "default_true")]
    pub infer_country_from_postalcode: bool,
}

fn default_country() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

fn default_return_marker() -> String {
    DEFAULT_RETURN_MARKER.to_string()
}

fn default_min_lines() -> usize {
    MIN_ADDRESS_LINES
}

fn default_true() -> bool {
    true
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            default_country: default_country(),
            return_marker: default_return_marker(),
            min_lines: default_min_lines(),
            country_index_path: None,
            ascii_fallback: true,
            infer_country_from_postalcode: true,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AddressError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_json_str(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)
            .map_err(|e| AddressError::Config(format!("Failed to parse config: {}", e)))?;

        config.default_country = config.default_country.trim().to_ascii_uppercase();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_country.len() != 2
            || !self.default_country.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(AddressError::Config(format!(
                "Default country must be a two-letter ISO code, got '{}'",
                self.default_country
            )));
        }

        if self.min_lines == 0 {
            return Err(AddressError::Config("min_lines must be at least 1".to_string()));
        }

        if self.return_marker.trim().is_empty() {
            return Err(AddressError::Config("Return address marker is required".to_string()));
        }

        Ok(())
    }

    /// Load the configured country index, falling back to the bundled one
    pub fn load_index(&self) -> Result<Arc<CountryNameIndex>> {
        match &self.country_index_path {
            Some(path) => Ok(Arc::new(CountryNameIndex::from_file(path)?)),
            None => Ok(CountryNameIndex::bundled()),
        }
    }
}
