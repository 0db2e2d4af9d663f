#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::loader::DuplicatePolicy;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_source, Validate};
use toml_config::{TomlConfig, LOG_FORMATS};

/// Effective settings after merging the config file with command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_source: String,
    pub duplicates: DuplicatePolicy,
    pub log_format: String,
    pub verbose: bool,
}

/// Command-line values that take precedence over the file when present.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_source: Option<String>,
    pub duplicates: Option<DuplicatePolicy>,
    pub log_format: Option<String>,
    pub verbose: bool,
}

impl Settings {
    pub fn resolve(file: Option<&str>, overrides: Overrides) -> Result<Self> {
        let base = match file {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(Self::merge(base, overrides))
    }

    pub fn merge(base: TomlConfig, overrides: Overrides) -> Self {
        Self {
            data_source: overrides.data_source.unwrap_or(base.data.source),
            duplicates: overrides.duplicates.unwrap_or(base.data.duplicates),
            log_format: overrides.log_format.unwrap_or(base.logging.format),
            verbose: overrides.verbose || base.logging.verbose,
        }
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_source("data", &self.data_source)?;
        validate_one_of("log-format", &self.log_format, &LOG_FORMATS)?;
        Ok(())
    }
}
