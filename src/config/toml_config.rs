use crate::core::loader::DuplicatePolicy;
use crate::utils::error::{DoseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_SOURCE: &str = "data/drug_data.csv";
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub source: String,
    pub duplicates: DuplicatePolicy,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_DATA_SOURCE.to_string(),
            duplicates: DuplicatePolicy::FirstWins,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
    pub verbose: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
            verbose: false,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DoseError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${DRUG_TABLE_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DoseError::InternalError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Overrides, Settings};
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[data]
source = "https://vet.example.com/drug_data.csv"
duplicates = "reject"

[logging]
format = "json"
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data.source, "https://vet.example.com/drug_data.csv");
        assert_eq!(config.data.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.logging.format, "json");
        assert!(config.logging.verbose);
        assert!(Settings::merge(config, Overrides::default()).validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.data.source, DEFAULT_DATA_SOURCE);
        assert_eq!(config.data.duplicates, DuplicatePolicy::FirstWins);
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VET_DOSE_TEST_TABLE", "/srv/tables/drugs.csv");

        let config = TomlConfig::from_toml_str(
            r#"
[data]
source = "${VET_DOSE_TEST_TABLE}"
"#,
        )
        .unwrap();
        assert_eq!(config.data.source, "/srv/tables/drugs.csv");

        std::env::remove_var("VET_DOSE_TEST_TABLE");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[data]
source = "ftp://vet.example.com/drugs.csv"
"#,
        )
        .unwrap();
        assert!(Settings::merge(config, Overrides::default()).validate().is_err());

        let config = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(Settings::merge(config, Overrides::default()).validate().is_err());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = TomlConfig::from_toml_str("[data]\nduplicates = \"last-wins\"\n");
        assert!(matches!(result, Err(DoseError::TomlError(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[data]\nsource = \"tables/cattle.csv\"").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data.source, "tables/cattle.csv");
    }
}
