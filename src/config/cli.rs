use crate::config::{Overrides, Settings};
use crate::core::loader::DuplicatePolicy;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "vet-dose")]
#[command(about = "Veterinary dose calculator backed by a drug reference table")]
pub struct CliConfig {
    /// Reference table location: a CSV file path or an http(s) URL
    #[arg(long, global = true)]
    pub data: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// How repeated drug/species rows are handled
    #[arg(long, value_enum, global = true)]
    pub duplicates: Option<DuplicatePolicy>,

    /// Log output format (compact or json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the distinct drugs and species in the reference table
    Drugs,
    /// Compute the total dose and volume to administer
    Calculate {
        #[arg(long)]
        species: String,

        #[arg(long)]
        drug: String,

        /// Animal weight in kilograms
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,
    },
}

impl CliConfig {
    pub fn settings(&self) -> Result<Settings> {
        Settings::resolve(
            self.config.as_deref(),
            Overrides {
                data_source: self.data.clone(),
                duplicates: self.duplicates,
                log_format: self.log_format.clone(),
                verbose: self.verbose,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calculate() {
        let cli = CliConfig::parse_from([
            "vet-dose",
            "calculate",
            "--species",
            "Dog",
            "--drug",
            "Amoxicillin",
            "--weight",
            "20",
            "--data",
            "tables/drugs.csv",
        ]);

        assert_eq!(cli.data.as_deref(), Some("tables/drugs.csv"));
        match cli.command {
            Command::Calculate { species, drug, weight } => {
                assert_eq!(species, "Dog");
                assert_eq!(drug, "Amoxicillin");
                assert_eq!(weight, 20.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_negative_weight_reaches_calculator() {
        let cli = CliConfig::parse_from([
            "vet-dose", "calculate", "--species", "Dog", "--drug", "Amoxicillin", "--weight", "-5",
        ]);
        assert!(matches!(cli.command, Command::Calculate { weight, .. } if weight == -5.0));
    }

    #[test]
    fn test_duplicate_policy_flag() {
        let cli = CliConfig::parse_from(["vet-dose", "--duplicates", "reject", "drugs"]);
        assert_eq!(cli.duplicates, Some(DuplicatePolicy::Reject));
        assert_eq!(cli.settings().unwrap().duplicates, DuplicatePolicy::Reject);
    }
}
