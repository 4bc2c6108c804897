use crate::config::toml_config::TomlConfig;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "reel-catalog")]
#[command(about = "Load people, subscriptions and films from a delimited file and query the catalog")]
pub struct CliConfig {
    /// Input file with PERSON, SUBSCRIPTION and FILM lines
    #[arg(short, long)]
    pub input: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Field delimiter (defaults to ';')
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Directory to export films.csv, free_films.csv and summary.json into
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub output_formats: Vec<String>,

    /// Print one film by name
    #[arg(long)]
    pub film: Option<String>,

    /// Print one subscription by id
    #[arg(long)]
    pub subscription: Option<u32>,

    /// Print every free film
    #[arg(long)]
    pub list_free: bool,

    /// Print every film of a genre code
    #[arg(long)]
    pub genre: Option<i64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Builds the effective configuration: the TOML file if given, then command line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match (&self.config, &self.input) {
            (Some(path), _) => TomlConfig::from_file(path)?,
            (None, Some(input)) => TomlConfig::for_input(input.clone()),
            (None, None) => {
                return Err(CatalogError::ConfigError {
                    message: "either --input or --config is required".to_string(),
                })
            }
        };

        if let Some(input) = &self.input {
            config.source.path = input.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.source.delimiter = delimiter;
        }
        if let Some(output_path) = &self.output_path {
            config.load.output_path = Some(output_path.clone());
        }
        if !self.output_formats.is_empty() {
            config.load.output_formats = self.output_formats.clone();
        }
        config.logging.verbose |= self.verbose;
        config.logging.json |= self.json_logs;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_resolve_from_input_only() {
        let cli = CliConfig::parse_from(["reel-catalog", "--input", "data.csv", "--delimiter", "|"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.input_path(), "data.csv");
        assert_eq!(config.delimiter(), b'|');
        assert_eq!(config.output_path(), None);
    }

    #[test]
    fn test_resolve_requires_a_source() {
        let cli = CliConfig::parse_from(["reel-catalog", "--list-free"]);
        assert!(matches!(cli.resolve(), Err(CatalogError::ConfigError { .. })));
    }

    #[test]
    fn test_overrides_and_format_validation() {
        let cli = CliConfig::parse_from([
            "reel-catalog",
            "-i",
            "data.csv",
            "--output-path",
            "out",
            "--output-formats",
            "json",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.output_path(), Some("out"));
        assert_eq!(config.output_formats(), ["json".to_string()]);

        let cli = CliConfig::parse_from(["reel-catalog", "-i", "data.csv", "--output-formats", "xml"]);
        assert!(cli.resolve().is_err());
    }
}
