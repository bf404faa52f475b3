//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `PUBMED_AFFILIATIONS` (nested keys use
//! `__`, e.g. `PUBMED_AFFILIATIONS_OUTPUT__DEFAULT_PATH=papers.csv`).
//!
//! ```toml
//! [pubmed]
//! esearch_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi"
//! esummary_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi"
//! user_agent = "my-lab-tool/1.0"
//! default_max_results = 25
//!
//! [output]
//! default_path = "papers.csv"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::DEFAULT_MAX_RESULTS;
use crate::sources::{PUBMED_ESEARCH_URL, PUBMED_ESUMMARY_URL};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "PUBMED_AFFILIATIONS";

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "get-papers-list.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// PubMed endpoint settings
    #[serde(default)]
    pub pubmed: PubMedConfig,

    /// Export settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Check values that deserialize fine but are unusable
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.pubmed.default_max_results == 0 {
            return Err(config::ConfigError::Message(
                "pubmed.default_max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// PubMed endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubMedConfig {
    #[serde(default = "default_esearch_url")]
    pub esearch_url: String,

    #[serde(default = "default_esummary_url")]
    pub esummary_url: String,

    /// User agent override; the crate name and version are used when unset
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Result cap used when the command line does not give one
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            esearch_url: default_esearch_url(),
            esummary_url: default_esummary_url(),
            user_agent: None,
            default_max_results: default_max_results(),
        }
    }
}

fn default_esearch_url() -> String {
    PUBMED_ESEARCH_URL.to_string()
}

fn default_esummary_url() -> String {
    PUBMED_ESUMMARY_URL.to_string()
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV path used when the command line does not give one
    #[serde(default = "default_output_path")]
    pub default_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output.csv")
}

/// Load configuration from an optional file plus environment overrides
///
/// The merged result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("get-papers-list").join("config.toml"))
        .filter(|path| path.is_file())
}
