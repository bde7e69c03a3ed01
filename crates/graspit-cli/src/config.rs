//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use graspit_classifier::ClassifierConfig;
use graspit_jdm::JdmSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Corpus location and split settings
    #[serde(default)]
    pub corpus: CorpusSettings,

    /// Lexical client settings
    #[serde(default)]
    pub jdm: JdmSettings,

    /// Classifier knobs
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Output settings
    #[serde(default)]
    pub settings: Settings,
}

/// Corpus location and split settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSettings {
    /// Directory holding one JSON file per relation label
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: PathBuf,

    /// Directory for the lexical disk cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Share of each relation kept for training
    #[serde(default = "default_train_ratio")]
    pub train_ratio: f64,

    /// Split shuffle seed
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

fn default_corpus_dir() -> PathBuf {
    PathBuf::from("Learn")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}

fn default_train_ratio() -> f64 {
    graspit_corpus::DEFAULT_TRAIN_RATIO
}

fn default_seed() -> u64 {
    graspit_corpus::DEFAULT_SEED
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            corpus_dir: default_corpus_dir(),
            cache_dir: default_cache_dir(),
            train_ratio: default_train_ratio(),
            seed: default_seed(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Get the configuration directory (`~/.graspit`).
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".graspit"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Get the REPL history file path.
    pub fn history_path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("history"))
    }

    /// Load configuration from the default path, or defaults when the file
    /// does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config
            .classifier
            .validate()
            .map_err(CliError::Config)?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.corpus.corpus_dir, PathBuf::from("Learn"));
        assert_eq!(config.corpus.train_ratio, 0.8);
        assert!(config.settings.color);
        assert_eq!(config.classifier.k, 5);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.corpus.corpus_dir, config.corpus.corpus_dir);
        assert_eq!(parsed.classifier.k, config.classifier.k);
        assert_eq!(parsed.jdm.endpoint, config.jdm.endpoint);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[corpus]\ncorpus_dir = \"data\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.corpus.corpus_dir, PathBuf::from("data"));
        // Everything else falls back to defaults
        assert_eq!(config.corpus.train_ratio, 0.8);
        assert_eq!(config.classifier.k, 5);
    }

    #[test]
    fn test_invalid_classifier_section_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[classifier]\nmode = \"knn\"\nk = 5\nfusion_threshold = 2.0\nmax_hyperonyms = 20\nweighted = false\n",
        )
        .unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(CliError::Config(_))
        ));
    }
}
