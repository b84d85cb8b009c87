//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.starterlens.toml` files.

use crate::cli::{Args, OutputFormat};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = ".starterlens.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Input file settings.
    #[serde(default)]
    pub inputs: InputsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "starterlens_report.md".to_string()
}

/// Where the exported build metadata lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    /// Dependency tree export, relative to the project directory.
    #[serde(default = "default_graph")]
    pub graph: String,

    /// Raw usage analysis export, relative to the project directory.
    #[serde(default = "default_analysis")]
    pub analysis: String,

    /// Classes whose references are ignored by the usage analysis.
    #[serde(default)]
    pub excluded_classes: Vec<String>,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            graph: default_graph(),
            analysis: default_analysis(),
            excluded_classes: Vec::new(),
        }
    }
}

fn default_graph() -> String {
    "dependency-graph.json".to_string()
}

fn default_analysis() -> String {
    "dependency-analysis.json".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,

    /// List every starter with the artifacts it pulls in.
    #[serde(default = "default_true")]
    pub include_membership: bool,

    /// Exit with code 2 when warnings remain after correction.
    #[serde(default)]
    pub fail_on_warning: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            include_membership: true,
            fail_on_warning: false,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from a directory.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if args.verbose {
            self.general.verbose = true;
        }

        if let Some(ref graph) = args.graph {
            self.inputs.graph = graph.display().to_string();
        }
        if let Some(ref analysis) = args.analysis {
            self.inputs.analysis = analysis.display().to_string();
        }
        if let Some(ref excluded) = args.exclude_classes {
            self.inputs.excluded_classes = excluded.clone();
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }
        if args.no_membership {
            self.report.include_membership = false;
        }
        if args.fail_on_warning {
            self.report.fail_on_warning = true;
        }
    }

    /// Write a default configuration file into `dir`.
    ///
    /// Fails if the file already exists.
    pub fn init_in_dir(dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            bail!(
                "{} already exists. Remove it first or edit it manually.",
                path.display()
            );
        }

        std::fs::write(&path, Self::default_toml())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
