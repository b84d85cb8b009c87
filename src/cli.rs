//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// StarterLens - starter-aware dependency analysis
///
/// Reads a project's exported dependency tree and raw dependency usage
/// analysis, and removes the findings caused by Spring Boot starters.
///
/// Examples:
///   starterlens --project-dir ./my-service
///   starterlens --graph tree.json --analysis usage.json --format json
///   starterlens --fail-on-warning --exclude-classes com.example.Generated
///   starterlens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Project directory; relative input paths are resolved against it
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Dependency tree export (JSON)
    ///
    /// Default: from config or dependency-graph.json
    #[arg(short, long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Raw dependency usage analysis export (JSON)
    ///
    /// Default: from config or dependency-analysis.json
    #[arg(short, long, value_name = "FILE")]
    pub analysis: Option<PathBuf>,

    /// Classes to ignore in the usage analysis (comma-separated).
    /// Rejected when the analysis is a precomputed JSON export.
    #[arg(long, value_name = "CLASSES", value_delimiter = ',')]
    pub exclude_classes: Option<Vec<String>>,

    /// Output file path for the report
    ///
    /// Default: from config or starterlens_report.md
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .starterlens.toml in the project directory
    #[arg(short, long, value_name = "FILE", env = "STARTERLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Leave the starter membership listing out of the report
    #[arg(long)]
    pub no_membership: bool,

    /// Exit with code 2 if warnings remain after correction
    #[arg(long)]
    pub fail_on_warning: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .starterlens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if !self.project_dir.exists() {
            return Err(format!(
                "Project directory does not exist: {}",
                self.project_dir.display()
            ));
        }
        if !self.project_dir.is_dir() {
            return Err(format!(
                "Project path is not a directory: {}",
                self.project_dir.display()
            ));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `general.verbose` from the config file; `--quiet`
    /// overrides it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Name of the project, taken from the project directory.
    pub fn project_name(&self) -> String {
        let dir = self
            .project_dir
            .canonicalize()
            .unwrap_or_else(|_| self.project_dir.clone());
        dir.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string())
    }
}
