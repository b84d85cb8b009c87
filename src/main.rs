//! StarterLens - starter-aware dependency analysis
//!
//! A CLI that reads a project's exported dependency tree and raw usage
//! analysis, removes the false positives caused by Spring Boot starters,
//! and writes a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success (no warnings, or no --fail-on-warning set)
//!   1 - Runtime error (missing input, malformed JSON, bad config, etc.)
//!   2 - Warnings remain after correction and --fail-on-warning is set

use anyhow::{Context, Result};
use starterlens::cli::{Args, OutputFormat};
use starterlens::config::{Config, CONFIG_FILE_NAME};
use starterlens::input::{JsonDependencyGraph, JsonUsageReport};
use starterlens::report::{self, Report};
use starterlens::{Project, StarterAwareAnalyzer};
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config(&args.project_dir);
    }

    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(args.log_level(config.general.verbose));

    info!("StarterLens v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {}", source);
    debug!("Arguments: {:?}", args);

    match run_analysis(&args, &config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .starterlens.toml in the project directory.
fn handle_init_config(project_dir: &Path) -> Result<()> {
    match Config::init_in_dir(project_dir) {
        Ok(path) => {
            println!("✅ Created {} with default settings.", path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("⚠️  {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the analysis and write the report. Returns exit code (0 or 2).
fn run_analysis(args: &Args, config: &Config) -> Result<i32> {
    let project = Project::new(args.project_name(), &args.project_dir);
    info!("Analyzing project: {}", project.name);

    let analyzer = StarterAwareAnalyzer::new(
        JsonUsageReport::new(&config.inputs.analysis),
        JsonDependencyGraph::new(&config.inputs.graph),
    );

    let excluded = &config.inputs.excluded_classes;
    let run = if excluded.is_empty() {
        analyzer.run(&project)
    } else {
        analyzer.run_excluding(&project, excluded)
    };
    let run = run.context("Dependency analysis failed")?;

    let report = Report::from_run(&project.name, &run, config.report.include_membership);

    let output = match config.report.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    let output_path = Path::new(&config.general.output);
    std::fs::write(output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    if !args.quiet {
        println!("\n📊 Dependency Analysis Summary:");
        println!("   Starters found: {}", report.metadata.starters_found);
        println!(
            "   False positives removed: {}",
            report.metadata.false_positives_removed
        );
        println!("   Used undeclared: {}", report.summary.used_undeclared);
        println!("   Unused declared: {}", report.summary.unused_declared);
        println!(
            "   Test-scoped, used outside tests: {}",
            report.summary.test_artifacts_with_non_test_scope
        );
        println!("\n✅ Report saved to: {}", output_path.display());
    }

    if config.report.fail_on_warning && run.corrected.has_warnings() {
        eprintln!("\n⛔ Dependency warnings remain after correction. Failing (exit code 2).");
        return Ok(2);
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so it returns where the config came from
/// instead of logging it.
fn load_config(args: &Args) -> Result<(Config, String)> {
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, config_path.display().to_string()));
    }

    match Config::load_from_dir(&args.project_dir) {
        Ok(Some(config)) => Ok((
            config,
            args.project_dir.join(CONFIG_FILE_NAME).display().to_string(),
        )),
        Ok(None) => Ok((Config::default(), "defaults".to_string())),
        Err(e) => {
            eprintln!("⚠️  Failed to load config, using defaults: {:#}", e);
            Ok((Config::default(), "defaults".to_string()))
        }
    }
}
