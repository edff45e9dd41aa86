//! Top-level CLI definition and dispatch.

use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use serde_json::{Value, json};
use thiserror::Error;

use flair_sweep::core::config::Config;
use flair_sweep::logger::jsonl::{JsonlConfig, JsonlWriter};
use flair_sweep::sweep::processor::{SweepEvent, SweepRunner};
use flair_sweep::sweep::report::SweepReport;

/// Flair Sweep — batch cleanup for exported forum post JSON dumps.
#[derive(Debug, Parser)]
#[command(
    name = "fsw",
    author,
    version,
    about = "Flair Sweep - post JSON cleanup",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Increase verbosity.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Quiet mode (errors only).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Sweep a tree of post JSON files: normalize flairs, delete denylisted
    /// posts, report moderation content.
    Sweep(SweepArgs),
    /// Print the effective denylist and rename table.
    Rules(RulesArgs),
    /// View and validate configuration state.
    Config(ConfigArgs),
    /// Show version and optional build metadata (with --verbose).
    Version,
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct SweepArgs {
    /// Root directory to sweep (falls back to the configured root).
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,
    /// Evaluate and report without deleting or rewriting anything.
    #[arg(long)]
    dry_run: bool,
    /// Maximum traversal depth below the root.
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,
}

#[derive(Debug, Clone, Args, Default)]
struct RulesArgs {}

#[derive(Debug, Clone, Args, Default)]
struct ConfigArgs {
    /// Config operation to run.
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Debug, Clone, Subcommand)]
enum ConfigCommand {
    /// Print resolved config file path.
    Path,
    /// Print effective merged configuration.
    Show,
    /// Validate configuration and exit.
    Validate,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input at runtime.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// Internal bug or invariant violation.
    #[error("{0}")]
    Internal(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Internal(_) | Self::Json(_) => 3,
        }
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    match &cli.command {
        Command::Sweep(args) => run_sweep(cli, args),
        Command::Rules(args) => run_rules(cli, args),
        Command::Config(args) => run_config(cli, args),
        Command::Version => emit_version(cli),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    Config::load(cli.config.as_deref()).map_err(|e| CliError::Runtime(e.to_string()))
}

fn run_sweep(cli: &Cli, args: &SweepArgs) -> Result<(), CliError> {
    let mut config = load_config(cli)?;
    if let Some(root) = &args.root {
        config.sweep.root_path.clone_from(root);
    }
    if args.dry_run {
        config.sweep.dry_run = true;
    }
    if let Some(depth) = args.max_depth {
        if depth == 0 {
            return Err(CliError::User("--max-depth must be >= 1".to_string()));
        }
        config.sweep.max_depth = depth;
    }

    let logger = JsonlWriter::open(&JsonlConfig {
        path: config.paths.jsonl_log.clone(),
    });
    let mut runner = SweepRunner::from_config(&config).with_logger(logger);

    match output_mode(cli) {
        OutputMode::Human => {
            let quiet = cli.quiet;
            if !quiet {
                println!("Starting JSON file processing...");
            }
            if cli.verbose {
                println!("  root: {}", config.sweep.root_path.display());
                println!("  audit log: {}", config.paths.jsonl_log.display());
            }

            runner = runner.with_observer(move |event| match event {
                SweepEvent::Deleted { path, dry_run } => {
                    if !quiet {
                        let prefix = if *dry_run { "Would delete:" } else { "Deleted:" };
                        println!("{prefix} {}", path.display());
                    }
                }
                SweepEvent::Modified { path, dry_run } => {
                    if !quiet {
                        let prefix = if *dry_run { "Would modify:" } else { "Modified:" };
                        println!("{prefix} {}", path.display());
                    }
                }
                SweepEvent::Failed { path, message } => {
                    println!("Error processing {}: {message}", path.display());
                }
            });

            let report = runner.run().map_err(|e| CliError::Runtime(e.to_string()))?;

            if !quiet {
                println!("Processing complete!");
                print_sweep_summary(&report);
                print_mod_content_report(&report);
            }
            Ok(())
        }
        OutputMode::Json => {
            let report = runner.run().map_err(|e| CliError::Runtime(e.to_string()))?;
            let payload = sweep_report_json(&config, &report);
            write_json_line(&payload)
        }
    }
}

fn print_sweep_summary(report: &SweepReport) {
    let mode = if report.dry_run { " (dry-run)" } else { "" };
    let errors = report.errors.len().to_string();
    let errors = if report.errors.is_empty() {
        errors.normal()
    } else {
        errors.red()
    };
    println!();
    println!(
        "  Scanned: {} files in {:.1}s{mode}",
        report.files_seen,
        report.duration.as_secs_f64()
    );
    println!(
        "  Modified: {}   Deleted: {}   Errors: {errors}",
        report.modified.len(),
        report.deleted.len(),
    );
}

fn print_mod_content_report(report: &SweepReport) {
    if report.mod_content.is_empty() {
        println!("\nNo files found with populated moderation fields.");
        return;
    }

    println!("\nFiles with non-empty moderation content:");
    for entry in &report.mod_content {
        println!("\nFile: {}", entry.path.display());
        for detail in &entry.details {
            println!("  {detail}");
        }
    }
}

fn sweep_report_json(config: &Config, report: &SweepReport) -> Value {
    let errors: Vec<Value> = report
        .errors
        .iter()
        .map(|e| {
            json!({
                "path": e.path.to_string_lossy(),
                "code": e.code,
                "message": e.message,
            })
        })
        .collect();
    let mod_content: Vec<Value> = report
        .mod_content
        .iter()
        .map(|entry| {
            json!({
                "file": entry.path.to_string_lossy(),
                "details": entry.details,
            })
        })
        .collect();

    json!({
        "command": "sweep",
        "root": config.sweep.root_path.to_string_lossy(),
        "dry_run": report.dry_run,
        "started_at": report.started_at.to_rfc3339(),
        "elapsed_seconds": report.duration.as_secs_f64(),
        "files_seen": report.files_seen,
        "deleted": paths_json(&report.deleted),
        "modified": paths_json(&report.modified),
        "errors": errors,
        "mod_content": mod_content,
    })
}

fn paths_json(paths: &[PathBuf]) -> Vec<Value> {
    paths
        .iter()
        .map(|p| Value::String(p.to_string_lossy().into_owned()))
        .collect()
}

fn run_rules(cli: &Cli, _args: &RulesArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;

    match output_mode(cli) {
        OutputMode::Human => {
            println!("{}", "Denylist (exact match):".bold());
            for (i, entry) in config.rules.denylist.iter().enumerate() {
                println!("  {:>2}. {entry}", i + 1);
            }
            println!();
            println!("{}", "Rename rules (first substring match wins):".bold());
            for (i, rule) in config.rules.renames.iter().enumerate() {
                println!(
                    "  {:>2}. contains {:?} -> {:?}",
                    i + 1,
                    rule.contains,
                    rule.replacement
                );
            }
            Ok(())
        }
        OutputMode::Json => {
            let renames: Vec<Value> = config
                .rules
                .renames
                .iter()
                .map(|rule| {
                    json!({
                        "contains": rule.contains,
                        "replacement": rule.replacement,
                    })
                })
                .collect();
            let payload = json!({
                "command": "rules",
                "denylist": config.rules.denylist,
                "renames": renames,
            });
            write_json_line(&payload)
        }
    }
}

fn run_config(cli: &Cli, args: &ConfigArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;

    match args.command.as_ref().unwrap_or(&ConfigCommand::Show) {
        ConfigCommand::Path => {
            match output_mode(cli) {
                OutputMode::Human => println!("{}", config.paths.config_file.display()),
                OutputMode::Json => {
                    write_json_line(&json!({
                        "command": "config path",
                        "path": config.paths.config_file.to_string_lossy(),
                    }))?;
                }
            }
            Ok(())
        }
        ConfigCommand::Show => match output_mode(cli) {
            OutputMode::Human => {
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| CliError::Internal(e.to_string()))?;
                print!("{rendered}");
                Ok(())
            }
            OutputMode::Json => {
                let value = serde_json::to_value(&config)?;
                write_json_line(&json!({"command": "config show", "config": value}))
            }
        },
        ConfigCommand::Validate => {
            // Load already validates; surviving to this point means OK.
            let hash = config
                .stable_hash()
                .map_err(|e| CliError::Internal(e.to_string()))?;
            match output_mode(cli) {
                OutputMode::Human => println!("Configuration OK (hash {hash})"),
                OutputMode::Json => {
                    write_json_line(&json!({
                        "command": "config validate",
                        "ok": true,
                        "hash": hash,
                    }))?;
                }
            }
            Ok(())
        }
    }
}

fn emit_version(cli: &Cli) -> Result<(), CliError> {
    let version = env!("CARGO_PKG_VERSION");
    match output_mode(cli) {
        OutputMode::Human => {
            println!("fsw {version}");
            if cli.verbose {
                println!("  package: {}", env!("CARGO_PKG_NAME"));
                println!("  description: {}", env!("CARGO_PKG_DESCRIPTION"));
            }
            Ok(())
        }
        OutputMode::Json => {
            let mut payload = json!({
                "command": "version",
                "version": version,
            });
            if cli.verbose
                && let Some(map) = payload.as_object_mut()
            {
                map.insert("package".into(), json!(env!("CARGO_PKG_NAME")));
                map.insert("description".into(), json!(env!("CARGO_PKG_DESCRIPTION")));
            }
            write_json_line(&payload)
        }
    }
}

fn output_mode(cli: &Cli) -> OutputMode {
    if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    }
}

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let line = serde_json::to_string(payload)?;
    println!("{line}");
    Ok(())
}
