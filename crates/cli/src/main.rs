//! conflictsweep command-line tool.
//!
//! Provides subcommands for resolving merge-conflict markers in a file,
//! listing its conflict blocks, checking marker structure, and generating /
//! validating configuration files.

mod style;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use tracing_subscriber::EnvFilter;

use conflictsweep_core::config::AppConfig;
use conflictsweep_core::conflict::{
    resolve_file, scan_file, ResolveOptions, ScanReport, Side,
};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// conflictsweep command-line tool.
#[derive(Parser, Debug)]
#[command(
    name = "conflictsweep",
    version,
    about = "Resolve merge-conflict markers in a text file by keeping one side"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve conflict markers in a file, overwriting it in place.
    Resolve {
        /// The file to resolve.
        file: PathBuf,

        /// Side to keep: incoming or current.
        #[arg(long)]
        accept: Option<String>,

        /// Overwrite the file directly instead of renaming a temp file into place.
        #[arg(long)]
        no_atomic: bool,
    },

    /// List the conflict blocks in a file without modifying it.
    Scan {
        /// The file to scan.
        file: PathBuf,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check a file for malformed conflict markers.
    Check {
        /// The file to check.
        file: PathBuf,
    },

    /// Generate a default configuration file.
    Init {
        /// Output path for the generated config file.
        #[arg(short, long, default_value = "./conflictsweep.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file.
    Validate,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { output } => cmd_init(&output),
        Commands::Validate => cmd_validate(cli.config.as_deref()),
        _ => {
            let config = AppConfig::load_or_default(cli.config.as_deref())
                .context("failed to load configuration")?;
            init_tracing(&config.log.level);

            match cli.command {
                Commands::Resolve {
                    file,
                    accept,
                    no_atomic,
                } => cmd_resolve(&config, &file, accept.as_deref(), no_atomic),
                Commands::Scan { file, json } => cmd_scan(&file, json),
                Commands::Check { file } => cmd_check(&file),
                _ => unreachable!(),
            }
        }
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .without_time()
        .init();
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_resolve(
    config: &AppConfig,
    file: &Path,
    accept: Option<&str>,
    no_atomic: bool,
) -> Result<()> {
    let mut options = ResolveOptions::from(&config.resolve);
    if let Some(accept) = accept {
        options.side = match accept {
            "incoming" => Side::Incoming,
            "current" => Side::Current,
            other => {
                anyhow::bail!("invalid side '{}': use 'incoming' or 'current'", other);
            }
        };
    }
    if no_atomic {
        options.atomic = false;
    }

    let report = resolve_file(file, &options)
        .with_context(|| format!("failed to resolve '{}'", file.display()))?;

    if report.conflicts_resolved == 0 && !report.changed {
        println!(
            "{}",
            style::success(&format!("No conflict markers in {}", file.display()))
        );
    } else {
        println!(
            "{}",
            style::success(&format!(
                "Resolved {} conflict(s) in {} (kept {} side, removed {} line(s))",
                report.conflicts_resolved,
                file.display(),
                options.side,
                report.lines_removed,
            ))
        );
    }

    Ok(())
}

fn cmd_scan(file: &Path, json: bool) -> Result<()> {
    let report = scan_file(file).with_context(|| format!("failed to scan '{}'", file.display()))?;

    if json {
        return print_scan_json(file, &report);
    }

    if !report.has_conflicts() {
        println!("No conflict blocks found.");
        return Ok(());
    }

    println!();
    println!(
        "{}",
        style::header(&format!(
            "Conflict blocks in {} ({})",
            file.display(),
            report.blocks.len()
        ))
    );
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Start", "Separator", "End", "Current", "Incoming"]);

    for (i, block) in report.blocks.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(block.start_line),
            Cell::new(opt_line(block.separator_line)),
            Cell::new(opt_line(block.end_line)),
            Cell::new(format!("{} line(s)", block.current_lines)),
            Cell::new(format!("{} line(s)", block.incoming_lines)),
        ]);
    }

    println!("{}", table);

    for defect in &report.defects {
        println!("{}", style::warn(&defect.to_string()));
    }

    println!();
    println!(
        "{}",
        style::dim(&format!("{} block(s) shown", report.blocks.len()))
    );

    Ok(())
}

fn print_scan_json(file: &Path, report: &ScanReport) -> Result<()> {
    let payload = serde_json::json!({
        "file": file.display().to_string(),
        "blocks": report.blocks,
        "defects": report.defects.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn cmd_check(file: &Path) -> Result<()> {
    let report = scan_file(file).with_context(|| format!("failed to scan '{}'", file.display()))?;

    if report.is_clean() {
        println!(
            "{}",
            style::success(&format!(
                "{}: {} conflict block(s), markers well-formed",
                file.display(),
                report.blocks.len()
            ))
        );
        return Ok(());
    }

    for defect in &report.defects {
        println!("{}", style::error(&defect.to_string()));
    }
    anyhow::bail!(
        "{} marker defect(s) found in '{}'",
        report.defects.len(),
        file.display()
    );
}

fn cmd_init(output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!(
            "file already exists: {}. Use a different path or remove the existing file.",
            output.display()
        );
    }

    std::fs::write(output, AppConfig::default_template())
        .context("failed to write config file")?;

    println!(
        "{}",
        style::success(&format!(
            "Default configuration written to {}",
            output.display()
        ))
    );
    println!();
    println!("Next steps:");
    println!("  1. Edit the config file to taste");
    println!(
        "  2. Validate with: conflictsweep validate --config {}",
        output.display()
    );

    Ok(())
}

fn cmd_validate(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => AppConfig::default_path()
            .filter(|p| p.exists())
            .context("no configuration file found; pass --config or run 'init' first")?,
    };

    println!("Validating configuration: {}", path.display());
    println!();

    let config =
        AppConfig::load_from_file(&path).context("failed to parse configuration")?;
    println!("  [OK] TOML structure is valid");

    match config.validate() {
        Ok(()) => {
            println!("  [OK] All values are valid");
        }
        Err(e) => {
            println!("  [FAIL] Validation error: {}", e);
            anyhow::bail!("configuration validation failed");
        }
    }

    println!();
    println!("Configuration summary:");
    println!("  Side kept    : {}", config.resolve.side);
    println!(
        "  Write mode   : {}",
        if config.resolve.atomic_write {
            "atomic (temp file + rename)"
        } else {
            "direct overwrite"
        }
    );
    println!("  Log level    : {}", config.log.level);
    println!();
    println!("Configuration is valid.");

    Ok(())
}

// ---------------------------------------------------------------------------
// Utilities
// ---------------------------------------------------------------------------

fn opt_line(line: Option<usize>) -> String {
    line.map(|l| l.to_string()).unwrap_or_else(|| "—".to_string())
}
