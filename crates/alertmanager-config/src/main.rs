//! CLI for generating `alertmanager.yml` from add-on options.
//!
//! Run `translate-config --help` for usage information.

// CLI binaries legitimately need println! for user output
#![allow(clippy::disallowed_macros)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "translate-config")]
#[command(about = "Generate alertmanager.yml from notification options")]
#[command(version)]
struct Cli {
    /// Options file (JSON)
    input: PathBuf,

    /// Destination for the generated config (YAML)
    output: PathBuf,

    /// Print the generated config to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Usage errors exit 1 like every other failure; --help/--version exit 0.
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Logs go to stderr so --dry-run output stays clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    if cli.dry_run {
        let yaml = alertmanager_config::render(&cli.input)
            .context("Error generating alertmanager config")?;
        print!("{yaml}");
        return Ok(());
    }

    alertmanager_config::run(&cli.input, &cli.output)
        .context("Error generating alertmanager config")?;

    Ok(())
}
