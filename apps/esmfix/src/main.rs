use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use esmfix_core::{Config, Mode};
use log::{debug, info};
use std::io::{self, BufWriter, Write};

#[derive(Parser)]
#[command(name = "esmfix")]
#[command(about = "Resolve relative module specifiers in ESM import/export statements", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve relative modules without extensions in import/export
    /// statements, rewriting files in place
    Resolve(Config),
    /// Check if import/export statements are correct for ESM, without
    /// modifying anything
    Check(Config),
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    // Exit codes: 0 clean, 1 findings/errors, 2 fatal (bad arguments, I/O)
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            2
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    debug!("Parsed CLI arguments: {:?}", cli.command);

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(io::stdout());
    let mut stderr = io::stderr();

    match cli.command {
        Commands::Resolve(mut cfg) => {
            cfg.initialize()?;
            info!("Running resolve on {} patterns in {:?}", cfg.files.len(), cfg.cwd);

            let report = esmfix_core::process_files(&cfg, Mode::Resolve)?;
            esmfix_core::print_diagnostics(&mut stderr, &report.diagnostics)?;
            esmfix_core::print_resolve_summary(&mut stdout, &report.totals)?;
            stdout.flush()?;

            Ok(if report.totals.files_err > 0 { 1 } else { 0 })
        }
        Commands::Check(mut cfg) => {
            cfg.initialize()?;
            info!("Running check on {} patterns in {:?}", cfg.files.len(), cfg.cwd);

            let report = esmfix_core::process_files(&cfg, Mode::Check)?;
            esmfix_core::print_diagnostics(&mut stderr, &report.diagnostics)?;
            esmfix_core::print_check_summary(&mut stdout, &report.totals)?;
            stdout.flush()?;

            let flagged = report.totals.files_ok + report.totals.files_err;
            Ok(if flagged > 0 { 1 } else { 0 })
        }
    }
}
