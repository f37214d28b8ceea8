use colored::Colorize;
use std::io::{self, Write};

use crate::types::{Diagnostic, RunResult, Severity};

/// Print per-line diagnostics in `<severity>: at <path>:<line>: <message>`
/// form to the given sink (the diagnostic stream, stderr in the binary).
pub fn print_diagnostics<W: Write>(writer: &mut W, diagnostics: &[Diagnostic]) -> io::Result<()> {
    for d in diagnostics {
        let prefix = match d.severity {
            Severity::Error => "error:".red().bold(),
            Severity::Info => "info:".cyan(),
        };
        writeln!(writer, "{} at {}:{}: {}", prefix, d.path.display(), d.line, d.message)?;
    }
    writer.flush()?;
    Ok(())
}

/// Resolve-mode summary: a fix line when anything was rewritten, an error
/// line when any file failed.
pub fn print_resolve_summary<W: Write>(writer: &mut W, totals: &RunResult) -> io::Result<()> {
    if totals.files_ok > 0 {
        writeln!(
            writer,
            "Processed {} files, fixed {} in {} files.",
            totals.files_processed, totals.resolves, totals.files_ok
        )?;
    }
    if totals.files_err > 0 {
        writeln!(
            writer,
            "{}",
            format!("Found {} errors in {} files.", totals.errors, totals.files_err).red()
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Check-mode summary: always the processed count, plus a findings line when
/// any file needs fixing or failed.
pub fn print_check_summary<W: Write>(writer: &mut W, totals: &RunResult) -> io::Result<()> {
    writeln!(writer, "Processed {} files.", totals.files_processed)?;
    let flagged = totals.files_ok + totals.files_err;
    if flagged > 0 {
        writeln!(
            writer,
            "{}",
            format!(
                "Found {} invalid relative import/exports in {} files.",
                totals.resolves, flagged
            )
            .yellow()
        )?;
    }
    writer.flush()?;
    Ok(())
}
