use anyhow::Result;
use log::{debug, info};
use rayon::prelude::*;

use crate::{
    collector::collect_files,
    config::Config,
    engine::process_file,
    resolver::{FileSet, ResolveCache},
    types::{FileResult, Mode, RunReport, RunResult},
};

/// Run one full pass over every file the patterns name.
///
/// Enumeration completes before any file is processed: candidate probing
/// consults the complete known-file set, so a partial set would produce
/// order-dependent false negatives. Files are then processed in parallel;
/// each file's scan-resolve-commit runs as one uninterrupted unit and shares
/// nothing mutable but the resolve memo. Any read/write failure aborts the
/// whole run.
pub fn process_files(cfg: &Config, mode: Mode) -> Result<RunReport> {
    info!("Starting {:?} pass", mode);

    let files = collect_files(cfg)?;
    info!("Processing {} files", files.len());

    let file_set = FileSet::new(&files);
    let cache = ResolveCache::new();

    let results: Vec<FileResult> = files
        .par_iter()
        .map(|file| process_file(mode, file, &file_set, &cache))
        .collect::<Result<_>>()?;

    let mut totals = RunResult::default();
    let mut diagnostics = Vec::new();
    for file_result in results {
        totals.fold(&file_result);
        diagnostics.extend(file_result.diagnostics);
    }

    debug!(
        "Pass complete: {} files, {} resolves, {} errors ({} cached probes)",
        totals.files_processed,
        totals.resolves,
        totals.errors,
        cache.len()
    );

    Ok(RunReport { totals, diagnostics })
}
