use anyhow::{Context, Result};
use log::{debug, trace};
use std::{borrow::Cow, fs, path::Path};

use crate::resolver::{self, Existence, ResolveCache};
use crate::scanner::{self, LineRecord};
use crate::types::{Diagnostic, FileResult, Mode, Resolution, Severity};

/// Run one file's scan-resolve-commit transaction.
///
/// Read/write failures abort the run; everything resolution-related is
/// collected into the returned [`FileResult`] instead.
pub fn process_file<E: Existence>(
    mode: Mode,
    path: &Path,
    existence: &E,
    cache: &ResolveCache,
) -> Result<FileResult> {
    debug!("Processing {}", path.display());
    let src = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let result = resolve_lines(mode, path, &src, existence, cache)?;

    if let Some(content) = &result.rewritten {
        debug!("Committing {} resolved lines to {}", result.resolves, path.display());
        fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(result)
}

fn push_diag(
    result: &mut FileResult,
    path: &Path,
    line: usize,
    severity: Severity,
    message: String,
) {
    result.diagnostics.push(Diagnostic { severity, path: path.to_path_buf(), line, message });
}

/// Scan `src`, resolve every candidate line, and stage the replacement
/// content. Pure with respect to the filesystem; the caller commits.
///
/// Staged lines are only folded into a rewrite buffer when the whole file
/// resolved cleanly: one unresolved line discards every staged change.
pub(crate) fn resolve_lines<E: Existence>(
    mode: Mode,
    path: &Path,
    src: &str,
    existence: &E,
    cache: &ResolveCache,
) -> Result<FileResult> {
    let mut result = FileResult::default();
    let mut staged: Vec<Cow<'_, str>> = Vec::new();
    let mut dirty = false;

    for record in scanner::scan(src) {
        match record {
            LineRecord::Plain(line) => {
                if mode == Mode::Resolve {
                    staged.push(Cow::Borrowed(line));
                }
            }
            LineRecord::Candidate(candidate) => {
                let line_no = candidate.line_no;
                match resolver::resolve(existence, path, candidate.specifier, cache) {
                    Ok(Resolution::AlreadyResolved) => {
                        trace!("Line {} already resolved", candidate.line_no);
                        if mode == Mode::Resolve {
                            staged.push(Cow::Borrowed(candidate.raw));
                        }
                    }
                    Ok(Resolution::Resolved(new_spec)) => {
                        result.resolves += 1;
                        if mode == Mode::Resolve {
                            push_diag(
                                &mut result,
                                path,
                                line_no,
                                Severity::Info,
                                format!(
                                    "resolved module '{}' to '{}'",
                                    candidate.specifier, new_spec
                                ),
                            );
                            staged.push(Cow::Owned(candidate.render(&new_spec)));
                            dirty = true;
                        } else {
                            push_diag(
                                &mut result,
                                path,
                                line_no,
                                Severity::Info,
                                format!(
                                    "module '{}' should be resolved to '{}'",
                                    candidate.specifier, new_spec
                                ),
                            );
                        }
                    }
                    Ok(Resolution::Unresolved) => {
                        result.errors += 1;
                        push_diag(
                            &mut result,
                            path,
                            line_no,
                            Severity::Error,
                            format!("unresolved module '{}'", candidate.specifier),
                        );
                        if mode == Mode::Resolve {
                            staged.push(Cow::Borrowed(candidate.raw));
                        }
                    }
                    Ok(Resolution::UnsupportedExtension(ext)) => {
                        result.errors += 1;
                        push_diag(
                            &mut result,
                            path,
                            line_no,
                            Severity::Error,
                            format!(
                                "unsupported extension '.{}' in module '{}'",
                                ext, candidate.specifier
                            ),
                        );
                        if mode == Mode::Resolve {
                            staged.push(Cow::Borrowed(candidate.raw));
                        }
                    }
                    Err(cause) => {
                        result.errors += 1;
                        push_diag(
                            &mut result,
                            path,
                            line_no,
                            Severity::Error,
                            format!(
                                "failed to resolve module '{}': {:#}",
                                candidate.specifier, cause
                            ),
                        );
                        if mode == Mode::Resolve {
                            staged.push(Cow::Borrowed(candidate.raw));
                        }
                    }
                }
            }
        }
    }

    // Commit rule: all-or-nothing. Partial rewrites are never persisted.
    if mode == Mode::Resolve && dirty && result.errors == 0 {
        let mut content = staged.join("\n");
        if src.ends_with('\n') {
            content.push('\n');
        }
        result.rewritten = Some(content);
    }

    Ok(result)
}
