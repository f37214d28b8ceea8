use std::path::PathBuf;

/// Run mode selected by the CLI subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Report specifiers that need resolution, never touch any file
    Check,
    /// Rewrite files in place with resolved specifiers
    Resolve,
}

/// Outcome of resolving a single candidate specifier.
///
/// A failure of the probing substrate itself (permission error, malformed
/// path) is the `Err` arm of the resolver's `Result`, never a variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Specifier is a bare package reference or already carries a canonical
    /// script extension; leave it unchanged
    AlreadyResolved,
    /// Specifier resolves to exactly one candidate form
    Resolved(String),
    /// No candidate form exists
    Unresolved,
    /// Specifier carries a non-script extension; rewriting would be unsafe
    UnsupportedExtension(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// One user-facing diagnostic line, anchored to a file position.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub path: PathBuf,
    pub line: usize,
    pub message: String,
}

/// Per-file outcome of one scan-resolve-commit pass.
#[derive(Debug, Clone, Default)]
pub struct FileResult {
    pub resolves: usize,
    pub errors: usize,
    pub diagnostics: Vec<Diagnostic>,
    /// Full replacement content. Present iff mode is resolve, at least one
    /// line changed, and the file produced zero errors.
    pub rewritten: Option<String>,
}

/// Run-level totals folded from every [`FileResult`].
///
/// A file contributes to `files_ok` iff it had resolves and no errors, to
/// `files_err` iff it had any error; never to both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResult {
    pub files_processed: usize,
    pub files_ok: usize,
    pub files_err: usize,
    pub resolves: usize,
    pub errors: usize,
}

impl RunResult {
    pub(crate) fn fold(&mut self, file: &FileResult) {
        self.files_processed += 1;
        self.resolves += file.resolves;
        self.errors += file.errors;
        if file.errors > 0 {
            self.files_err += 1;
        } else if file.resolves > 0 {
            self.files_ok += 1;
        }
    }
}

/// Everything a run produces: totals for exit-code decisions plus the
/// ordered diagnostics for the reporter.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub totals: RunResult,
    pub diagnostics: Vec<Diagnostic>,
}
