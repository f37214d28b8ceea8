//! Relative module specifier resolution for ESM import/export statements.
//!
//! This crate scans source files for single-line `import`/`export ... from`
//! statements whose relative specifiers lack a file extension, determines the
//! one correct resolved form (`./util` → `./util.js` or `./util/index.js`),
//! and either reports the findings (check mode) or rewrites each file in
//! place (resolve mode). Rewrites are transactional per file: a file is only
//! written when every one of its specifiers resolved cleanly.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use esmfix_core::{Config, Mode, process_files};
//! use std::io::{self, BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut cfg = Config {
//!     files: vec!["dist".to_string()],
//!     cwd: std::path::PathBuf::from("/path/to/project"),
//!     filter: Some(".js".to_string()),
//! };
//! cfg.initialize()?;
//!
//! let report = process_files(&cfg, Mode::Resolve)?;
//!
//! esmfix_core::print_diagnostics(&mut io::stderr(), &report.diagnostics)?;
//! let mut stdout = BufWriter::new(io::stdout());
//! esmfix_core::print_resolve_summary(&mut stdout, &report.totals)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod collector;
mod config;
mod constants;
mod engine;
mod reporter;
mod resolver;
mod runner;
mod scanner;
mod types;

// Re-export public API
pub use config::Config;
pub use constants::{CANDIDATE_SUFFIXES, SCRIPT_EXTENSIONS};
pub use reporter::{print_check_summary, print_diagnostics, print_resolve_summary};
pub use resolver::{Existence, FileSet, ResolveCache, resolve};
pub use runner::process_files;
pub use types::{Diagnostic, FileResult, Mode, Resolution, RunReport, RunResult, Severity};
