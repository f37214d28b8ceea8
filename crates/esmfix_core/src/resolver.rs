use anyhow::{Context, Result};
use dashmap::DashMap;
use log::{debug, trace};
use path_clean::clean;
use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use crate::constants::{CANDIDATE_SUFFIXES, SCRIPT_EXTENSIONS};
use crate::types::Resolution;

/// Existence-check capability the resolver probes against.
///
/// Decouples the fixed candidate order from any particular substrate: a
/// precomputed file set, the live filesystem, or a test fixture all answer
/// the same question.
pub trait Existence: Sync {
    /// Whether `path` names an existing regular file. Substrate failures
    /// (permissions, malformed paths) are errors, never `false`.
    fn exists(&self, path: &Path) -> Result<bool>;
}

/// Production substrate: membership in the enumerated file set, falling back
/// to a disk lookup for files outside the current run.
#[derive(Debug, Default)]
pub struct FileSet {
    known: HashSet<PathBuf>,
}

impl FileSet {
    pub fn new(files: &[PathBuf]) -> Self {
        Self { known: files.iter().cloned().collect() }
    }
}

impl Existence for FileSet {
    fn exists(&self, path: &Path) -> Result<bool> {
        if self.known.contains(path) {
            trace!("File set hit: {}", path.display());
            return Ok(true);
        }
        match std::fs::metadata(path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                Ok(false)
            }
            Err(e) => {
                Err(e).with_context(|| format!("failed to probe {}", path.display()))
            }
        }
    }
}

/// Shared memo of probe outcomes, keyed by containing directory and raw
/// specifier. Sound because resolution is a pure function of that pair plus
/// the (read-only) existence state.
pub type ResolveCache = DashMap<(PathBuf, String), Resolution>;

/// Determine the canonical resolved form of `specifier` as written in
/// `from_file`, or that none exists.
///
/// Bare package references and specifiers already carrying a canonical
/// script extension pass through unprobed. Everything else is probed in the
/// fixed [`CANDIDATE_SUFFIXES`] order against the containing file's
/// directory; the first candidate that exists wins, so a file always beats a
/// same-named directory.
pub fn resolve<E: Existence>(
    existence: &E,
    from_file: &Path,
    specifier: &str,
    cache: &ResolveCache,
) -> Result<Resolution> {
    // Bare package reference: no relative marker, no path separator
    if !specifier.starts_with('.') && !specifier.contains('/') {
        trace!("Bare specifier '{}', passing through", specifier);
        return Ok(Resolution::AlreadyResolved);
    }

    match Path::new(specifier).extension().and_then(|e| e.to_str()) {
        Some(ext) if SCRIPT_EXTENSIONS.contains(&ext) => {
            trace!("Specifier '{}' already carries '.{}'", specifier, ext);
            return Ok(Resolution::AlreadyResolved);
        }
        Some(ext) => {
            trace!("Specifier '{}' carries unsupported extension '.{}'", specifier, ext);
            return Ok(Resolution::UnsupportedExtension(ext.to_string()));
        }
        None => {}
    }

    let base = from_file.parent().unwrap_or(Path::new(".")).to_path_buf();
    let key = (base.clone(), specifier.to_string());
    if let Some(cached) = cache.get(&key) {
        trace!("Cache hit for '{}' in {}", specifier, base.display());
        return Ok(cached.clone());
    }

    let mut resolution = Resolution::Unresolved;
    for suffix in CANDIDATE_SUFFIXES {
        let candidate = format!("{specifier}{suffix}");
        let path = clean(base.join(&candidate));
        trace!("Probing candidate: {}", path.display());
        if existence.exists(&path)? {
            debug!(
                "Resolved '{}' to '{}' from {}",
                specifier,
                candidate,
                from_file.display()
            );
            resolution = Resolution::Resolved(candidate);
            break;
        }
    }

    cache.insert(key, resolution.clone());
    Ok(resolution)
}
