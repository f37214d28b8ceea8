use anyhow::{Context, Result};
use globset::GlobBuilder;
use ignore::WalkBuilder;
use log::{debug, trace};
use path_clean::clean;
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use crate::config::Config;

const GLOB_MAGIC: &[char] = &['*', '?', '[', '{'];

fn has_glob_magic(pattern: &str) -> bool {
    pattern.contains(GLOB_MAGIC)
}

/// Expand every input pattern (literal path, directory, or glob) into a
/// deduplicated, sorted set of absolute file paths.
///
/// Enumeration is complete before any file is processed; the resolver's
/// known-file set depends on seeing the whole run up front.
pub fn collect_files(cfg: &Config) -> Result<Vec<PathBuf>> {
    debug!("Collecting files from {} patterns", cfg.files.len());
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();

    for pattern in &cfg.files {
        if has_glob_magic(pattern) {
            expand_glob(&cfg.cwd, pattern, cfg.filter.as_deref(), &mut files)?;
        } else {
            let path = clean(cfg.cwd.join(pattern));
            let meta = fs::metadata(&path)
                .with_context(|| format!("no such file or directory: {}", path.display()))?;
            if meta.is_dir() {
                expand_directory(&path, cfg.filter.as_deref(), &mut files)?;
            } else {
                trace!("Literal file: {}", path.display());
                files.insert(path);
            }
        }
    }

    debug!("Collected {} files", files.len());
    Ok(files.into_iter().collect())
}

fn expand_directory(
    dir: &Path,
    filter: Option<&str>,
    files: &mut BTreeSet<PathBuf>,
) -> Result<()> {
    trace!("Expanding directory: {}", dir.display());
    // No gitignore/hidden filtering: compiled output directories are often
    // ignored by git but are exactly what this tool exists to fix
    let walker = WalkBuilder::new(dir).standard_filters(false).build();
    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }
        if let Some(suffix) = filter {
            let name = p.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if !name.ends_with(suffix) {
                trace!("Filtered out by suffix '{}': {}", suffix, p.display());
                continue;
            }
        }
        files.insert(clean(p));
    }
    Ok(())
}

fn expand_glob(
    cwd: &Path,
    pattern: &str,
    filter: Option<&str>,
    files: &mut BTreeSet<PathBuf>,
) -> Result<()> {
    trace!("Expanding glob: '{}'", pattern);
    // "./src/*.js" and "src/*.js" must match the same files
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid glob pattern '{pattern}'"))?
        .compile_matcher();

    let base = glob_base(cwd, pattern);
    trace!("Walking glob base: {}", base.display());
    if !base.exists() {
        // A glob over a missing tree matches nothing
        return Ok(());
    }

    let walker = WalkBuilder::new(&base).standard_filters(false).build();
    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }
        let target = p.strip_prefix(cwd).unwrap_or(p);
        if !matcher.is_match(target) {
            continue;
        }
        if let Some(suffix) = filter {
            let name = p.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if !name.ends_with(suffix) {
                continue;
            }
        }
        trace!("Glob matched: {}", p.display());
        files.insert(clean(p));
    }
    Ok(())
}

/// Longest literal directory prefix of `pattern`, used to bound the walk.
fn glob_base(cwd: &Path, pattern: &str) -> PathBuf {
    let mut base =
        if pattern.starts_with('/') { PathBuf::from("/") } else { cwd.to_path_buf() };
    for comp in pattern.trim_start_matches('/').split('/') {
        if has_glob_magic(comp) {
            break;
        }
        base.push(comp);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn config(root: &Path, files: &[&str], filter: Option<&str>) -> Config {
        Config {
            files: files.iter().map(|s| s.to_string()).collect(),
            cwd: root.canonicalize().unwrap(),
            filter: filter.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_literal_file() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "a.js", "");

        let files = collect_files(&config(temp_dir.path(), &["a.js"], None)).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].is_absolute());
        assert!(files[0].ends_with("a.js"));
    }

    #[test]
    fn test_missing_literal_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let cfg = config(temp_dir.path(), &["nope.js"], None);
        assert!(collect_files(&cfg).is_err());
    }

    #[test]
    fn test_directory_expansion_recurses() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "src/a.js", "");
        create_test_file(temp_dir.path(), "src/nested/b.js", "");

        let files = collect_files(&config(temp_dir.path(), &["src"], None)).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_directory_expansion_honors_suffix_filter() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "src/a.js", "");
        create_test_file(temp_dir.path(), "src/readme.md", "");

        let files = collect_files(&config(temp_dir.path(), &["src"], Some(".js"))).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.js"));
    }

    #[test]
    fn test_glob_expansion() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "src/a.js", "");
        create_test_file(temp_dir.path(), "src/nested/b.js", "");
        create_test_file(temp_dir.path(), "src/c.md", "");

        let files =
            collect_files(&config(temp_dir.path(), &["src/**/*.js"], None)).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "js"));
    }

    #[test]
    fn test_single_star_does_not_cross_directories() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "a.js", "");
        create_test_file(temp_dir.path(), "sub/b.js", "");

        let files = collect_files(&config(temp_dir.path(), &["*.js"], None)).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.js"));
    }

    #[test]
    fn test_dot_slash_prefixed_glob() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "src/a.js", "");

        let files =
            collect_files(&config(temp_dir.path(), &["./src/*.js"], None)).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_overlapping_patterns_deduplicate() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "src/a.js", "");

        let cfg = config(temp_dir.path(), &["src", "src/a.js", "src/*.js"], None);
        let files = collect_files(&cfg).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_output_is_sorted() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "src/z.js", "");
        create_test_file(temp_dir.path(), "src/a.js", "");
        create_test_file(temp_dir.path(), "src/m.js", "");

        let files = collect_files(&config(temp_dir.path(), &["src"], None)).unwrap();
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_glob_over_missing_tree_matches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let files =
            collect_files(&config(temp_dir.path(), &["missing/**/*.js"], None)).unwrap();
        assert!(files.is_empty());
    }
}
