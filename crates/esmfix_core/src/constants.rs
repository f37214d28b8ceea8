//! Constants for specifier extensions and resolution candidates.
//!
//! This module centralizes the extension tables used by the resolver so the
//! "already resolved" test and the candidate probe list cannot drift apart.
//!
//! ## Canonical Script Extensions
//!
//! - `.js`: ES module script (the extension the resolver prefers)
//! - `.mjs`: explicit ES module script
//!
//! A specifier that already carries one of these is left untouched. Both must
//! be canonical because probing can produce `.mjs` forms; treating `.mjs` as
//! unsupported would make a second run reject its own output.

/// Extensions a relative specifier may already carry without needing
/// resolution
pub const SCRIPT_EXTENSIONS: &[&str] = &[
    "js",  // ES module script
    "mjs", // explicit ES module script
];

/// Suffixes appended to an extensionless specifier when probing, in priority
/// order. Order is significant: a file always beats a same-named directory.
pub const CANDIDATE_SUFFIXES: &[&str] = &[".js", "/index.js", ".mjs", "/index.mjs"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_extensions_cover_probe_output() {
        // Every extension the probe list can produce must be canonical,
        // otherwise a second run would reject the first run's rewrites
        for suffix in CANDIDATE_SUFFIXES {
            let ext = suffix.rsplit('.').next().unwrap();
            assert!(
                SCRIPT_EXTENSIONS.contains(&ext),
                "candidate suffix '{}' produces non-canonical extension '{}'",
                suffix,
                ext
            );
        }
    }

    #[test]
    fn test_candidate_order_prefers_file_over_index() {
        // The first two candidates decide the file-vs-directory tie
        assert_eq!(CANDIDATE_SUFFIXES[0], ".js");
        assert_eq!(CANDIDATE_SUFFIXES[1], "/index.js");
    }

    #[test]
    fn test_candidate_order_prefers_js_over_mjs() {
        let js_pos = CANDIDATE_SUFFIXES.iter().position(|s| *s == ".js").unwrap();
        let mjs_pos = CANDIDATE_SUFFIXES.iter().position(|s| *s == ".mjs").unwrap();
        assert!(js_pos < mjs_pos);
    }
}
