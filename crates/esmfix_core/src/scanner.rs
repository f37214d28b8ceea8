use log::trace;
use regex::Regex;
use std::sync::LazyLock;

/// Shallow single-line matcher for `import`/`export ... from '...'`
/// statements. The binding clause is captured opaquely; its internal syntax
/// is never validated. Statements spanning multiple physical lines do not
/// match and pass through untouched (accepted limitation).
static IMPORT_EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\s*)(import|export)\s+(.+?)\s+from\s+(['"])([^'"]+)['"](;?)$"#)
        .expect("import/export pattern is valid")
});

/// A line that structurally matches an import/export-from statement.
///
/// Borrows from the scanned source; alive only for one file's pass.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    /// 1-based line number
    pub line_no: usize,
    /// The untouched full line, staged verbatim when no rewrite is needed
    pub raw: &'a str,
    pub indent: &'a str,
    pub keyword: &'a str,
    /// Binding expression between the keyword and ` from `, preserved
    /// verbatim
    pub binding: &'a str,
    pub quote: char,
    pub specifier: &'a str,
    pub semicolon: bool,
}

impl Candidate<'_> {
    /// Render the line with `specifier` swapped in; everything else is kept
    /// byte for byte.
    pub fn render(&self, specifier: &str) -> String {
        format!(
            "{}{} {} from {q}{}{q}{}",
            self.indent,
            self.keyword,
            self.binding,
            specifier,
            if self.semicolon { ";" } else { "" },
            q = self.quote,
        )
    }
}

#[derive(Debug, Clone)]
pub enum LineRecord<'a> {
    /// Not an import/export-from statement; copied through untouched
    Plain(&'a str),
    Candidate(Candidate<'a>),
}

/// Classify every line of `src`, lazily.
///
/// Lines are split on `\n` with a trailing `\r` stripped, so rewritten files
/// come out LF-normalized (accepted).
pub fn scan(src: &str) -> impl Iterator<Item = LineRecord<'_>> {
    src.lines().enumerate().map(|(idx, line)| match IMPORT_EXPORT_RE.captures(line) {
        Some(caps) => {
            let candidate = Candidate {
                line_no: idx + 1,
                raw: line,
                indent: caps.get(1).map_or("", |m| m.as_str()),
                keyword: caps.get(2).map_or("", |m| m.as_str()),
                binding: caps.get(3).map_or("", |m| m.as_str()),
                quote: caps.get(4).map_or("'", |m| m.as_str()).chars().next().unwrap_or('\''),
                specifier: caps.get(5).map_or("", |m| m.as_str()),
                semicolon: caps.get(6).is_some_and(|m| !m.as_str().is_empty()),
            };
            trace!(
                "Line {} is a candidate: {} '{}'",
                candidate.line_no, candidate.keyword, candidate.specifier
            );
            LineRecord::Candidate(candidate)
        }
        None => LineRecord::Plain(line),
    })
}
