//! Compiled per-segment state.

use fancy_regex::Regex;

/// One compiled unit of a pattern: a single-segment matcher or a `**`.
#[derive(Debug, Clone)]
pub(crate) enum Segment {
    /// Matches exactly one `/`-delimited path segment.
    Literal(LiteralSegment),
    /// Matches zero or more whole path segments.
    GlobStar,
}

/// An anchored matcher over a single path segment. The compiled expression
/// can never match a string containing `/`.
#[derive(Debug, Clone)]
pub(crate) struct LiteralSegment {
    matcher: Matcher,
    /// Whether the first compiled unit of this segment was an explicit
    /// literal `.` (bare, escaped, or the sole content of a class).
    pub(crate) explicit_leading_dot: bool,
}

#[derive(Debug, Clone)]
enum Matcher {
    /// Fast-path segment without meta characters, compared for equality.
    Exact(String),
    /// Anchored regular expression over one segment.
    Regex(Regex),
    /// A malformed construct produced source that does not compile as a
    /// regular expression; the segment then matches nothing. This keeps
    /// pattern compilation total.
    Never,
}

impl LiteralSegment {
    pub(crate) fn exact(text: &str, explicit_leading_dot: bool) -> LiteralSegment {
        LiteralSegment {
            matcher: Matcher::Exact(text.to_owned()),
            explicit_leading_dot,
        }
    }

    pub(crate) fn anchored(source: &str, explicit_leading_dot: bool) -> LiteralSegment {
        let matcher = match Regex::new(&format!("^{source}$")) {
            Ok(regex) => Matcher::Regex(regex),
            Err(_) => Matcher::Never,
        };
        LiteralSegment {
            matcher,
            explicit_leading_dot,
        }
    }

    /// Test a single path part against this segment.
    pub(crate) fn is_match(&self, part: &str) -> bool {
        match &self.matcher {
            Matcher::Exact(text) => part == text,
            // A runtime error (backtrack limit) counts as no match.
            Matcher::Regex(regex) => regex.is_match(part).unwrap_or(false),
            Matcher::Never => false,
        }
    }
}
