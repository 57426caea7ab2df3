//! The public pattern handle and one-shot matching helpers.

use crate::{matcher, parse, segment::Segment};

/// A compiled glob pattern.
///
/// Compile once with [`Pattern::new`] and reuse across any number of path
/// evaluations; the compiled form is immutable and `Send + Sync`, so it can
/// be shared between threads freely. Matching is a pure function of the
/// pattern and the path, with no hidden state across calls.
#[derive(Debug, Clone)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile `pattern`. This never fails: every input string is a valid
    /// pattern, and malformed constructs (unterminated brackets or groups,
    /// trailing backslashes) degrade as described in the crate docs.
    pub fn new(pattern: &str) -> Pattern {
        Pattern {
            segments: parse::compile(pattern),
        }
    }

    /// Match a `/`-delimited path with POSIX dotfile semantics: path parts
    /// starting with `.` only match pattern segments that name the dot
    /// explicitly.
    pub fn is_match(&self, path: &str) -> bool {
        self.is_match_with(path, false)
    }

    /// Match a `/`-delimited path. When `include_dot` is true the
    /// leading-dot rule is lifted and wildcards match dotfiles too.
    pub fn is_match_with(&self, path: &str, include_dot: bool) -> bool {
        matcher::match_path(&self.segments, path, include_dot)
    }
}

impl From<&str> for Pattern {
    fn from(pattern: &str) -> Pattern {
        Pattern::new(pattern)
    }
}

/// One-shot compile-and-match. Compilation cost is paid per call; hold a
/// [`Pattern`] when matching many paths against one pattern.
pub fn is_match(pattern: &str, path: &str) -> bool {
    Pattern::new(pattern).is_match(path)
}

/// One-shot compile-and-match with an explicit dotfile switch.
pub fn is_match_with(pattern: &str, path: &str, include_dot: bool) -> bool {
    Pattern::new(pattern).is_match_with(path, include_dot)
}
