#![deny(missing_docs)]
//! POSIX-style glob matching over `/`-delimited paths.
//!
//! This crate compiles a glob pattern into a sequence of per-segment matchers
//! and evaluates candidate paths against it. Supported syntax:
//!
//! - `?` — exactly one character within a segment
//! - `*` — zero or more characters within a segment
//! - `**` — zero or more whole segments
//! - `[...]` — a character class
//! - `@(a|b)`, `?(a|b)`, `+(a|b)`, `*(a|b)`, `!(a|b)` — extglob groups
//! - `\x` — escape of a single character
//!
//! Matching follows POSIX leading-dot semantics: a path segment starting with
//! `.` is only matched by a pattern segment that starts with an explicit
//! literal dot, unless dotfile matching is switched on per call. Brace
//! expansion, tilde expansion and case folding are not supported, and paths
//! are always `/`-delimited regardless of platform.
//!
//! Compilation never fails; any input string is a valid pattern. Malformed
//! constructs such as unterminated brackets degrade instead of erroring.
//!
//! # Example
//!
//! ```
//! use posix_glob::Pattern;
//!
//! let pattern = Pattern::new("src/**/*.rs");
//! assert!(pattern.is_match("src/lib.rs"));
//! assert!(pattern.is_match("src/glob/parse.rs"));
//! assert!(!pattern.is_match("tests/lib.rs"));
//! ```

mod matcher;
mod parse;
mod pattern;
mod segment;

pub use pattern::{is_match, is_match_with, Pattern};
