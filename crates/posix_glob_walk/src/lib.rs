#![deny(missing_docs)]
//! Filesystem consumers of the [`posix_glob`] matcher.
//!
//! This crate provides:
//! - [`GlobSet`] — an ordered include/exclude pattern list (exclusion marked
//!   with a leading `!`) evaluated against `/`-delimited paths, plus a
//!   directory walker collecting the matching files under a root.
//! - [`GlobHash`] — a deterministic combined SHA-256 digest over all files a
//!   glob set selects, useful for cache invalidation.
//! - [`file_sha256`] — the streaming digest of one file.
//!
//! Pattern semantics come entirely from [`posix_glob`]: POSIX leading-dot
//! handling, `?`/`*`/`**`, bracket classes and extglobs, no brace expansion.
//! Hidden files are therefore skipped unless a pattern names the dot
//! explicitly or the set is switched to [`GlobSet::include_dot`].

mod glob_hash;
mod glob_set;
mod walk;

pub use glob_hash::{file_sha256, GlobHash, GlobHashError, Sha256Hash};
pub use glob_set::{GlobSet, GlobSetError};
