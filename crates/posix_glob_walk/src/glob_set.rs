//! Ordered include/exclude filtering over `/`-delimited paths.

use std::path::{Path, PathBuf};

use itertools::{Either, Itertools};
use posix_glob::Pattern;
use thiserror::Error;

use crate::walk;

/// A compiled set of include and exclude glob patterns.
///
/// A leading `!` marks a pattern as an exclusion. A path is selected when it
/// matches at least one include pattern and no exclude pattern; an empty
/// include list selects nothing. The set is immutable after construction and
/// safe to share across threads.
#[derive(Debug, Clone)]
pub struct GlobSet {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
    include_dot: bool,
}

/// Errors that can occur when creating or walking a glob set.
#[derive(Error, Debug)]
pub enum GlobSetError {
    /// A pattern consisting only of `!` excludes nothing and is almost
    /// certainly a typo.
    #[error("exclude pattern `!` is missing a pattern body")]
    EmptyExclude,

    /// An error occurred while walking the directory tree.
    #[error("failed to walk {}", .0.display())]
    Walk(PathBuf, #[source] walkdir::Error),
}

impl GlobSet {
    /// Create a [`GlobSet`] from a list of patterns. Leading `!` indicates
    /// exclusion. Pattern compilation itself cannot fail.
    ///
    /// # Errors
    /// Returns [`GlobSetError::EmptyExclude`] for a bare `!` pattern.
    pub fn create<'t>(globs: impl IntoIterator<Item = &'t str>) -> Result<GlobSet, GlobSetError> {
        let (excludes, includes): (Vec<&str>, Vec<&str>) =
            globs.into_iter().partition_map(|glob| match glob.strip_prefix('!') {
                Some(exclude) => Either::Left(exclude),
                None => Either::Right(glob),
            });

        if excludes.iter().any(|exclude| exclude.is_empty()) {
            return Err(GlobSetError::EmptyExclude);
        }

        Ok(GlobSet {
            includes: includes.into_iter().map(Pattern::new).collect(),
            excludes: excludes.into_iter().map(Pattern::new).collect(),
            include_dot: false,
        })
    }

    /// Switch dotfile matching on or off for the whole set. Off by default:
    /// wildcards then skip path parts starting with `.` unless a pattern
    /// names the dot explicitly.
    #[must_use]
    pub fn include_dot(mut self, include_dot: bool) -> GlobSet {
        self.include_dot = include_dot;
        self
    }

    /// Whether `path` matches at least one include pattern and no exclude
    /// pattern. `path` must be `/`-delimited.
    pub fn is_match(&self, path: &str) -> bool {
        self.includes
            .iter()
            .any(|pattern| pattern.is_match_with(path, self.include_dot))
            && !self
                .excludes
                .iter()
                .any(|pattern| pattern.is_match_with(path, self.include_dot))
    }

    /// Walks `root_dir` and returns the relative, `/`-delimited paths of all
    /// matching files, sorted for determinism. A missing or non-directory
    /// root yields an empty result.
    ///
    /// # Errors
    /// Returns [`GlobSetError::Walk`] when the traversal fails.
    pub fn collect_matching(&self, root_dir: &Path) -> Result<Vec<PathBuf>, GlobSetError> {
        if !root_dir.is_dir() {
            return Ok(vec![]);
        }
        walk::collect_matching(self, root_dir)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use fs_err::{self as fs, File};
    use insta::assert_yaml_snapshot;
    use rstest::rstest;
    use tempfile::tempdir;

    use super::GlobSet;

    fn touch(path: PathBuf) {
        File::create(path).unwrap();
    }

    fn collected(set: &GlobSet, root: &Path) -> Vec<String> {
        set.collect_matching(root)
            .unwrap()
            .into_iter()
            .map(|path| path.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[rstest]
    #[case::included("src/lib.rs", true)]
    #[case::included_deep("src/a/b/mod.rs", true)]
    #[case::second_include("docs/readme.md", true)]
    #[case::excluded("src/generated/bindings.rs", false)]
    #[case::include_is_segment_exact("docs/deep/readme.md", false)]
    #[case::unmatched("build.rs", false)]
    fn is_match_requires_include_and_no_exclude(#[case] path: &str, #[case] expected: bool) {
        let set = GlobSet::create(vec!["src/**/*.rs", "docs/*.md", "!src/generated/**"]).unwrap();
        assert_eq!(set.is_match(path), expected);
    }

    #[test]
    fn empty_include_list_selects_nothing() {
        let set = GlobSet::create(vec!["!*.rs"]).unwrap();
        assert!(!set.is_match("lib.rs"));
        assert!(!set.is_match("anything"));
    }

    #[test]
    fn bare_exclude_is_rejected() {
        assert!(GlobSet::create(vec!["*.rs", "!"]).is_err());
    }

    #[test]
    fn collect_matching_inclusion_exclusion() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();

        touch(root.join("include1.txt"));
        touch(root.join("include2.log"));
        touch(root.join("exclude.txt"));
        fs::create_dir(root.join("subdir")).unwrap();
        touch(root.join("subdir/include_subdir.txt"));

        let set = GlobSet::create(vec!["**/*.txt", "!exclude.txt"]).unwrap();
        assert_yaml_snapshot!(collected(&set, root), @r###"
        - include1.txt
        - subdir/include_subdir.txt
        "###);
    }

    #[test]
    fn literal_patterns_are_anchored_to_the_root() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();

        touch(root.join("config.toml"));
        fs::create_dir(root.join("subdir")).unwrap();
        touch(root.join("subdir/config.toml"));

        let set = GlobSet::create(vec!["config.toml"]).unwrap();
        assert_yaml_snapshot!(collected(&set, root), @"- config.toml");
    }

    #[test]
    fn hidden_files_are_skipped_by_default() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join(".cache")).unwrap();
        touch(root.join(".cache/entry.txt"));
        touch(root.join(".hidden.txt"));
        touch(root.join("visible.txt"));

        let set = GlobSet::create(vec!["**/*.txt"]).unwrap();
        assert_yaml_snapshot!(collected(&set, root), @"- visible.txt");

        let set = set.include_dot(true);
        assert_yaml_snapshot!(collected(&set, root), @r###"
        - ".cache/entry.txt"
        - ".hidden.txt"
        - visible.txt
        "###);
    }

    #[test]
    fn explicit_dot_pattern_reaches_into_hidden_dirs() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join(".cache")).unwrap();
        touch(root.join(".cache/entry.txt"));
        touch(root.join("visible.txt"));

        let set = GlobSet::create(vec![".cache/**"]).unwrap();
        assert_yaml_snapshot!(collected(&set, root), @r###"- ".cache/entry.txt""###);
    }

    #[test]
    fn missing_root_yields_empty() {
        let temp_dir = tempdir().unwrap();
        let set = GlobSet::create(vec!["**"]).unwrap();
        assert!(collected(&set, &temp_dir.path().join("nope")).is_empty());
    }
}
