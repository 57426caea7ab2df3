//! Deterministic hashing over files selected by a glob set.
//!
//! Use [`GlobHash`] to find out whether a set of inputs changed without
//! recording every file individually, e.g. for rebuild decisions.

use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::{GlobSet, GlobSetError};

/// The digest type produced by [`GlobHash`] and [`file_sha256`].
pub type Sha256Hash = sha2::digest::Output<Sha256>;

/// A hash of the files that match a set of glob patterns.
#[derive(Debug, Clone, Default)]
pub struct GlobHash {
    /// Combined digest over the matched relative paths and file contents.
    pub hash: Sha256Hash,
    #[cfg(test)]
    matching_files: Vec<String>,
}

/// Errors that can occur when computing a file hash.
#[derive(Error, Debug)]
pub enum GlobHashError {
    /// Failed to open or read a matched file.
    #[error("failed to read {}", .0.display())]
    Read(PathBuf, #[source] io::Error),

    /// An error occurred while building or walking the glob set.
    #[error(transparent)]
    GlobSet(#[from] GlobSetError),
}

impl GlobHash {
    /// Calculate a combined hash of the files matching `globs` under
    /// `root_dir`.
    ///
    /// Matched files are sorted by relative path; each path (in `/`-delimited
    /// form) and then the file content are fed into a single SHA-256 hasher,
    /// so the result is independent of walk order and platform separators.
    /// A missing or non-directory root hashes as the empty selection.
    ///
    /// # Errors
    /// Returns an error for invalid glob sets, traversal failures, or
    /// unreadable files.
    ///
    /// # Example
    /// ```no_run
    /// use std::path::Path;
    /// use posix_glob_walk::GlobHash;
    ///
    /// let hash = GlobHash::from_patterns(
    ///     Path::new("/my/project"),
    ///     ["src/**/*.rs", "!src/generated/**"],
    /// )?;
    /// println!("inputs: {:x}", hash.hash);
    /// # Ok::<_, posix_glob_walk::GlobHashError>(())
    /// ```
    pub fn from_patterns<'t>(
        root_dir: &Path,
        globs: impl IntoIterator<Item = &'t str>,
    ) -> Result<GlobHash, GlobHashError> {
        if !root_dir.is_dir() {
            return Ok(GlobHash::default());
        }

        let glob_set = GlobSet::create(globs)?;
        // Already sorted by relative path.
        let entries = glob_set.collect_matching(root_dir)?;

        #[cfg(test)]
        let mut matching_files = Vec::new();

        let mut hasher = Sha256::new();
        for relative in entries {
            let normalized = relative.to_string_lossy().replace('\\', "/");
            hasher.update(normalized.as_bytes());

            #[cfg(test)]
            matching_files.push(normalized);

            let absolute = root_dir.join(&relative);
            hash_file_into(&absolute, &mut hasher)?;
        }

        Ok(GlobHash {
            hash: hasher.finalize(),
            #[cfg(test)]
            matching_files,
        })
    }
}

/// Returns the lower-hex SHA-256 digest of a single file, read as a stream.
///
/// # Errors
/// Returns [`GlobHashError::Read`] when the file cannot be opened or read.
pub fn file_sha256(path: &Path) -> Result<String, GlobHashError> {
    let mut hasher = Sha256::new();
    hash_file_into(path, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

fn hash_file_into(path: &Path, hasher: &mut Sha256) -> Result<(), GlobHashError> {
    let mut file =
        fs_err::File::open(path).map_err(|err| GlobHashError::Read(path.to_path_buf(), err))?;
    io::copy(&mut file, hasher).map_err(|err| GlobHashError::Read(path.to_path_buf(), err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use fs_err as fs;
    use insta::assert_yaml_snapshot;
    use tempfile::tempdir;

    use super::{file_sha256, GlobHash};

    #[test]
    fn file_sha256_of_known_contents() {
        let temp_dir = tempdir().unwrap();
        let empty = temp_dir.path().join("empty");
        fs::write(&empty, b"").unwrap();
        assert_eq!(
            file_sha256(&empty).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        let hello = temp_dir.path().join("hello");
        fs::write(&hello, b"hello").unwrap();
        assert_eq!(
            file_sha256(&hello).unwrap(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn file_sha256_of_missing_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        assert!(file_sha256(&temp_dir.path().join("nope")).is_err());
    }

    #[test]
    fn glob_hash_is_deterministic_and_content_sensitive() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("src")).unwrap();
        fs::write(root.join("src/lib.rs"), b"pub fn f() {}").unwrap();
        fs::write(root.join("src/main.rs"), b"fn main() {}").unwrap();
        fs::write(root.join("notes.txt"), b"ignore me").unwrap();

        let globs = ["src/**/*.rs"];
        let first = GlobHash::from_patterns(root, globs).unwrap();
        let again = GlobHash::from_patterns(root, globs).unwrap();
        assert_eq!(first.hash, again.hash);
        assert_yaml_snapshot!(first.matching_files, @r###"
        - src/lib.rs
        - src/main.rs
        "###);

        // Content changes change the hash.
        fs::write(root.join("src/lib.rs"), b"pub fn g() {}").unwrap();
        let changed = GlobHash::from_patterns(root, globs).unwrap();
        assert_ne!(first.hash, changed.hash);

        // Unmatched files do not contribute.
        fs::write(root.join("notes.txt"), b"still ignored").unwrap();
        let still = GlobHash::from_patterns(root, globs).unwrap();
        assert_eq!(changed.hash, still.hash);
    }

    #[test]
    fn glob_hash_is_sensitive_to_paths_not_roots() {
        let left = tempdir().unwrap();
        let right = tempdir().unwrap();
        for root in [left.path(), right.path()] {
            fs::write(root.join("input.txt"), b"same bytes").unwrap();
        }

        let left_hash = GlobHash::from_patterns(left.path(), ["*.txt"]).unwrap();
        let right_hash = GlobHash::from_patterns(right.path(), ["*.txt"]).unwrap();
        // Same relative layout under different roots hashes identically.
        assert_eq!(left_hash.hash, right_hash.hash);

        // A rename changes the hash even with identical contents.
        fs::rename(right.path().join("input.txt"), right.path().join("renamed.txt")).unwrap();
        let renamed = GlobHash::from_patterns(right.path(), ["*.txt"]).unwrap();
        assert_ne!(left_hash.hash, renamed.hash);
    }

    #[test]
    fn missing_root_hashes_as_empty_selection() {
        let temp_dir = tempdir().unwrap();
        let missing = GlobHash::from_patterns(&temp_dir.path().join("nope"), ["**"]).unwrap();
        let empty = GlobHash::default();
        assert_eq!(missing.hash, empty.hash);
    }
}
