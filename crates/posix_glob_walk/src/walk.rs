//! Directory traversal feeding a [`GlobSet`].

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::glob_set::{GlobSet, GlobSetError};

/// Walk `root_dir`, match every file's relative path against `set`, and
/// return the matches sorted by path.
pub(crate) fn collect_matching(
    set: &GlobSet,
    root_dir: &Path,
) -> Result<Vec<PathBuf>, GlobSetError> {
    let mut matched = Vec::new();

    for entry in WalkDir::new(root_dir) {
        let entry = entry.map_err(|err| GlobSetError::Walk(root_dir.to_path_buf(), err))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root_dir).unwrap_or(entry.path());
        let Some(candidate) = relative.to_str() else {
            tracing::warn!(path = %relative.display(), "skipping non-UTF-8 path");
            continue;
        };

        // The matcher only understands `/`-delimited paths.
        let candidate = candidate.replace('\\', "/");
        if set.is_match(&candidate) {
            matched.push(PathBuf::from(candidate));
        }
    }

    matched.sort();
    Ok(matched)
}
