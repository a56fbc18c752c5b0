//! High-level counting API.
//!
//! This module provides the tree walker: it visits every entry under a root
//! directory, prunes excluded paths before descending into them, and folds the
//! tally of each recognized text file into a [`CountResult`].

use std::fs;
use std::path::Path;

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::classifier::classify_file;
use crate::error::CountError;
use crate::filter::{is_text_file, ExclusionSet};
use crate::stats::{CountResult, FileTally};
use crate::Result;

/// Check that `path` exists and is a directory.
///
/// Symlinks are followed, so a link to a directory is accepted.
pub fn validate_target(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let metadata =
        fs::metadata(path).map_err(|_| CountError::PathNotFound(path.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(CountError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Walk `root` and aggregate the tallies of all counted files.
///
/// For every entry the full path (parent joined with the entry name) is
/// checked against `excludes` first; an excluded directory is never
/// entered, and an excluded file is never opened. Remaining regular files
/// with a recognized extension are classified. Files that cannot be opened
/// and directories that cannot be read are skipped.
///
/// An excluded (or missing) root yields an empty result.
pub fn walk(root: impl AsRef<Path>, excludes: &ExclusionSet) -> CountResult {
    let root = root.as_ref();
    let mut result = CountResult::new();

    if excludes.is_excluded(root) {
        debug!(path = %root.display(), "root is excluded");
        return result;
    }

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        // root was checked above
        if e.depth() == 0 {
            return true;
        }
        let excluded = excludes.is_excluded(e.path());
        if excluded {
            debug!(path = %e.path().display(), "excluded");
        }
        !excluded
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_text_file(entry.file_name()) {
            continue;
        }

        match classify_file(entry.path()) {
            Ok(tally) => {
                trace!(
                    path = %entry.path().display(),
                    lines = tally.lines,
                    code = tally.code,
                    comment = tally.comment,
                    blank = tally.blank,
                    "counted file"
                );
                result.add_file(tally);
            }
            Err(err) => debug!(error = %err, "skipping file"),
        }
    }

    result
}

/// Count lines in a directory.
///
/// Fails with [`CountError::PathNotFound`] or [`CountError::NotADirectory`]
/// before any traversal if `path` is not a usable target.
///
/// # Example
///
/// ```rust,ignore
/// use countlineslib::{count_directory, ExclusionSet};
///
/// let result = count_directory("src/", &ExclusionSet::with_defaults())?;
/// println!("{} files, {} lines", result.file_count, result.lines());
/// ```
pub fn count_directory(path: impl AsRef<Path>, excludes: &ExclusionSet) -> Result<CountResult> {
    let path = path.as_ref();
    validate_target(path)?;
    Ok(walk(path, excludes))
}

/// Count lines in a single file.
pub fn count_file(path: impl AsRef<Path>) -> Result<FileTally> {
    classify_file(path)
}
