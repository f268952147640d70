//! Utility functions for file system operations
//!
//! This module provides helper functions for locating notebook files
//! passed on the command line, either directly or inside directories.

use log::warn;
use std::{
    collections::BTreeSet,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

/// Collect notebook files from a list of input paths
///
/// File paths are taken as-is when their extension matches; directory paths
/// are listed non-recursively and filtered by extension. Paths that are
/// neither a file nor a directory are skipped with a warning. Duplicates are
/// removed and the result is returned in sorted order so that processing is
/// deterministic.
///
/// # Arguments
///
/// * `paths` - The files or directories given on the command line
/// * `extension` - The file extension to filter by, without the leading dot
///
/// # Returns
///
/// A sorted vector of `PathBuf` pointing to all matching notebook files.
///
/// # Errors
///
/// Returns an error if a directory listing fails.
pub fn find_notebook_files(
    paths: &[PathBuf],
    extension: &str,
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = BTreeSet::new();

    for path in paths {
        if path.is_file() {
            if has_extension(path, extension) {
                files.insert(path.clone());
            }
        } else if path.is_dir() {
            for entry in fs::read_dir(path)? {
                let entry = entry?;
                let entry_path = entry.path();

                if entry_path.is_file() && has_extension(&entry_path, extension) {
                    files.insert(entry_path);
                }
            }
        } else {
            warn!("Skipping {:?}: not a file or directory", path);
        }
    }

    Ok(files.into_iter().collect())
}

/**
 * Check whether a path carries the given extension
 *
 * @param path The path to check
 * @param extension Extension without the leading dot
 * @return true if the path's extension matches
 */
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension() == Some(OsStr::new(extension))
}
