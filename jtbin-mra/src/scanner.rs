//! Directory scanner for MRA descriptor trees.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Collect every non-directory entry under `dir` whose file name ends with
/// `suffix`, depth-first in lexical order.
///
/// Unreadable entries are logged and skipped; an unreadable `dir` yields an
/// empty list.
pub fn scan_descriptors(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable path: {e}");
                continue;
            }
        };
        if !entry.file_type().is_dir() && has_suffix(entry.file_name(), suffix) {
            files.push(entry.into_path());
        }
    }

    files
}

fn has_suffix(name: &OsStr, suffix: &str) -> bool {
    name.to_str().is_some_and(|n| n.ends_with(suffix))
}
