//! Candidate file discovery
//!
//! Directories are walked recursively and filtered by file name; files
//! named explicitly are taken as-is. Problems with one path are collected
//! and never stop the others from being searched.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{Config, Error};

/// Files found and paths that could not be searched
#[derive(Debug, Default)]
pub struct Discovery {
    /// Candidate files, sorted and de-duplicated
    pub files: Vec<PathBuf>,
    /// One entry per path or directory entry that failed
    pub errors: Vec<Error>,
}

/// Discover candidate files under the given roots.
pub fn discover(roots: &[PathBuf], config: &Config) -> Discovery {
    let mut files = BTreeSet::new();
    let mut errors = Vec::new();

    for root in roots {
        let metadata = match std::fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(e) => {
                errors.push(Error::io(root, e));
                continue;
            }
        };

        if metadata.is_file() {
            files.insert(canonical(root));
            continue;
        }

        walk_dir(root, config, &mut files, &mut errors);
    }

    debug!(files = files.len(), errors = errors.len(), "discovery finished");
    Discovery {
        files: files.into_iter().collect(),
        errors,
    }
}

fn walk_dir(root: &Path, config: &Config, files: &mut BTreeSet<PathBuf>, errors: &mut Vec<Error>) {
    let walker = WalkDir::new(root)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !config.is_excluded_dir(&entry.file_name().to_string_lossy())
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                errors.push(Error::Walk {
                    path,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if entry.file_type().is_file()
            && config.matches_file_name(&entry.file_name().to_string_lossy())
        {
            files.insert(canonical(entry.path()));
        }
    }
}

/// Resolve to a stable path so a file reached twice is only processed once.
fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
