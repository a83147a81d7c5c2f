//! Search for and removal of leftover nova-tracer session directories.
//!
//! Projects traced by nova-tracer keep per-session logs under a
//! `.nova-tracer` directory at the project root. Finding them requires a walk
//! of the user's home directory, so the walk is bounded by depth, does not
//! follow symlinks, and never descends into a directory it has matched.

use crate::errors::ErrorCode;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Name of the per-project session data directory.
pub const SESSION_DIR_NAME: &str = ".nova-tracer";

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Sweep root {} does not exist or is not a directory", root.display())]
    RootMissing { root: PathBuf },

    #[error("Refusing to delete {}: not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Failed to delete {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SweepError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SweepError::RootMissing { .. } => ErrorCode::SweepRootMissing,
            SweepError::NotADirectory { .. } | SweepError::Delete { .. } => {
                ErrorCode::SweepDeleteFailed
            }
        }
    }
}

/// Where and how deep to look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepOptions {
    pub root: PathBuf,
    pub dir_name: String,
    /// Deepest level below `root` at which a match is reported.
    pub max_depth: usize,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            root: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            dir_name: SESSION_DIR_NAME.to_string(),
            max_depth: 5,
        }
    }
}

impl SweepOptions {
    pub fn find(&self) -> Result<Vec<SweepMatch>, SweepError> {
        find(&self.root, &self.dir_name, self.max_depth)
    }
}

/// A session directory found by [`find`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepMatch {
    pub path: PathBuf,
    /// Total size of regular files beneath `path`.
    pub size_bytes: u64,
}

/// Collect every directory named `name` at most `max_depth` levels below `root`.
///
/// `root` itself is never reported. Unreadable subtrees are skipped.
pub fn find(root: &Path, name: &str, max_depth: usize) -> Result<Vec<SweepMatch>, SweepError> {
    if !root.is_dir() {
        return Err(SweepError::RootMissing {
            root: root.to_path_buf(),
        });
    }

    let mut matches = Vec::new();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("skipping unreadable entry: {}", err);
                continue;
            }
        };

        if entry.file_type().is_dir() && entry.file_name() == name {
            let path = entry.into_path();
            let size_bytes = directory_size(&path);
            debug!(path = %path.display(), size_bytes, "found session directory");
            matches.push(SweepMatch { path, size_bytes });
            walker.skip_current_dir();
        }
    }

    info!(
        root = %root.display(),
        max_depth,
        found = matches.len(),
        "session directory sweep finished"
    );
    Ok(matches)
}

/// Sum of file sizes beneath `path`, not following symlinks.
pub fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Result of [`delete`].
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<SweepError>,
}

impl DeleteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Remove each directory in `paths`, continuing past individual failures.
///
/// Only call after the user has explicitly confirmed. Symlinks and regular
/// files are refused.
pub fn delete(paths: &[PathBuf]) -> DeleteReport {
    let mut report = DeleteReport::default();

    for path in paths {
        let is_dir = std::fs::symlink_metadata(path)
            .map(|m| m.file_type().is_dir())
            .unwrap_or(false);
        if !is_dir {
            warn!(path = %path.display(), "not a directory, skipping delete");
            report
                .failed
                .push(SweepError::NotADirectory { path: path.clone() });
            continue;
        }

        match std::fs::remove_dir_all(path) {
            Ok(()) => {
                info!(path = %path.display(), "deleted session directory");
                report.removed.push(path.clone());
            }
            Err(source) => {
                warn!(path = %path.display(), "failed to delete: {}", source);
                report.failed.push(SweepError::Delete {
                    path: path.clone(),
                    source,
                });
            }
        }
    }

    report
}
