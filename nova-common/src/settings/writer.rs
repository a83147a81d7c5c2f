//! Backing up and replacing the settings file.
//!
//! The original file is always copied to a timestamped backup first. Only
//! once that copy is durable is the new content written, via a sibling temp
//! file renamed over the original.

use super::SettingsError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Attempts at finding a free backup name before giving up.
const MAX_BACKUP_COLLISIONS: u32 = 1000;

/// How backup files are named: `<file>.<suffix>.<timestamp>[-N]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOptions {
    pub suffix: String,
    /// `strftime` format for the timestamp component.
    pub timestamp_format: String,
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            suffix: "backup".to_string(),
            timestamp_format: "%Y%m%d_%H%M%S".to_string(),
        }
    }
}

impl BackupOptions {
    /// Reject formats chrono cannot render or that would escape the directory.
    /// The suffix must stay within the settings file's directory.
    pub fn is_valid_suffix(suffix: &str) -> bool {
        !suffix.is_empty() && !suffix.contains(['/', '\\'])
    }

    pub fn is_valid_timestamp_format(format: &str) -> bool {
        !format.is_empty()
            && !format.contains(['/', '\\'])
            && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
    }

    /// Backup path for `original` at `now`, before collision handling.
    pub fn backup_path(&self, original: &Path, now: DateTime<Local>) -> PathBuf {
        let file_name = original
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "settings.json".to_string());
        let stamp = now.format(&self.timestamp_format);
        original.with_file_name(format!("{}.{}.{}", file_name, self.suffix, stamp))
    }
}

/// Outcome of a successful [`write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub path: PathBuf,
    pub backup_path: PathBuf,
    pub bytes_written: usize,
}

/// Back up `original` and replace it with `document`, timestamped now.
pub fn write(
    document: &Value,
    original: &Path,
    options: &BackupOptions,
) -> Result<WriteReport, SettingsError> {
    write_at(document, original, options, Local::now())
}

/// [`write`] with an explicit clock.
pub fn write_at(
    document: &Value,
    original: &Path,
    options: &BackupOptions,
    now: DateTime<Local>,
) -> Result<WriteReport, SettingsError> {
    let backup_path = create_backup(original, options, now)?;
    info!(backup = %backup_path.display(), "backed up settings");

    let mut content =
        serde_json::to_string_pretty(document).map_err(|source| SettingsError::Serialize {
            path: original.to_path_buf(),
            backup: backup_path.clone(),
            source,
        })?;
    content.push('\n');

    atomic_write(original, content.as_bytes()).map_err(|source| SettingsError::Write {
        path: original.to_path_buf(),
        backup: backup_path.clone(),
        source,
    })?;
    info!(path = %original.display(), bytes = content.len(), "wrote pruned settings");

    Ok(WriteReport {
        path: original.to_path_buf(),
        backup_path,
        bytes_written: content.len(),
    })
}

/// Copy `original` to a backup name that does not exist yet.
///
/// Never overwrites an earlier backup: a name already taken (two runs in the
/// same second) gets a `-1`, `-2`, ... suffix.
fn create_backup(
    original: &Path,
    options: &BackupOptions,
    now: DateTime<Local>,
) -> Result<PathBuf, SettingsError> {
    let backup_err = |backup: &Path, source: io::Error| SettingsError::Backup {
        path: original.to_path_buf(),
        backup: backup.to_path_buf(),
        source,
    };

    if !BackupOptions::is_valid_suffix(&options.suffix) {
        return Err(backup_err(
            original,
            io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid backup suffix '{}'", options.suffix),
            ),
        ));
    }
    if !BackupOptions::is_valid_timestamp_format(&options.timestamp_format) {
        return Err(backup_err(
            original,
            io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid backup timestamp format '{}'", options.timestamp_format),
            ),
        ));
    }
    let base = options.backup_path(original, now);
    let mut source_file = File::open(original).map_err(|e| backup_err(&base, e))?;

    for attempt in 0..MAX_BACKUP_COLLISIONS {
        let candidate = if attempt == 0 {
            base.clone()
        } else {
            let mut name = base.clone().into_os_string();
            name.push(format!("-{attempt}"));
            PathBuf::from(name)
        };

        let mut target = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(backup = %candidate.display(), "backup name taken, trying next");
                continue;
            }
            Err(e) => return Err(backup_err(&candidate, e)),
        };

        let copied = io::copy(&mut source_file, &mut target).and_then(|_| target.sync_all());
        if let Err(e) = copied {
            let _ = fs::remove_file(&candidate);
            return Err(backup_err(&candidate, e));
        }
        return Ok(candidate);
    }

    Err(backup_err(
        &base,
        io::Error::new(
            ErrorKind::AlreadyExists,
            format!("{MAX_BACKUP_COLLISIONS} backups already exist for this timestamp"),
        ),
    ))
}

/// Write via a sibling temp file and rename so readers never see a partial file.
///
/// A symlinked `path` is resolved first so the link survives and its target
/// receives the new content.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let resolved;
    let path = match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            resolved = fs::canonicalize(path)?;
            debug!(link = %path.display(), target = %resolved.display(), "writing through symlink");
            resolved.as_path()
        }
        _ => path,
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{file_name}.nova-tmp"));

    let result = (|| {
        let mut file = File::create(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(&tmp_path, metadata.permissions())?;
        }
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
