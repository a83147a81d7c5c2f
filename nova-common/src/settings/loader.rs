//! Reading the settings file.

use super::{SettingsError, json_type_name};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A parsed settings file and the text it was parsed from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub path: PathBuf,
    pub raw: String,
    pub document: Value,
}

impl LoadedSettings {
    pub fn has_hooks_section(&self) -> bool {
        self.document.get(super::HOOKS_KEY).is_some()
    }
}

/// Read and parse the settings file at `path`.
///
/// A missing file is reported as [`SettingsError::NotFound`], which callers
/// treat as nothing to do. The root must be a JSON object.
pub fn load(path: &Path) -> Result<LoadedSettings, SettingsError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            SettingsError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let document: Value = serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if !document.is_object() {
        return Err(SettingsError::NotAnObject {
            path: path.to_path_buf(),
            found: json_type_name(&document),
        });
    }

    debug!(path = %path.display(), bytes = raw.len(), "loaded settings");

    Ok(LoadedSettings {
        path: path.to_path_buf(),
        raw,
        document,
    })
}
