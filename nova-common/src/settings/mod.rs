//! Claude Code settings reconciliation.
//!
//! The settings file is a JSON object that may carry a `hooks` mapping:
//!
//! ```json
//! {
//!   "hooks": {
//!     "SessionStart": [{ "type": "command", "command": "uv run .../session-start.py" }],
//!     "PreToolUse": [
//!       { "matcher": "Bash", "hooks": [{ "type": "command", "command": "uv run .../pre-tool-guard.py" }] }
//!     ]
//!   },
//!   "theme": "dark"
//! }
//! ```
//!
//! A hook group is either a *direct entry* (an object with a `command`) or a
//! *matcher entry* (a `matcher` plus a nested `hooks` array of direct entries).

pub mod loader;
pub mod matcher;
pub mod pruner;
pub mod writer;

pub use loader::{LoadedSettings, load};
pub use matcher::{AllowPattern, MatcherError, NOVA_ALLOW_LIST, SubsystemMatcher};
pub use pruner::{HookStatus, PruneReport, Pruned, RemovedHook, inspect, prune};
pub use writer::{BackupOptions, WriteReport, write, write_at};

use crate::errors::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Key of the hooks mapping inside the settings document.
pub const HOOKS_KEY: &str = "hooks";
/// Field naming the shell command of a direct entry.
pub const COMMAND_KEY: &str = "command";

/// Lifecycle stages nova-tracer registers hooks for.
///
/// Hook types outside this set are never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HookType {
    SessionStart,
    PreToolUse,
    PostToolUse,
    SessionEnd,
}

impl HookType {
    pub const ALL: [HookType; 4] = [
        HookType::SessionStart,
        HookType::PreToolUse,
        HookType::PostToolUse,
        HookType::SessionEnd,
    ];

    /// Settings key for this hook type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HookType::SessionStart => "SessionStart",
            HookType::PreToolUse => "PreToolUse",
            HookType::PostToolUse => "PostToolUse",
            HookType::SessionEnd => "SessionEnd",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == key)
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures while loading, backing up, or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings root in {} is a JSON {found}, expected an object", path.display())]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("Failed to create backup {}: {source}", backup.display())]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize settings for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Failed to write {} (original preserved at {}): {source}",
        path.display(),
        backup.display()
    )]
    Write {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SettingsError {
    /// Catalog code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            SettingsError::NotFound { .. } => ErrorCode::SettingsNotFound,
            SettingsError::Read { .. } => ErrorCode::SettingsReadError,
            SettingsError::Parse { .. } => ErrorCode::SettingsParseError,
            SettingsError::NotAnObject { .. } => ErrorCode::SettingsNotAnObject,
            SettingsError::Backup { .. } => ErrorCode::SettingsBackupFailed,
            SettingsError::Serialize { .. } => ErrorCode::SettingsSerializeFailed,
            SettingsError::Write { .. } => ErrorCode::SettingsWriteFailed,
        }
    }

    /// Backup left behind by a failed write, if any.
    pub fn recoverable_backup(&self) -> Option<&PathBuf> {
        match self {
            SettingsError::Serialize { backup, .. } | SettingsError::Write { backup, .. } => {
                Some(backup)
            }
            _ => None,
        }
    }
}

/// JSON type name used in error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
