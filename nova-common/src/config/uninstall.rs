//! Uninstaller settings resolved from the environment.

use super::env::{EnvError, EnvParser};
use super::source::{ConfigSource, Sourced};
use crate::errors::ErrorCode;
use crate::settings::BackupOptions;
use crate::sweep::{SESSION_DIR_NAME, SweepOptions};
use std::path::PathBuf;
use thiserror::Error;

/// Default location of the Claude Code user settings.
pub const DEFAULT_SETTINGS_PATH: &str = "~/.claude/settings.json";
/// Default sweep depth below the sweep root.
pub const DEFAULT_SWEEP_MAX_DEPTH: u32 = 5;
/// Upper bound on sweep depth; deeper walks over a home directory are not useful.
pub const MAX_SWEEP_MAX_DEPTH: u32 = 32;

#[derive(Debug, Error)]
#[error("Could not determine home directory for the default {what}")]
pub struct HomeDirError {
    pub what: &'static str,
}

impl HomeDirError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ConfigHomeNotFound
    }
}

/// Every `NOVA_*` value the uninstaller reads, each tagged with its origin.
///
/// | Variable                     | Default                    |
/// |------------------------------|----------------------------|
/// | `NOVA_SETTINGS_PATH`         | `~/.claude/settings.json`  |
/// | `NOVA_BACKUP_SUFFIX`         | `backup`                   |
/// | `NOVA_BACKUP_TIMESTAMP`      | `%Y%m%d_%H%M%S`            |
/// | `NOVA_SWEEP_ROOT`            | `~`                        |
/// | `NOVA_SWEEP_MAX_DEPTH`       | `5` (1..=32)               |
/// | `NOVA_LOG_LEVEL`             | `warn`                     |
#[derive(Debug, Clone)]
pub struct UninstallEnv {
    pub settings_path: Sourced<PathBuf>,
    pub backup_suffix: Sourced<String>,
    pub backup_timestamp_format: Sourced<String>,
    pub sweep_root: Sourced<PathBuf>,
    pub sweep_max_depth: Sourced<u32>,
    pub log_level: Sourced<String>,
}

impl UninstallEnv {
    /// Read all variables, returning the resolved values and every problem found.
    ///
    /// Invalid values fall back to their defaults so the caller can decide
    /// whether to abort or warn.
    pub fn from_env() -> (Self, Vec<EnvError>) {
        let mut parser = EnvParser::new();
        let defaults = BackupOptions::default();

        let settings_path = parser.get_path("SETTINGS_PATH", DEFAULT_SETTINGS_PATH);
        let mut backup_suffix = parser.get_string("BACKUP_SUFFIX", &defaults.suffix);
        let mut backup_timestamp_format =
            parser.get_string("BACKUP_TIMESTAMP", &defaults.timestamp_format);
        let sweep_root = parser.get_path("SWEEP_ROOT", "~");
        let sweep_max_depth = parser.get_u32_range(
            "SWEEP_MAX_DEPTH",
            DEFAULT_SWEEP_MAX_DEPTH,
            1,
            MAX_SWEEP_MAX_DEPTH,
        );
        let log_level = parser.get_log_level("LOG_LEVEL", "warn");

        if !BackupOptions::is_valid_suffix(&backup_suffix.value) {
            parser.push_error(EnvError::InvalidValue {
                var: parser.var_name("BACKUP_SUFFIX"),
                expected: "file name suffix without path separators".to_string(),
                value: backup_suffix.value.clone(),
            });
            backup_suffix = Sourced::default_value(defaults.suffix.clone());
        }
        if !BackupOptions::is_valid_timestamp_format(&backup_timestamp_format.value) {
            parser.push_error(EnvError::InvalidValue {
                var: parser.var_name("BACKUP_TIMESTAMP"),
                expected: "strftime format without path separators".to_string(),
                value: backup_timestamp_format.value.clone(),
            });
            backup_timestamp_format = Sourced::default_value(defaults.timestamp_format.clone());
        }

        let env = Self {
            settings_path,
            backup_suffix,
            backup_timestamp_format,
            sweep_root,
            sweep_max_depth,
            log_level,
        };
        (env, parser.take_errors())
    }

    /// Fail when a home-relative default is in use but no home directory exists.
    pub fn ensure_home(&self) -> Result<(), HomeDirError> {
        if dirs::home_dir().is_some() {
            return Ok(());
        }
        for (what, value) in [
            ("settings path", &self.settings_path),
            ("sweep root", &self.sweep_root),
        ] {
            if value.source == ConfigSource::Default {
                return Err(HomeDirError { what });
            }
        }
        Ok(())
    }

    pub fn backup_options(&self) -> BackupOptions {
        BackupOptions {
            suffix: self.backup_suffix.value.clone(),
            timestamp_format: self.backup_timestamp_format.value.clone(),
        }
    }

    pub fn sweep_options(&self) -> SweepOptions {
        SweepOptions {
            root: self.sweep_root.value.clone(),
            dir_name: SESSION_DIR_NAME.to_string(),
            max_depth: self.sweep_max_depth.value as usize,
        }
    }
}
