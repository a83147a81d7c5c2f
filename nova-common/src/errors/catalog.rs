//! Error Catalog for the nova-tracer uninstaller
//!
//! Each error includes:
//! - A unique code (NOVA-E001 through NOVA-E599)
//! - A human-readable message template
//! - Remediation steps
//!
//! # Example
//!
//! ```rust
//! use nova_common::errors::catalog::ErrorCode;
//!
//! let entry = ErrorCode::SettingsParseError.entry();
//! println!("Error {}: {}", entry.code, entry.message);
//! for step in entry.remediation {
//!     println!("  - {}", step);
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enumeration covering every uninstaller failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // =========================================================================
    // Settings Errors (E001-E099)
    // =========================================================================
    /// Settings file does not exist
    SettingsNotFound,
    /// Settings file could not be read
    SettingsReadError,
    /// Settings file is not valid JSON
    SettingsParseError,
    /// Settings root is not a JSON object
    SettingsNotAnObject,
    /// Settings file has no hooks section
    SettingsNoHooks,
    /// Backup copy could not be created
    SettingsBackupFailed,
    /// Pruned settings could not be written
    SettingsWriteFailed,
    /// Pruned settings could not be serialized
    SettingsSerializeFailed,

    // =========================================================================
    // Config Errors (E100-E199)
    // =========================================================================
    /// Environment variable has invalid value
    ConfigEnvError,
    /// Allow-list pattern failed to compile
    ConfigInvalidPattern,
    /// Home directory could not be determined
    ConfigHomeNotFound,

    // =========================================================================
    // Sweep Errors (E200-E299)
    // =========================================================================
    /// Sweep root does not exist or is not a directory
    SweepRootMissing,
    /// Session directory could not be deleted
    SweepDeleteFailed,

    // =========================================================================
    // Internal Errors (E500-E599)
    // =========================================================================
    /// Interactive prompt failed
    InternalPromptError,
    /// Logging system error
    InternalLoggingError,
}

impl ErrorCode {
    /// Returns the numeric error code (without prefix).
    #[must_use]
    pub const fn code_number(&self) -> u16 {
        match self {
            // Settings (001-099)
            Self::SettingsNotFound => 1,
            Self::SettingsReadError => 2,
            Self::SettingsParseError => 3,
            Self::SettingsNotAnObject => 4,
            Self::SettingsNoHooks => 5,
            Self::SettingsBackupFailed => 10,
            Self::SettingsWriteFailed => 11,
            Self::SettingsSerializeFailed => 12,

            // Config (100-199)
            Self::ConfigEnvError => 100,
            Self::ConfigInvalidPattern => 101,
            Self::ConfigHomeNotFound => 102,

            // Sweep (200-299)
            Self::SweepRootMissing => 200,
            Self::SweepDeleteFailed => 202,

            // Internal (500-599)
            Self::InternalPromptError => 500,
            Self::InternalLoggingError => 501,
        }
    }

    /// Returns the formatted error code string (e.g., "NOVA-E001").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("NOVA-E{:03}", self.code_number())
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.code_number() {
            1..=99 => ErrorCategory::Settings,
            100..=199 => ErrorCategory::Config,
            200..=299 => ErrorCategory::Sweep,
            _ => ErrorCategory::Internal,
        }
    }

    /// Returns the full error entry with all metadata.
    #[must_use]
    pub fn entry(&self) -> ErrorEntry {
        ErrorEntry {
            code: self.code_string(),
            category: self.category(),
            message: self.message().to_string(),
            remediation: self
                .remediation()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    /// Whether the uninstaller treats this condition as a successful no-op.
    #[must_use]
    pub const fn is_benign(&self) -> bool {
        matches!(self, Self::SettingsNotFound | Self::SettingsNoHooks)
    }

    /// Returns the error message template.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::SettingsNotFound => "Claude Code settings file not found",
            Self::SettingsReadError => "Failed to read Claude Code settings file",
            Self::SettingsParseError => "Claude Code settings file contains invalid JSON",
            Self::SettingsNotAnObject => "Claude Code settings root is not a JSON object",
            Self::SettingsNoHooks => "Claude Code settings contain no hooks section",
            Self::SettingsBackupFailed => "Failed to back up settings before modification",
            Self::SettingsWriteFailed => "Failed to write updated settings",
            Self::SettingsSerializeFailed => "Failed to serialize updated settings",

            Self::ConfigEnvError => "Environment variable has invalid value",
            Self::ConfigInvalidPattern => "Hook allow-list pattern is not a valid regex",
            Self::ConfigHomeNotFound => "Could not determine home directory",

            Self::SweepRootMissing => "Sweep root directory does not exist",
            Self::SweepDeleteFailed => "Failed to delete session data directory",

            Self::InternalPromptError => "Interactive prompt failed",
            Self::InternalLoggingError => "Failed to initialize logging",
        }
    }

    /// Returns remediation steps for this error.
    #[must_use]
    pub const fn remediation(&self) -> &'static [&'static str] {
        match self {
            Self::SettingsNotFound => &[
                "Nothing to uninstall: nova-tracer hooks were never registered here",
                "Pass --settings to point at a different settings file",
            ],
            Self::SettingsReadError => &[
                "Check file permissions on ~/.claude/settings.json",
                "Ensure no other process has locked the file",
            ],
            Self::SettingsParseError => &[
                "Open ~/.claude/settings.json and fix the JSON syntax error",
                "Restore a previous copy from a settings.json.backup.* file",
                "Validate with: python3 -m json.tool ~/.claude/settings.json",
            ],
            Self::SettingsNotAnObject => &[
                "The settings file must contain a JSON object at the top level",
                "Restore a previous copy from a settings.json.backup.* file",
            ],
            Self::SettingsNoHooks => &["Nothing to uninstall: no hooks are configured"],
            Self::SettingsBackupFailed => &[
                "Check that the settings directory is writable",
                "Check available disk space",
                "The original settings file was not modified",
            ],
            Self::SettingsWriteFailed => &[
                "Restore the original settings from the backup file named in the error",
                "Check that the settings directory is writable",
                "Check available disk space",
            ],
            Self::SettingsSerializeFailed => &[
                "The original settings file was not modified",
                "Report this issue with the contents of your settings file",
            ],
            Self::ConfigEnvError => &[
                "Check NOVA_* environment variables for typos",
                "Unset the variable to fall back to the default",
            ],
            Self::ConfigInvalidPattern => &[
                "Fix the regular expression in the allow-list table",
                "Use a substring pattern when no regex features are needed",
            ],
            Self::ConfigHomeNotFound => &[
                "Set the HOME environment variable",
                "Pass --settings and --sweep-root explicitly",
            ],
            Self::SweepRootMissing => &[
                "Pass --sweep-root pointing at an existing directory",
                "Set NOVA_SWEEP_ROOT to an existing directory",
            ],
            Self::SweepDeleteFailed => &[
                "Check permissions on the listed directory",
                "Remove the directory manually with: rm -rf <path>",
            ],
            Self::InternalPromptError => &[
                "Run the uninstaller from an interactive terminal",
                "Pass --skip-sweep to avoid prompts",
            ],
            Self::InternalLoggingError => &[
                "Check the NOVA_LOG_LEVEL value",
                "Unset RUST_LOG if it contains an invalid filter",
            ],
        }
    }

    /// Returns all error codes (for iteration/testing).
    #[must_use]
    pub fn all() -> &'static [ErrorCode] {
        &[
            Self::SettingsNotFound,
            Self::SettingsReadError,
            Self::SettingsParseError,
            Self::SettingsNotAnObject,
            Self::SettingsNoHooks,
            Self::SettingsBackupFailed,
            Self::SettingsWriteFailed,
            Self::SettingsSerializeFailed,
            Self::ConfigEnvError,
            Self::ConfigInvalidPattern,
            Self::ConfigHomeNotFound,
            Self::SweepRootMissing,
            Self::SweepDeleteFailed,
            Self::InternalPromptError,
            Self::InternalLoggingError,
        ]
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_string(), self.message())
    }
}

/// Error category for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Settings file errors (E001-E099)
    Settings,
    /// Configuration errors (E100-E199)
    Config,
    /// Session directory sweep errors (E200-E299)
    Sweep,
    /// Internal/unexpected errors (E500-E599)
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable name for the category.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Settings => "Settings",
            Self::Config => "Configuration",
            Self::Sweep => "Sweep",
            Self::Internal => "Internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Complete error entry with all metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Error code string (e.g., "NOVA-E001")
    pub code: String,
    /// Error category
    pub category: ErrorCategory,
    /// Human-readable error message
    pub message: String,
    /// Steps to remediate the error
    pub remediation: Vec<String>,
}

impl ErrorEntry {
    /// Formats the error for display with full remediation steps.
    #[must_use]
    pub fn format_full(&self) -> String {
        let mut output = format!("[{}] {}\n", self.code, self.message);

        if !self.remediation.is_empty() {
            output.push_str("\nRemediation steps:\n");
            for (i, step) in self.remediation.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, step));
            }
        }

        output
    }

    /// Formats the error as a single line.
    #[must_use]
    pub fn format_brief(&self) -> String {
        format!("[{}] {}", self.code, self.message)
    }
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_brief())
    }
}
