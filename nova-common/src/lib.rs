//! Shared primitives for removing nova-tracer hooks from Claude Code settings.
//!
//! The crate is organised leaves-first:
//!
//! - [`settings::matcher`]: decides whether a hook entry belongs to nova-tracer
//! - [`settings::pruner`]: rebuilds a settings tree without those entries
//! - [`settings::loader`] / [`settings::writer`]: read, back up, and replace the file
//! - [`sweep`]: bounded search for leftover `.nova-tracer` session directories
//!
//! Errors map onto the [`errors`] catalog so the CLI can print remediation steps.

pub mod config;
pub mod errors;
pub mod settings;
pub mod sweep;
pub mod util;

pub use config::{ConfigSource, EnvError, EnvParser, HomeDirError, Sourced, UninstallEnv};
pub use errors::{ErrorCategory, ErrorCode, ErrorEntry};
pub use settings::{
    BackupOptions, HookStatus, HookType, LoadedSettings, MatcherError, NOVA_ALLOW_LIST,
    PruneReport, SettingsError, SubsystemMatcher, WriteReport,
};
pub use sweep::{DeleteReport, SESSION_DIR_NAME, SweepError, SweepMatch, SweepOptions};
