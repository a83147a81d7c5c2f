//! Configuration system for the uninstaller.
//!
//! Every ambient knob (settings location, backup naming, sweep bounds, log
//! level) is read once from `NOVA_*` environment variables into typed values
//! that remember where they came from. Callers inject the resulting options
//! into the writer and sweep instead of consulting the environment later.

pub mod env;
pub mod source;
pub mod uninstall;

pub use env::{EnvError, EnvParser};
pub use source::{ConfigSource, Sourced};
pub use uninstall::{HomeDirError, UninstallEnv};

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
