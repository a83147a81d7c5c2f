//! nova-tracer uninstaller.
//!
//! Removes nova-tracer hook registrations from Claude Code's
//! `settings.json`, leaving every other setting in place, and optionally
//! cleans up `.nova-tracer` session directories left in projects.
//!
//! # Example
//!
//! ```no_run
//! use nova_common::SubsystemMatcher;
//! use nova_uninstall::prompt::TerminalPrompter;
//! use nova_uninstall::report::Reporter;
//! use nova_uninstall::uninstall::{UninstallConfig, run};
//!
//! let config = UninstallConfig::default();
//! let matcher = SubsystemMatcher::nova()?;
//! let mut reporter = Reporter::stdout();
//! let summary = run(&config, &matcher, &mut TerminalPrompter::new(), &mut reporter)?;
//! println!("{:?}", summary.settings);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod logging;
pub mod prompt;
pub mod report;
pub mod uninstall;
