//! The uninstall flow: prune hooks from the settings file, then offer to
//! sweep leftover session directories.

use crate::prompt::Prompter;
use crate::report::Reporter;
use anyhow::Result;
use nova_common::config::env::expand_tilde;
use nova_common::config::uninstall::DEFAULT_SETTINGS_PATH;
use nova_common::settings::{self, HookStatus, PruneReport, SettingsError};
use nova_common::sweep::{self, DeleteReport, SweepOptions};
use nova_common::util::humanize_bytes;
use nova_common::{BackupOptions, ErrorCode, SubsystemMatcher, WriteReport};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything one uninstall run needs.
#[derive(Debug, Clone)]
pub struct UninstallConfig {
    pub settings_path: PathBuf,
    pub backup: BackupOptions,
    pub sweep: SweepOptions,
    /// Report what would change without writing or deleting.
    pub dry_run: bool,
    pub skip_sweep: bool,
}

impl Default for UninstallConfig {
    fn default() -> Self {
        Self {
            settings_path: expand_tilde(DEFAULT_SETTINGS_PATH),
            backup: BackupOptions::default(),
            sweep: SweepOptions::default(),
            dry_run: false,
            skip_sweep: false,
        }
    }
}

/// What happened to the settings file.
#[derive(Debug)]
pub enum SettingsOutcome {
    FileNotFound,
    NoHooksSection,
    /// Hooks exist but none belong to nova-tracer.
    Unchanged,
    WouldChange { report: PruneReport },
    Changed {
        report: PruneReport,
        write: WriteReport,
    },
}

/// What happened during the directory sweep.
#[derive(Debug)]
pub enum SweepOutcome {
    Skipped,
    /// User chose not to search.
    NotSearched,
    NoneFound,
    WouldDelete { paths: Vec<PathBuf> },
    Declined { paths: Vec<PathBuf> },
    Deleted { report: DeleteReport },
}

#[derive(Debug)]
pub struct UninstallSummary {
    pub settings: SettingsOutcome,
    pub sweep: SweepOutcome,
}

/// Remove nova-tracer hooks from the configured settings file.
///
/// A missing file or a file without a `hooks` section is a benign no-op.
/// The file is only rewritten, after a backup, when something was removed.
pub fn remove_hooks<W: Write>(
    config: &UninstallConfig,
    matcher: &SubsystemMatcher,
    reporter: &mut Reporter<W>,
) -> Result<SettingsOutcome> {
    let path = &config.settings_path;
    reporter.step(&format!("Removing hooks from {}", path.display()));

    let loaded = match settings::load(path) {
        Ok(loaded) => loaded,
        Err(SettingsError::NotFound { .. }) => {
            info!(path = %path.display(), "settings file not found, nothing to do");
            reporter.info(&format!(
                "{}, nothing to remove",
                ErrorCode::SettingsNotFound.message()
            ));
            return Ok(SettingsOutcome::FileNotFound);
        }
        Err(err) => return Err(err.into()),
    };
    debug!(bytes = loaded.raw.len(), "loaded settings");

    if !loaded.has_hooks_section() {
        reporter.info(&format!(
            "{}, nothing to remove",
            ErrorCode::SettingsNoHooks.message()
        ));
        return Ok(SettingsOutcome::NoHooksSection);
    }

    let pruned = settings::prune(&loaded.document, matcher);
    let report = pruned.report;
    if report.is_noop() {
        reporter.info("No nova-tracer hooks registered");
        return Ok(SettingsOutcome::Unchanged);
    }

    for removed in &report.removed {
        let label = match &removed.matcher {
            Some(m) => format!("{} [{}]: {}", removed.hook_type, m, removed.command),
            None => format!("{}: {}", removed.hook_type, removed.command),
        };
        reporter.list_item(&label);
    }

    if config.dry_run {
        reporter.info(&format!(
            "Dry run: would remove {} hook entr{}",
            report.removed_count(),
            if report.removed_count() == 1 { "y" } else { "ies" }
        ));
        return Ok(SettingsOutcome::WouldChange { report });
    }

    let write = settings::write(&pruned.document, path, &config.backup)?;
    reporter.info(&format!("Backup saved to {}", write.backup_path.display()));
    reporter.success(&format!(
        "Removed {} hook entr{}",
        report.removed_count(),
        if report.removed_count() == 1 { "y" } else { "ies" }
    ));
    if report.hooks_removed {
        reporter.info("No hooks remain; removed the empty hooks section");
    }

    Ok(SettingsOutcome::Changed { report, write })
}

/// Offer to find and delete leftover session directories.
///
/// Both the search and the deletion need an explicit "yes".
pub fn sweep_sessions<W: Write>(
    config: &UninstallConfig,
    prompter: &mut dyn Prompter,
    reporter: &mut Reporter<W>,
) -> Result<SweepOutcome> {
    if config.skip_sweep {
        debug!("sweep skipped");
        return Ok(SweepOutcome::Skipped);
    }

    let options = &config.sweep;
    let question = format!(
        "Search for {} directories under {}?",
        options.dir_name,
        options.root.display()
    );
    if !prompter.confirm(&question)? {
        reporter.info("Skipping session directory search");
        return Ok(SweepOutcome::NotSearched);
    }

    reporter.step(&format!(
        "Searching {} (depth {})",
        options.root.display(),
        options.max_depth
    ));
    let matches = options.find()?;
    if matches.is_empty() {
        reporter.info(&format!("No {} directories found", options.dir_name));
        return Ok(SweepOutcome::NoneFound);
    }

    let total: u64 = matches.iter().map(|m| m.size_bytes).sum();
    reporter.info(&format!(
        "Found {} director{} ({})",
        matches.len(),
        if matches.len() == 1 { "y" } else { "ies" },
        humanize_bytes(total)
    ));
    for found in &matches {
        reporter.list_item(&format!(
            "{} ({})",
            found.path.display(),
            humanize_bytes(found.size_bytes)
        ));
    }

    let paths: Vec<PathBuf> = matches.into_iter().map(|m| m.path).collect();
    if config.dry_run {
        reporter.info("Dry run: nothing deleted");
        return Ok(SweepOutcome::WouldDelete { paths });
    }

    if !prompter.confirm("Delete these directories? This cannot be undone")? {
        reporter.info("Kept session directories");
        return Ok(SweepOutcome::Declined { paths });
    }

    let report = sweep::delete(&paths);
    for failure in &report.failed {
        reporter.warn(&format!("[{}] {}", failure.code().code_string(), failure));
    }
    if !report.removed.is_empty() {
        reporter.success(&format!(
            "Deleted {} session director{}",
            report.removed.len(),
            if report.removed.len() == 1 { "y" } else { "ies" }
        ));
    }
    Ok(SweepOutcome::Deleted { report })
}

/// Report whether nova-tracer hooks are registered, without modifying anything.
pub fn status(config: &UninstallConfig, matcher: &SubsystemMatcher) -> Result<HookStatus> {
    match settings::load(&config.settings_path) {
        Ok(loaded) => Ok(settings::inspect(&loaded.document, matcher)),
        Err(SettingsError::NotFound { .. }) => Ok(HookStatus::NotInstalled),
        Err(err) => Err(err.into()),
    }
}

/// Full uninstall: hooks first, then the optional sweep.
pub fn run<W: Write>(
    config: &UninstallConfig,
    matcher: &SubsystemMatcher,
    prompter: &mut dyn Prompter,
    reporter: &mut Reporter<W>,
) -> Result<UninstallSummary> {
    reporter.header(if config.dry_run {
        "nova-tracer uninstall (dry run)"
    } else {
        "nova-tracer uninstall"
    });

    let settings = remove_hooks(config, matcher, reporter)?;
    let sweep = sweep_sessions(config, prompter, reporter)?;

    reporter.header("Uninstallation Complete");
    if let SweepOutcome::Declined { paths } = &sweep {
        reporter.info(&format!(
            "{} session director{} left in place",
            paths.len(),
            if paths.len() == 1 { "y" } else { "ies" }
        ));
    }

    Ok(UninstallSummary { settings, sweep })
}
