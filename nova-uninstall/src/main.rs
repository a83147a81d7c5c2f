//! nova-uninstall: remove nova-tracer hooks from Claude Code settings.

use anyhow::Result;
use clap::Parser;
use nova_common::config::uninstall::MAX_SWEEP_MAX_DEPTH;
use nova_common::{
    ErrorCode, HomeDirError, MatcherError, SettingsError, SubsystemMatcher, SweepError,
    UninstallEnv,
};
use nova_uninstall::logging::init_logging;
use nova_uninstall::prompt::TerminalPrompter;
use nova_uninstall::report::Reporter;
use nova_uninstall::uninstall::{self, UninstallConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(
    name = "nova-uninstall",
    version,
    about = "Remove nova-tracer hooks from Claude Code settings"
)]
struct Cli {
    /// Claude Code settings file [env: NOVA_SETTINGS_PATH]
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Show what would be removed without writing or deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Only report whether nova-tracer hooks are installed
    #[arg(long, conflicts_with_all = ["dry_run", "skip_sweep"])]
    status: bool,

    /// Do not offer to remove .nova-tracer session directories
    #[arg(long)]
    skip_sweep: bool,

    /// Where to look for session directories [env: NOVA_SWEEP_ROOT]
    #[arg(long, value_name = "PATH")]
    sweep_root: Option<PathBuf>,

    /// How deep below the sweep root to look [env: NOVA_SWEEP_MAX_DEPTH]
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SWEEP_MAX_DEPTH))
    )]
    max_depth: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (env, env_errors) = UninstallEnv::from_env();
    let env = apply_cli(env, &cli);

    let level = if cli.verbose {
        "debug"
    } else {
        env.log_level.value.as_str()
    };
    if let Err(err) = init_logging(level) {
        eprintln!(
            "{}: {:#}",
            ErrorCode::InternalLoggingError.entry().format_brief(),
            err
        );
    }

    for err in &env_errors {
        warn!(code = %err.code().code_string(), "{}", err);
    }
    debug!(
        settings = %env.settings_path.origin(),
        sweep_root = %env.sweep_root.origin(),
        max_depth = %env.sweep_max_depth.origin(),
        "configuration resolved"
    );

    match execute(&cli, &env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Command-line flags take precedence over the environment.
fn apply_cli(mut env: UninstallEnv, cli: &Cli) -> UninstallEnv {
    env.settings_path = env.settings_path.override_with(cli.settings.clone());
    env.sweep_root = env.sweep_root.override_with(cli.sweep_root.clone());
    env.sweep_max_depth = env.sweep_max_depth.override_with(cli.max_depth);
    env
}

fn execute(cli: &Cli, env: &UninstallEnv) -> Result<()> {
    env.ensure_home()?;
    let matcher = SubsystemMatcher::nova()?;

    let config = UninstallConfig {
        settings_path: env.settings_path.value.clone(),
        backup: env.backup_options(),
        sweep: env.sweep_options(),
        dry_run: cli.dry_run,
        skip_sweep: cli.skip_sweep,
    };

    if cli.status {
        let status = uninstall::status(&config, &matcher)?;
        println!("{}: {}", config.settings_path.display(), status);
        return Ok(());
    }

    let mut reporter = Reporter::stdout();
    let mut prompter = TerminalPrompter::new();
    let summary = uninstall::run(&config, &matcher, &mut prompter, &mut reporter)?;
    debug!(?summary, "uninstall finished");
    Ok(())
}

fn error_code(err: &anyhow::Error) -> Option<ErrorCode> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<SettingsError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<SweepError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<MatcherError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<HomeDirError>() {
            Some(e.code())
        } else if cause.downcast_ref::<dialoguer::Error>().is_some() {
            Some(ErrorCode::InternalPromptError)
        } else {
            None
        }
    })
}

fn report_error(err: &anyhow::Error) {
    let mut reporter = Reporter::stderr();
    match error_code(err) {
        Some(code) => reporter.error_entry(&code.entry(), &format!("{:#}", err)),
        None => eprintln!("Error: {:#}", err),
    }

    if let Some(backup) = err
        .downcast_ref::<SettingsError>()
        .and_then(SettingsError::recoverable_backup)
    {
        eprintln!("\nOriginal settings preserved at {}", backup.display());
    }
}
