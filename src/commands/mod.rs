//! Command implementations for runlock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations and resolves the effective configuration they share.

mod clear;
mod run;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::{Result, RunlockError};

/// Dispatch a command to its implementation.
///
/// Returns the process exit code on any handled outcome. Errors are left
/// to the caller, which maps them through `RunlockError::exit_code`.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let config = load_config(&cli)?;

    match cli.resolved_command() {
        Command::Run => run::cmd_run(&config),
        Command::Clear(args) => clear::cmd_clear(&config, args),
    }
}

/// Resolve config file plus command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let cwd = std::env::current_dir().map_err(|e| {
        RunlockError::UserError(format!("failed to get current working directory: {}", e))
    })?;

    let config = Config::resolve(cli.global.config.as_deref(), &cwd)?;
    config.with_overrides(cli.global.overrides())
}
