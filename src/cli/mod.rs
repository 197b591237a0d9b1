//! CLI argument parsing for runlock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Runlock: run a job on exactly one instance at a time.
///
/// The job is guarded by a lock key in Redis created with SET NX EX.
/// If another instance holds the lock, this invocation exits immediately.
/// Meant to be triggered periodically by an external scheduler (cron,
/// systemd timers, ...); there is no retry or waiting.
#[derive(Parser, Debug)]
#[command(name = "runlock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by every command. Each overrides the config file.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Path to a YAML config file (default: ./runlock.yaml if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Lock key guarding the job.
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Lock TTL in seconds.
    #[arg(long, global = true)]
    pub ttl: Option<u64>,

    /// Store host.
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Store port.
    #[arg(long, global = true)]
    pub port: Option<u16>,
}

impl GlobalArgs {
    /// Config values given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            key: self.key.clone(),
            ttl_secs: self.ttl,
            host: self.host.clone(),
            port: self.port,
        }
    }
}

/// Available commands for runlock.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the job once if the lock is free.
    ///
    /// Prints one status line: completed, already running, or a store
    /// connection error.
    Run,

    /// Delete the lock key.
    ///
    /// For when the holder crashed and waiting for the TTL is not an option.
    /// Requires --force flag to prevent accidental clearing.
    Clear(ClearArgs),
}

/// Arguments for the `clear` command.
#[derive(Parser, Debug, PartialEq, Eq)]
pub struct ClearArgs {
    /// Force clearing the lock (required for safety).
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The command to run, `run` when none was given.
    pub fn resolved_command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Run)
    }
}
