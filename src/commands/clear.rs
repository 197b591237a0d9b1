//! Implementation of the `runlock clear` command.

use crate::cli::ClearArgs;
use crate::config::Config;
use crate::error::{Result, RunlockError};
use crate::exit_codes;
use crate::locks::LockCoordinator;
use crate::store::{LockStore, RedisStore};
use std::io::{self, Write};

/// Execute the `runlock clear` command.
pub fn cmd_clear(config: &Config, args: &ClearArgs) -> Result<i32> {
    let store = RedisStore::new(&config.store)?;
    clear_lock(store, &config.lock.key, args.force, &mut io::stdout())
}

fn clear_lock<S: LockStore, W: Write>(store: S, key: &str, force: bool, out: &mut W) -> Result<i32> {
    // Require --force flag
    if !force {
        return Err(RunlockError::UserError(format!(
            "refusing to clear lock without --force flag.\n\n\
             Clearing the lock while its holder is still running lets a second\n\
             instance start. Only clear it if you are certain the holder has crashed;\n\
             otherwise it expires on its own after the TTL.\n\n\
             To clear the lock, run:\n  runlock clear --key {} --force",
            key
        )));
    }

    let mut coordinator = LockCoordinator::new(store);
    let removed = coordinator.release(key)?;

    let written = if removed {
        tracing::warn!(key, "lock cleared manually");
        writeln!(out, "Cleared lock '{}'.", key)
    } else {
        writeln!(out, "Lock '{}' was not held.", key)
    };
    written.map_err(|e| RunlockError::UserError(format!("failed to write output: {}", e)))?;

    Ok(exit_codes::SUCCESS)
}
