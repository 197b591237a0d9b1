//! Implementation of the `runlock run` command.
//!
//! Makes one attempt to take the lock and run the job:
//!
//! 1. `SET key value NX EX ttl` against the configured store
//! 2. If the key already existed, report "already running" and stop
//! 3. If the store is unreachable, report the connection error and stop
//! 4. Otherwise run the job, then delete the key whatever the job's result
//!
//! Exactly one status line is printed for the terminal outcome.

use crate::config::Config;
use crate::error::Result;
use crate::job::{Job, SimulatedJob};
use crate::locks::{LockCoordinator, LockSpec};
use crate::store::{LockStore, RedisStore};
use std::io::{self, Write};

/// Execute the `runlock run` command against the configured Redis server.
pub fn cmd_run(config: &Config) -> Result<i32> {
    let spec = LockSpec::try_from(&config.lock)?;
    let store = RedisStore::new(&config.store)?;
    let mut job = SimulatedJob::from_config(&config.job);

    tracing::debug!(
        address = store.address(),
        key = spec.key(),
        "starting guarded run"
    );

    run_guarded(store, &spec, &mut job, &mut io::stdout())
}

/// Run `job` under the lock and print the outcome line to `out`.
fn run_guarded<S, J, W>(store: S, spec: &LockSpec, job: &mut J, out: &mut W) -> Result<i32>
where
    S: LockStore,
    J: Job + ?Sized,
    W: Write,
{
    let mut coordinator = LockCoordinator::new(store);
    let outcome = coordinator.execute(spec, job);

    // The job already ran (or was skipped); a broken stdout must not turn
    // the outcome into a different exit code.
    if let Err(e) = writeln!(out, "{}", outcome) {
        tracing::warn!(error = %e, "failed to print status line");
    }

    Ok(outcome.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use crate::store::MemoryStore;
    use crate::test_support::{CountingJob, spec};

    fn run_to_string(store: &MemoryStore, job: &mut CountingJob) -> (i32, String) {
        let mut out = Vec::new();
        let code = run_guarded(store.clone(), &spec("script_lock", 10), job, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_completed_prints_one_line() {
        let store = MemoryStore::new();
        let mut job = CountingJob::default();

        let (code, output) = run_to_string(&store, &mut job);

        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(output, "Job completed\n");
        assert_eq!(job.runs, 1);
    }

    #[test]
    fn test_run_already_running() {
        let store = MemoryStore::new();
        let mut holder = store.clone();
        holder
            .set_if_absent("script_lock", "locked", std::time::Duration::from_secs(10))
            .unwrap();
        let mut job = CountingJob::default();

        let (code, output) = run_to_string(&store, &mut job);

        assert_eq!(code, exit_codes::ALREADY_RUNNING);
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("already running"));
        assert_eq!(job.runs, 0);
    }

    #[test]
    fn test_run_connectivity_failure() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let mut job = CountingJob::default();

        let (code, output) = run_to_string(&store, &mut job);

        assert_eq!(code, exit_codes::CONNECTIVITY_FAILURE);
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("connection error"));
        assert_eq!(job.runs, 0);
    }

    #[test]
    fn test_run_job_failure_exit_code() {
        let store = MemoryStore::new();
        let mut job = CountingJob::failing("bad input");

        let (code, output) = run_to_string(&store, &mut job);

        assert_eq!(code, exit_codes::JOB_FAILURE);
        assert!(output.contains("bad input"));
        assert!(!store.contains("script_lock"));
    }

    #[test]
    fn test_cmd_run_unreachable_redis() {
        let mut config = Config::default();
        config.store.port = 1;
        config.store.connect_timeout_ms = 500;
        config.job.steps = 0;

        let code = cmd_run(&config).unwrap();
        assert_eq!(code, exit_codes::CONNECTIVITY_FAILURE);
    }
}
