//! Lock acquisition, release, and guarded execution.

use super::guard::LockGuard;
use super::metadata::LockMetadata;
use super::types::{CompletionReport, ExecutionOutcome, JobStatus, LockSpec};
use crate::error::{Result, RunlockError};
use crate::job::Job;
use crate::store::LockStore;
use std::time::Instant;

/// Mediates all access to the lock key in the store.
///
/// The coordinator keeps no belief about holdership beyond the `LockGuard`
/// it hands out: it never re-checks the key before releasing, and it never
/// waits for a busy lock.
#[derive(Debug)]
pub struct LockCoordinator<S: LockStore> {
    store: S,
}

impl<S: LockStore> LockCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Atomically create the lock key if it is absent, expiring after the TTL.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - This call created the key; the caller holds the lock
    /// * `Ok(false)` - The key already existed; someone else holds the lock
    /// * `Err(RunlockError::StoreUnavailable)` - Outcome unknown
    pub fn acquire(&mut self, spec: &LockSpec) -> Result<bool> {
        self.acquire_for(spec, None)
    }

    fn acquire_for(&mut self, spec: &LockSpec, job: Option<&str>) -> Result<bool> {
        let value = LockMetadata::new(job, spec.ttl().as_secs()).to_value();
        let acquired = self.store.set_if_absent(spec.key(), &value, spec.ttl())?;

        tracing::debug!(key = spec.key(), acquired, "lock acquisition attempted");
        Ok(acquired)
    }

    /// Unconditionally delete the lock key.
    ///
    /// Idempotent: an absent key (already released, or expired) is not an
    /// error. Returns whether a key was removed.
    pub fn release(&mut self, key: &str) -> Result<bool> {
        let removed = self.store.delete(key)?;
        tracing::debug!(key, removed, "lock key deleted");
        Ok(removed)
    }

    /// Acquire the lock as a scoped guard.
    ///
    /// `Ok(None)` means the lock is held elsewhere. The returned guard
    /// deletes the key when released or dropped.
    pub fn try_lock(&mut self, spec: &LockSpec) -> Result<Option<LockGuard<'_, S>>> {
        self.try_lock_for(spec, None)
    }

    fn try_lock_for(
        &mut self,
        spec: &LockSpec,
        job: Option<&str>,
    ) -> Result<Option<LockGuard<'_, S>>> {
        if self.acquire_for(spec, job)? {
            Ok(Some(LockGuard::new(&mut self.store, spec.key())))
        } else {
            Ok(None)
        }
    }

    /// Run `job` only if the lock can be acquired right now.
    ///
    /// Makes a single attempt: a busy lock is reported as `AlreadyRunning`
    /// and a store failure as `ConnectivityFailure`, and in both cases the
    /// job is never invoked. Once the lock is held, release is attempted
    /// exactly once however the job ends. A panic in the job propagates after
    /// the guard has released the lock during unwinding.
    pub fn execute<J: Job + ?Sized>(&mut self, spec: &LockSpec, job: &mut J) -> ExecutionOutcome {
        let guard = match self.try_lock_for(spec, Some(job.name())) {
            Ok(Some(guard)) => guard,
            Ok(None) => {
                tracing::info!(key = spec.key(), "lock is held by another instance");
                return ExecutionOutcome::AlreadyRunning;
            }
            Err(e) => {
                tracing::error!(key = spec.key(), error = %e, "could not acquire lock");
                let reason = match e {
                    RunlockError::StoreUnavailable(reason) => reason,
                    other => other.to_string(),
                };
                return ExecutionOutcome::ConnectivityFailure(reason);
            }
        };

        tracing::info!(
            key = spec.key(),
            ttl_secs = spec.ttl().as_secs(),
            job = job.name(),
            "lock acquired, running job"
        );

        let started = Instant::now();
        let result = job.run();
        let elapsed = started.elapsed();

        let ttl_exceeded = elapsed >= spec.ttl();
        if ttl_exceeded {
            tracing::warn!(
                key = spec.key(),
                elapsed = ?elapsed,
                ttl_secs = spec.ttl().as_secs(),
                "job outlived the lock TTL; another instance may have started meanwhile"
            );
        }

        let released = match guard.release() {
            Ok(_) => {
                tracing::info!(key = spec.key(), "lock released");
                true
            }
            Err(e) => {
                tracing::warn!(
                    key = spec.key(),
                    error = %e,
                    "failed to release lock; it will expire after its TTL"
                );
                false
            }
        };

        let status = match result {
            Ok(()) => JobStatus::Succeeded,
            Err(e) => {
                let reason = format!("{:#}", e);
                tracing::warn!(key = spec.key(), error = %reason, "job failed");
                JobStatus::Failed(reason)
            }
        };

        ExecutionOutcome::Completed(CompletionReport {
            job: status,
            released,
            elapsed,
            ttl_exceeded,
        })
    }
}
