//! Lock parameters and execution outcome types.

use crate::config::LockConfig;
use crate::error::{Result, RunlockError};
use crate::exit_codes;
use std::fmt;
use std::time::Duration;

/// Longest accepted lock TTL: one year.
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// A validated lock key and TTL.
///
/// The key is non-blank and the TTL is a whole number of seconds between 1
/// and [`MAX_TTL_SECS`], the granularity of the store's expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockSpec {
    key: String,
    ttl: Duration,
}

impl LockSpec {
    /// Validate and build a lock spec.
    ///
    /// # Returns
    ///
    /// * `Ok(LockSpec)` - Key and TTL accepted
    /// * `Err(RunlockError::InvalidLock)` - Blank key, zero or oversized TTL, or sub-second TTL part
    pub fn new(key: impl Into<String>, ttl: Duration) -> Result<Self> {
        let key = key.into();

        if key.trim().is_empty() {
            return Err(RunlockError::InvalidLock(
                "lock key must not be empty".to_string(),
            ));
        }

        if ttl.as_secs() == 0 {
            return Err(RunlockError::InvalidLock(
                "ttl must be at least 1 second".to_string(),
            ));
        }

        if ttl.as_secs() > MAX_TTL_SECS {
            return Err(RunlockError::InvalidLock(format!(
                "ttl must be at most {} seconds (got {})",
                MAX_TTL_SECS,
                ttl.as_secs()
            )));
        }

        if ttl.subsec_nanos() != 0 {
            return Err(RunlockError::InvalidLock(format!(
                "ttl must be a whole number of seconds (got {:?})",
                ttl
            )));
        }

        Ok(Self { key, ttl })
    }

    /// Build lock parameters from a TTL in seconds.
    pub fn from_secs(key: impl Into<String>, ttl_secs: u64) -> Result<Self> {
        Self::new(key, Duration::from_secs(ttl_secs))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl TryFrom<&LockConfig> for LockSpec {
    type Error = RunlockError;

    fn try_from(config: &LockConfig) -> Result<Self> {
        Self::from_secs(config.key.clone(), config.ttl_secs)
    }
}

/// How the protected job itself ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Succeeded,
    Failed(String),
}

/// What happened during a run that held the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    /// The job's own result.
    pub job: JobStatus,

    /// Whether the release delete reached the store.
    ///
    /// `false` means the lock stays held until its TTL lapses.
    pub released: bool,

    /// Wall-clock time the job ran.
    pub elapsed: Duration,

    /// Whether the job ran at least as long as the lock TTL, so the lock may
    /// have expired mid-run and a second instance may have started.
    pub ttl_exceeded: bool,
}

/// Terminal state of one `execute` attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The lock was acquired and the job ran.
    Completed(CompletionReport),

    /// Another instance holds the lock; the job was not started.
    AlreadyRunning,

    /// The store could not be reached; the job was not started and the
    /// lock state is unknown.
    ConnectivityFailure(String),
}

impl ExecutionOutcome {
    /// Returns the process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecutionOutcome::Completed(report) => match report.job {
                JobStatus::Succeeded => exit_codes::SUCCESS,
                JobStatus::Failed(_) => exit_codes::JOB_FAILURE,
            },
            ExecutionOutcome::AlreadyRunning => exit_codes::ALREADY_RUNNING,
            ExecutionOutcome::ConnectivityFailure(_) => exit_codes::CONNECTIVITY_FAILURE,
        }
    }

    /// Whether the job was invoked.
    pub fn job_ran(&self) -> bool {
        matches!(self, ExecutionOutcome::Completed(_))
    }
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionOutcome::Completed(report) => {
                match &report.job {
                    JobStatus::Succeeded => write!(f, "Job completed")?,
                    JobStatus::Failed(reason) => write!(f, "Job completed with failure: {}", reason)?,
                }
                if report.ttl_exceeded {
                    write!(f, " (ran longer than the lock TTL)")?;
                }
                if !report.released {
                    write!(f, " (lock release failed; it will expire after its TTL)")?;
                }
                Ok(())
            }
            ExecutionOutcome::AlreadyRunning => {
                write!(f, "Job is already running elsewhere; not starting another instance")
            }
            ExecutionOutcome::ConnectivityFailure(reason) => {
                write!(f, "Lock store connection error: {}", reason)
            }
        }
    }
}
