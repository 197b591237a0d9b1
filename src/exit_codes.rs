//! Exit code constants for the runlock CLI.
//!
//! - 0: Job completed successfully
//! - 1: Another instance holds the lock
//! - 2: The lock store could not be reached
//! - 3: Job completed but reported a failure
//! - 4: User error (bad config or arguments)

/// Job ran to completion and succeeded.
pub const SUCCESS: i32 = 0;

/// Lock is held by another instance; the job was not started.
pub const ALREADY_RUNNING: i32 = 1;

/// The lock store was unreachable or timed out; the job was not started.
pub const CONNECTIVITY_FAILURE: i32 = 2;

/// The job ran while holding the lock but reported a failure.
pub const JOB_FAILURE: i32 = 3;

/// User error: invalid configuration, lock key, TTL, or arguments.
pub const USER_ERROR: i32 = 4;
