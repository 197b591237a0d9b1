//! Error types for runlock.
//!
//! Uses thiserror for derive macros. Lock contention is not an error:
//! a busy lock is reported by `acquire` returning `false`.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for runlock operations.
#[derive(Error, Debug)]
pub enum RunlockError {
    /// The store could not be reached, timed out, or failed the command.
    ///
    /// After this error the lock state is unknown.
    #[error("lock store unavailable: {0}")]
    StoreUnavailable(String),

    /// The lock key or TTL was rejected.
    #[error("invalid lock: {0}")]
    InvalidLock(String),

    /// Bad configuration, bad arguments, or a refused operation.
    #[error("{0}")]
    UserError(String),
}

impl RunlockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunlockError::StoreUnavailable(_) => exit_codes::CONNECTIVITY_FAILURE,
            RunlockError::InvalidLock(_) => exit_codes::USER_ERROR,
            RunlockError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for runlock operations.
pub type Result<T> = std::result::Result<T, RunlockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_unavailable_has_connectivity_exit_code() {
        let err = RunlockError::StoreUnavailable("connection refused".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONNECTIVITY_FAILURE);
    }

    #[test]
    fn invalid_lock_is_user_error() {
        let err = RunlockError::InvalidLock("empty key".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = RunlockError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = RunlockError::StoreUnavailable("timed out".to_string());
        assert_eq!(err.to_string(), "lock store unavailable: timed out");

        let err = RunlockError::InvalidLock("ttl must be at least 1 second".to_string());
        assert_eq!(err.to_string(), "invalid lock: ttl must be at least 1 second");
    }
}
