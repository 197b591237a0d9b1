//! Locking subsystem for runlock.
//!
//! This module implements a single named lock kept in a shared store, used
//! to make sure a job runs on at most one instance at a time.
//!
//! # Protocol
//!
//! - Acquire: atomic create-if-absent with a TTL (`SET key value NX EX ttl`).
//!   Exactly one concurrent caller sees success for a live key.
//! - Release: unconditional delete. Deleting an absent key is not an error.
//! - A busy lock is reported immediately, never waited on or retried.
//! - The TTL bounds how long a crashed holder can block other instances.
//!
//! # Lock Metadata
//!
//! The key's value is JSON metadata (`owner`, `pid`, `created_at`, `job`,
//! `ttl_secs`) for operators. Release never compares it.
//!
//! # RAII Guards
//!
//! A successful acquisition is represented by a `LockGuard` that deletes the
//! key when released or dropped, including while unwinding from a panic.
//! If the delete fails, a warning is logged and the key expires by TTL.

mod coordinator;
mod guard;
mod metadata;
mod types;


// Re-export public API
pub use coordinator::LockCoordinator;
pub use guard::LockGuard;
pub use metadata::LockMetadata;
pub use types::{CompletionReport, ExecutionOutcome, JobStatus, LockSpec, MAX_TTL_SECS};
