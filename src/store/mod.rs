//! Lock store abstraction.
//!
//! runlock needs exactly two atomic primitives from the shared store:
//! - set a key to a value only if it is absent, with expiry in seconds
//! - delete a key
//!
//! Any store offering both can arbitrate the lock. The production backend is
//! Redis (`SET key value NX EX ttl` / `DEL key`).

mod redis;

#[cfg(test)]
mod memory;

use crate::error::Result;
use std::time::Duration;

pub use self::redis::RedisStore;

#[cfg(test)]
pub use memory::MemoryStore;

/// The store contract used by the lock coordinator.
pub trait LockStore {
    /// Atomically create `key` with `value` iff it is absent, expiring after `ttl`.
    ///
    /// Returns `true` when this call created the key, `false` when the key
    /// already existed. Fails with `StoreUnavailable` when the outcome is unknown.
    fn set_if_absent(&mut self, key: &str, value: &str, ttl: Duration) -> Result<bool>;

    /// Delete `key` unconditionally.
    ///
    /// Returns whether a key was actually removed. Deleting an absent key is
    /// not an error.
    fn delete(&mut self, key: &str) -> Result<bool>;
}
