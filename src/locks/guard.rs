//! RAII lock guard implementation.

use crate::error::Result;
use crate::store::LockStore;

/// RAII guard for a held lock key.
///
/// When dropped, the key is deleted from the store. This includes unwinding
/// out of a panicking job. If deletion fails, a warning is logged and the key
/// is left to expire through its TTL; no panic occurs.
///
/// Exactly one delete is issued per guard, whether through `release` or drop.
#[derive(Debug)]
pub struct LockGuard<'a, S: LockStore + ?Sized> {
    /// Store holding the key.
    store: &'a mut S,

    /// The held key.
    key: String,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'a, S: LockStore + ?Sized> LockGuard<'a, S> {
    /// Create a new guard for a key this process just created.
    pub(super) fn new(store: &'a mut S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            released: false,
        }
    }

    /// The held key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Manually release the lock.
    ///
    /// Use this to observe the outcome of the delete. The guard is consumed
    /// and no further delete is attempted on drop, even if this one failed.
    ///
    /// Returns whether the key was still present.
    pub fn release(mut self) -> Result<bool> {
        self.released = true;
        let removed = self.store.delete(&self.key)?;
        if !removed {
            tracing::warn!(key = %self.key, "lock was already gone at release (expired?)");
        }
        Ok(removed)
    }
}

impl<S: LockStore + ?Sized> Drop for LockGuard<'_, S> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        match self.store.delete(&self.key) {
            Ok(_) => tracing::info!(key = %self.key, "lock released on scope exit"),
            Err(e) => tracing::warn!(
                key = %self.key,
                error = %e,
                "failed to release lock; it will expire after its TTL"
            ),
        }
    }
}
