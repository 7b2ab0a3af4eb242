//! Reactive resource stores.
//!
//! A [`ResourceStore`] holds the authoritative client-side copy of one
//! entity collection together with its fetch status. Collections are
//! only ever replaced wholesale — a successful mutation triggers a
//! re-fetch instead of patching items in place, so the store contents
//! always mirror a state the server actually returned.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Reactive holder of one entity collection plus its load/error status.
///
/// Writes are tagged with the load round that produced them; a write
/// from a superseded round is discarded, which keeps rapid re-loads
/// from racing each other (see [`crate::loader`]).
///
/// After any call sequence exactly one of these holds: the store is
/// loading, or it is settled on the last successfully applied items
/// (possibly with a failure recorded in `error`). There is no state in
/// which the data is known-invalid without `error` being set.
#[derive(Debug)]
pub struct ResourceStore<T> {
    /// All state behind a single mutex for thread-safe interior mutability.
    inner: Mutex<StoreInner<T>>,
}

impl<T> Default for ResourceStore<T> {
    #[inline]
    fn default() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                items: Vec::new(),
                loading: false,
                error: None,
                round: 0,
                version: 0,
            }),
        }
    }
}

/// Inner mutable state.
#[derive(Debug)]
struct StoreInner<T> {
    /// Current collection, in server order.
    items: Vec<T>,
    /// Whether a fetch for the current round is still in flight.
    loading: bool,
    /// Failure message from the last settled round, if any.
    error: Option<String>,
    /// Round tag of the latest `begin_load`.
    round: u64,
    /// Bumped on every accepted items swap; input key for derived views.
    version: u64,
}

impl<T: Clone> ResourceStore<T> {
    /// Creates an empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the store as loading for the given round and clears the
    /// previous error. Ignored if a newer round has already begun.
    #[inline]
    pub fn begin_load(&self, round: u64) {
        let mut inner = self.lock();
        if round < inner.round {
            return;
        }
        inner.round = round;
        inner.loading = true;
        inner.error = None;
    }

    /// Replaces the collection wholesale with the given round's result.
    ///
    /// Returns `false` (and leaves the store untouched) when the round
    /// has been superseded — a late response must not clobber data a
    /// newer round already committed.
    #[inline]
    pub fn set_items(&self, round: u64, items: Vec<T>) -> bool {
        let mut inner = self.lock();
        if round != inner.round {
            tracing::debug!(round, current = inner.round, "discarding stale items");
            return false;
        }
        inner.items = items;
        inner.loading = false;
        inner.error = None;
        inner.version = inner.version.wrapping_add(1);
        true
    }

    /// Records a fetch failure for the given round.
    ///
    /// Items keep their last-known value (stale-but-visible); only the
    /// error and loading flags change. Stale rounds are discarded like
    /// in [`Self::set_items`].
    #[inline]
    pub fn set_error<M: Into<String>>(&self, round: u64, message: M) -> bool {
        let mut inner = self.lock();
        if round != inner.round {
            tracing::debug!(round, current = inner.round, "discarding stale error");
            return false;
        }
        inner.loading = false;
        inner.error = Some(message.into());
        true
    }

    /// Returns a snapshot of the collection, in server order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    /// Returns the number of items currently held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Returns `true` when the collection is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Returns `true` while a fetch is in flight.
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Returns the failure message from the last settled round, if any.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Returns the store version, bumped on every accepted items swap.
    ///
    /// Derived views use this as their cache key: equal versions mean
    /// the collection has not changed since the last recompute.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.lock().version
    }

    /// Acquires the inner lock. A poisoned lock only means another
    /// thread panicked mid-update; the state itself stays consistent.
    fn lock(&self) -> MutexGuard<'_, StoreInner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
