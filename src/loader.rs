//! Load-round orchestration primitives.
//!
//! A *round* is one fan-out of concurrent fetches across the stores of a
//! feature screen. Rounds are numbered from a monotonically increasing
//! counter; starting a new round supersedes every earlier one, and the
//! round tag travels with each fetch so that late responses from a
//! superseded round are discarded at the store (see
//! [`crate::store::ResourceStore`]). The screen structs in
//! [`crate::screens`] drive these primitives.

use core::future::Future;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::store::ResourceStore;

/// Monotonic round allocator for one screen.
#[derive(Debug, Default)]
pub struct Loader {
    /// Highest round handed out so far.
    seq: AtomicU64,
}

impl Loader {
    /// Creates a loader with no rounds started.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new round, superseding all earlier ones.
    #[inline]
    pub fn next_round(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns the most recently started round.
    #[inline]
    #[must_use]
    pub fn current(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }

    /// Returns `true` while the given round is still the newest.
    #[inline]
    #[must_use]
    pub fn is_current(&self, round: u64) -> bool {
        self.current() == round
    }
}

/// How a fetch failure surfaces at screen level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Failure produces a screen-level error message.
    Primary,
    /// Failure stays on the store; the screen renders with what loaded.
    Secondary,
}

/// Awaits one fetch and applies its outcome to the store under the
/// round guard.
///
/// Returns the screen-level error message for a failed primary fetch;
/// secondary failures (and all successes) return `None`.
pub(crate) async fn run_fetch<T, Fut>(
    store: &ResourceStore<T>,
    round: u64,
    role: Role,
    label: &str,
    fetch: Fut,
) -> Option<String>
where
    T: Clone,
    Fut: Future<Output = Result<Vec<T>>>,
{
    match fetch.await {
        Ok(items) => {
            store.set_items(round, items);
            None
        }
        Err(err) => {
            tracing::warn!(resource = label, round, error = %err, "fetch failed");
            let message = format!("Failed to load {label}");
            store.set_error(round, message.clone());
            (role == Role::Primary).then_some(message)
        }
    }
}
