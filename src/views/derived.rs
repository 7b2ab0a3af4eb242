//! Version-keyed cache for derived views.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Caches one derived value, keyed by the versions of its input stores.
///
/// `get` recomputes only when the version key differs from the cached
/// one, which gives derived views changed-input ⇒ recompute and
/// unchanged-input ⇒ cached semantics:
///
/// ```
/// use monthlybudget_rs::store::ResourceStore;
/// use monthlybudget_rs::views::{Derived, balance};
///
/// let accounts = ResourceStore::new();
/// accounts.begin_load(1);
/// accounts.set_items(1, vec![]);
///
/// let totals = Derived::new();
/// let snapshot = totals.get(&[accounts.version()], || {
///     balance::totals(&accounts.items())
/// });
/// assert!(snapshot.total.abs() < f64::EPSILON);
/// ```
#[derive(Debug)]
pub struct Derived<V> {
    /// Cached `(input versions, value)` pair.
    cache: Mutex<Option<(Vec<u64>, V)>>,
}

impl<V> Default for Derived<V> {
    #[inline]
    fn default() -> Self {
        Self {
            cache: Mutex::new(None),
        }
    }
}

impl<V: Clone> Derived<V> {
    /// Creates an empty cache.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value when `versions` matches the cached key,
    /// otherwise recomputes via `compute` and stores the result.
    #[inline]
    pub fn get<F: FnOnce() -> V>(&self, versions: &[u64], compute: F) -> V {
        let mut cache = self.lock();
        if let Some((key, value)) = cache.as_ref() {
            if key == versions {
                return value.clone();
            }
        }
        let value = compute();
        *cache = Some((versions.to_vec(), value.clone()));
        value
    }

    /// Drops the cached value, forcing the next `get` to recompute.
    #[inline]
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// Acquires the inner lock, tolerating poisoning.
    fn lock(&self) -> MutexGuard<'_, Option<(Vec<u64>, V)>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
