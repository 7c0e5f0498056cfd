//! Build-once registry of specializations.
//!
//! Each key owns a slot guarded by its own mutex. The map lock is held only
//! to find or create a slot, so builds for different keys proceed in
//! parallel while concurrent requests for the same key wait for the single
//! build in flight. A failed build leaves its slot empty; the next request
//! builds again. Filled slots are never cleared.

use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

type Slot<V> = Arc<Mutex<Option<Arc<V>>>>;

pub struct SpecializationCache<K, V> {
    slots: RwLock<FxHashMap<K, Slot<V>>>,
    builds: AtomicUsize,
}

impl<K, V> Default for SpecializationCache<K, V> {
    fn default() -> Self {
        Self {
            slots: RwLock::new(FxHashMap::default()),
            builds: AtomicUsize::new(0),
        }
    }
}

impl<K: Eq + Hash + Clone, V> SpecializationCache<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &K) -> Slot<V> {
        if let Some(slot) = self.slots.read().get(key) {
            return Arc::clone(slot);
        }
        Arc::clone(self.slots.write().entry(key.clone()).or_default())
    }

    /// The built value for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let slot = self.slots.read().get(key).map(Arc::clone)?;
        let value = slot.lock().clone();
        value
    }

    /// Return the value for `key`, running `build` first if no value exists.
    ///
    /// `build` runs at most once per successful key, even under concurrent
    /// callers.
    ///
    /// # Errors
    ///
    /// Whatever `build` returns; nothing is stored in that case.
    pub fn get_or_create<E>(
        &self,
        key: &K,
        build: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        let slot = self.slot(key);
        let mut guard = slot.lock();
        if let Some(value) = guard.as_ref() {
            return Ok(Arc::clone(value));
        }
        let value = Arc::new(build()?);
        self.builds.fetch_add(1, Ordering::Relaxed);
        *guard = Some(Arc::clone(&value));
        Ok(value)
    }

    /// Number of successful builds.
    #[must_use]
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// Number of keys with a built value. Every successful build fills
    /// exactly one slot, for good.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builds()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests;
