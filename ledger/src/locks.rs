//! Keyed lock map for per-resource critical sections.
//!
//! Operations on different keys proceed fully in parallel; operations on
//! the same key serialize. The outer map lock is held only long enough to
//! clone the per-key handle, never across the critical section itself.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

/// A map of independently lockable slots, one per key.
pub struct LockMap<K> {
    slots: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Eq + Hash + Clone> LockMap<K> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Get the lock handle for a key, creating the slot on first use.
    ///
    /// The caller locks the returned handle to enter the key's critical
    /// section:
    ///
    /// ```ignore
    /// let slot = locks.slot(&key);
    /// let _guard = slot.lock().unwrap();
    /// ```
    pub fn slot(&self, key: &K) -> Arc<Mutex<()>> {
        self.slots
            .lock()
            .unwrap()
            .entry(key.clone())
            .or_default()
            .clone()
    }
}

impl<K: Eq + Hash + Clone> Default for LockMap<K> {
    fn default() -> Self {
        Self::new()
    }
}
