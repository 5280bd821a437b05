//! Native handles passed to Kotlin as `Long`
//!
//! A handle is an id into a registry of shared values. Entry points look the
//! id up and hold an `Arc` for the duration of the call, so a call racing
//! `nativeDestroy` on another thread either keeps the value alive until it
//! returns or finds nothing. Ids are never reused; 0 is never issued.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Registry of live native handles
pub struct HandleRegistry<T> {
    next_id: AtomicI64,
    entries: Mutex<HashMap<i64, Arc<T>>>,
}

impl<T> HandleRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<i64, Arc<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `value` and return its handle
    pub fn insert(&self, value: T) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries().insert(id, Arc::new(value));
        id
    }

    /// The value behind `id`, if it is still registered
    pub fn get(&self, id: i64) -> Option<Arc<T>> {
        self.entries().get(&id).cloned()
    }

    /// Unregister `id`
    ///
    /// The value is dropped once the returned `Arc` and every clone handed
    /// out by [`Self::get`] are gone.
    pub fn remove(&self, id: i64) -> Option<Arc<T>> {
        self.entries().remove(&id)
    }

    /// Number of registered handles
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether no handle is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
