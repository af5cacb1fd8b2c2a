//! Observable string-keyed value map
//!
//! The map side of a composite data source: a flat namespace of opaque
//! string keys (`"a/b/c"` is a key, not a path) that producers mutate from
//! any thread. Change notifications run on the mutating thread; bindings
//! that feed UI state re-marshal through the dispatcher (see
//! [`KeyBinding`](crate::KeyBinding)).

use crate::observable::{Listeners, Subscription};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use teledeck_types::Value;

/// A single mutation of an [`ObservableMap`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapChange {
    /// The key that changed
    pub key: String,
    /// The new value, or `None` if the key was removed
    pub value: Option<Value>,
}

struct MapInner {
    entries: Mutex<HashMap<String, Value>>,
    listeners: Listeners<MapChange>,
}

/// An observable flat map of telemetry values, mutable from any thread.
///
/// Handles are cheap clones sharing one map. Absence of a key is a valid
/// state, never an error.
#[derive(Clone)]
pub struct ObservableMap {
    inner: Arc<MapInner>,
}

impl ObservableMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MapInner {
                entries: Mutex::new(HashMap::new()),
                listeners: Listeners::new(),
            }),
        }
    }

    /// Current value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.entries.lock().unwrap().get(key).cloned()
    }

    /// Set `key` to `value` and notify listeners on the calling thread.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        {
            let mut entries = self.inner.entries.lock().unwrap();
            entries.insert(key.clone(), value.clone());
        }
        // Entry lock released before listeners run, so a listener may read
        // the map without deadlocking.
        self.inner.listeners.notify(&MapChange {
            key,
            value: Some(value),
        });
    }

    /// Remove `key`, returning its previous value.
    pub fn remove(&self, key: &str) -> Option<Value> {
        let previous = {
            let mut entries = self.inner.entries.lock().unwrap();
            entries.remove(key)
        };
        if previous.is_some() {
            self.inner.listeners.notify(&MapChange {
                key: key.to_string(),
                value: None,
            });
        }
        previous
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.entries.lock().unwrap().len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.lock().unwrap().is_empty()
    }

    /// Sorted list of the current keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.inner.entries.lock().unwrap().clone()
    }

    /// Register a listener for every mutation, with the changed key.
    pub fn subscribe(
        &self,
        listener: impl Fn(&MapChange) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.inner.listeners.add(Arc::new(listener));
        let weak: Weak<MapInner> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.remove(id);
            }
        })
    }
}

impl Default for ObservableMap {
    fn default() -> Self {
        Self::new()
    }
}
