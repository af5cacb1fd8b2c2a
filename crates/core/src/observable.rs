//! Observable value cells and the subscription contract
//!
//! Every subscribe returns a [`Subscription`]; dropping it (or calling
//! [`Subscription::unsubscribe`]) detaches the listener. Surfaces retain the
//! subscriptions their factories create, so bindings live exactly as long as
//! the surface that owns them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// Shared listener storage for observables.
///
/// Listeners are invoked with no internal lock held, so a callback may
/// subscribe, unsubscribe, or write back into the observable it came from.
pub(crate) struct Listeners<E> {
    entries: Mutex<Vec<(u64, Arc<dyn Fn(&E) + Send + Sync>)>>,
    next_id: AtomicU64,
}

impl<E> Listeners<E> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub(crate) fn add(&self, listener: Arc<dyn Fn(&E) + Send + Sync>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().unwrap().push((id, listener));
        id
    }

    pub(crate) fn remove(&self, id: u64) {
        self.entries.lock().unwrap().retain(|(entry_id, _)| *entry_id != id);
    }

    pub(crate) fn notify(&self, event: &E) {
        let snapshot: Vec<_> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }
}

/// Handle for a registered listener.
///
/// Dropping the handle detaches the listener, so it must be kept alive for
/// as long as the binding should stay live (typically via
/// [`Surface::retain`](crate::Surface::retain)).
#[must_use = "dropping a subscription detaches its listener"]
pub struct Subscription {
    detachers: Vec<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detachers: vec![Box::new(detach)],
        }
    }

    /// Combine two subscriptions into one handle with their joint lifetime.
    pub fn merge(mut self, mut other: Subscription) -> Subscription {
        self.detachers.append(&mut other.detachers);
        self
    }

    /// Detach the listener(s) now.
    pub fn unsubscribe(mut self) {
        self.detach_all();
    }

    fn detach_all(&mut self) {
        for detach in self.detachers.drain(..) {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_all();
    }
}

struct PropertyInner<T> {
    value: Mutex<T>,
    listeners: Listeners<T>,
}

/// An observable value cell.
///
/// Handles are cheap clones sharing one cell, the way toolkit widget handles
/// share their underlying widget. `set` notifies listeners on the calling
/// thread; state belonging to the UI must therefore only be written on the
/// UI-owning thread (see [`UiDispatcher`](crate::UiDispatcher)).
pub struct Property<T> {
    inner: Arc<PropertyInner<T>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + PartialEq + Send + 'static> Property<T> {
    /// Create a cell holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(PropertyInner {
                value: Mutex::new(initial),
                listeners: Listeners::new(),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.inner.value.lock().unwrap().clone()
    }

    /// Store a new value and notify listeners.
    ///
    /// Writing a value equal to the current one is a no-op and notifies
    /// nobody; bidirectional bindings rely on this to terminate.
    pub fn set(&self, value: T) {
        {
            let mut current = self.inner.value.lock().unwrap();
            if *current == value {
                return;
            }
            *current = value.clone();
        }
        // Lock released before listeners run.
        self.inner.listeners.notify(&value);
    }

    /// Register a change listener; it receives each new value after a set.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.listeners.add(Arc::new(listener));
        let weak: Weak<PropertyInner<T>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.remove(id);
            }
        })
    }
}
