//! Binding primitives connecting surfaces to live data
//!
//! Three layers: [`KeyBinding`] derives an observable from one key of an
//! observable map; the `bind_*` helpers link properties directionally or
//! bidirectionally; [`bind_map_key`] composes the two with a converter.
//!
//! None of these enforce a view's `user_input` flag; wiring or disabling
//! controls is the view layer's policy.

use crate::dispatcher::UiDispatcher;
use crate::observable::{Property, Subscription};
use crate::observable_map::ObservableMap;
use std::sync::Arc;
use teledeck_types::Value;

/// Derived observable tracking a single key of an [`ObservableMap`].
///
/// The cached value always equals `map.get(key)` once the owner thread's
/// queue is drained; `None` is the absence state, not an error. Changes to
/// other keys never trigger recomputation. Recomputation is marshaled onto
/// the UI-owning thread regardless of which thread mutated the map, and the
/// cache is only ever written there.
///
/// The binding holds its one subscription to the backing map for its whole
/// lifetime; dropping it detaches from the map.
pub struct KeyBinding {
    value: Property<Option<Value>>,
    _map_subscription: Subscription,
}

impl KeyBinding {
    /// Derive an observable for `key` of `map`.
    pub fn new(
        dispatcher: &Arc<UiDispatcher>,
        map: &ObservableMap,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let value = Property::new(map.get(&key));
        let map_subscription = {
            let dispatcher = dispatcher.clone();
            let backing = map.clone();
            let value = value.clone();
            map.subscribe(move |change| {
                if change.key != key {
                    return;
                }
                // Recompute from the map rather than the change payload so a
                // task that runs late still lands on the latest value.
                let map = backing.clone();
                let value = value.clone();
                let key = key.clone();
                dispatcher.run_on_owner(move || value.set(map.get(&key)));
            })
        };
        Self {
            value,
            _map_subscription: map_subscription,
        }
    }

    /// Current cached value.
    pub fn get(&self) -> Option<Value> {
        self.value.get()
    }

    /// Register a change listener; runs on the owner thread.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Option<Value>) + Send + Sync + 'static,
    ) -> Subscription {
        self.value.subscribe(listener)
    }

    /// The cached property, for use with the `bind_*` helpers.
    pub fn property(&self) -> &Property<Option<Value>> {
        &self.value
    }
}

/// Make `target` track `source`. Target writes never propagate back.
#[must_use = "dropping the subscription unbinds the target"]
pub fn bind_one_way<T>(target: &Property<T>, source: &Property<T>) -> Subscription
where
    T: Clone + PartialEq + Send + 'static,
{
    target.set(source.get());
    let target = target.clone();
    source.subscribe(move |v| target.set(v.clone()))
}

/// Make `target` track `source` through a conversion function.
///
/// `convert` must be pure and total over the source's value domain.
#[must_use = "dropping the subscription unbinds the target"]
pub fn bind_one_way_with<S, T, F>(
    target: &Property<T>,
    source: &Property<S>,
    convert: F,
) -> Subscription
where
    S: Clone + PartialEq + Send + 'static,
    T: Clone + PartialEq + Send + 'static,
    F: Fn(&S) -> T + Send + Sync + 'static,
{
    target.set(convert(&source.get()));
    let target = target.clone();
    source.subscribe(move |v| target.set(convert(v)))
}

/// Make `target` and `source` track each other. The source's value wins at
/// bind time. Equal-value writes are silent, which terminates the loop.
#[must_use = "dropping the subscription unbinds both properties"]
pub fn bind_bidirectional<T>(target: &Property<T>, source: &Property<T>) -> Subscription
where
    T: Clone + PartialEq + Send + 'static,
{
    target.set(source.get());
    let forward = {
        let target = target.clone();
        source.subscribe(move |v| target.set(v.clone()))
    };
    let backward = {
        let source = source.clone();
        target.subscribe(move |v| source.set(v.clone()))
    };
    forward.merge(backward)
}

/// Bidirectional binding between differently-typed properties.
///
/// `read` maps source values into the target's domain, `write` maps back.
/// The pair should round-trip; a lossy pair settles on its fixpoint.
#[must_use = "dropping the subscription unbinds both properties"]
pub fn bind_bidirectional_with<S, T, R, W>(
    target: &Property<T>,
    source: &Property<S>,
    read: R,
    write: W,
) -> Subscription
where
    S: Clone + PartialEq + Send + 'static,
    T: Clone + PartialEq + Send + 'static,
    R: Fn(&S) -> T + Send + Sync + 'static,
    W: Fn(&T) -> S + Send + Sync + 'static,
{
    target.set(read(&source.get()));
    let forward = {
        let target = target.clone();
        source.subscribe(move |v| target.set(read(v)))
    };
    let backward = {
        let source = source.clone();
        target.subscribe(move |v| source.set(write(v)))
    };
    forward.merge(backward)
}

/// Bind `target` to one key of an observable map through a converter.
///
/// Composes a [`KeyBinding`] with `convert`, which receives `None` while the
/// key is unset and must produce a presentable default for it. The returned
/// subscription owns the derived binding; dropping it detaches everything.
#[must_use = "dropping the subscription unbinds the target"]
pub fn bind_map_key<T, F>(
    target: &Property<T>,
    dispatcher: &Arc<UiDispatcher>,
    map: &ObservableMap,
    key: impl Into<String>,
    convert: F,
) -> Subscription
where
    T: Clone + PartialEq + Send + 'static,
    F: Fn(Option<&Value>) -> T + Send + Sync + 'static,
{
    let binding = KeyBinding::new(dispatcher, map, key);
    let sub = bind_one_way_with(target, binding.property(), move |v: &Option<Value>| {
        convert(v.as_ref())
    });
    sub.merge(Subscription::new(move || drop(binding)))
}
