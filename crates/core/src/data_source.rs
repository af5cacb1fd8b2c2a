//! Data source trait and the thread-marshaled scalar cell

use crate::dispatcher::UiDispatcher;
use crate::observable::{Property, Subscription};
use crate::observable_map::ObservableMap;
use std::sync::Arc;
use teledeck_types::{DataType, Value};

/// Observable scalar cell of a data source.
///
/// Producers write from any thread; the write is marshaled onto the
/// UI-owning thread before the cell's state changes, so subscribers always
/// run there and never need their own synchronization.
pub struct SourceCell {
    dispatcher: Arc<UiDispatcher>,
    value: Property<Option<Value>>,
}

impl SourceCell {
    /// Create an empty cell marshaling through `dispatcher`.
    pub fn new(dispatcher: Arc<UiDispatcher>) -> Self {
        Self {
            dispatcher,
            value: Property::new(None),
        }
    }

    /// Current value. `None` means the source has not produced one yet.
    pub fn get(&self) -> Option<Value> {
        self.value.get()
    }

    /// Store a new value, hopping to the owner thread if necessary.
    pub fn set(&self, value: Option<Value>) {
        let cell = self.value.clone();
        self.dispatcher.run_on_owner(move || cell.set(value));
    }

    /// Register a change listener; runs on the owner thread.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Option<Value>) + Send + Sync + 'static,
    ) -> Subscription {
        self.value.subscribe(listener)
    }

    /// The underlying property, for use with the binding helpers.
    pub fn property(&self) -> &Property<Option<Value>> {
        &self.value
    }
}

/// An externally-mutated source of telemetry data.
///
/// Scalar sources expose their value through [`DataSource::value`];
/// composite sources additionally expose a flat key-value map through
/// [`DataSource::entries`]. The transport behind a source (network tables,
/// simulation, replay) is not this crate's concern.
pub trait DataSource: Send + Sync {
    /// Human-readable name, shown by views as the data's title.
    fn name(&self) -> &str;

    /// The shape of this source's value.
    fn data_type(&self) -> DataType;

    /// Whether the value may still update at any time.
    fn active(&self) -> bool {
        true
    }

    /// Scalar channel of this source.
    fn value(&self) -> &SourceCell;

    /// Key-value channel for composite sources. Scalar sources return `None`.
    fn entries(&self) -> Option<&ObservableMap> {
        None
    }
}

/// The null-object source a view holds before the dashboard binds a real one.
///
/// Inactive, unnamed, untyped; its cell is inert because nothing ever writes
/// to it.
pub struct NoneSource {
    cell: SourceCell,
}

impl NoneSource {
    pub fn new(dispatcher: Arc<UiDispatcher>) -> Self {
        Self {
            cell: SourceCell::new(dispatcher),
        }
    }
}

impl DataSource for NoneSource {
    fn name(&self) -> &str {
        ""
    }

    fn data_type(&self) -> DataType {
        DataType::All
    }

    fn active(&self) -> bool {
        false
    }

    fn value(&self) -> &SourceCell {
        &self.cell
    }
}

/// Shared-handle convenience for the pre-binding placeholder.
pub fn none_source(dispatcher: &Arc<UiDispatcher>) -> Arc<dyn DataSource> {
    Arc::new(NoneSource::new(dispatcher.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;

    #[test]
    fn test_cell_set_on_owner_thread_is_immediate() {
        let dispatcher = UiDispatcher::new();
        let cell = SourceCell::new(dispatcher.clone());
        cell.set(Some(Value::Number(1.0)));
        assert_eq!(cell.get(), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_cell_set_from_producer_thread_waits_for_drain() {
        let dispatcher = UiDispatcher::new();
        let cell = Arc::new(SourceCell::new(dispatcher.clone()));

        let writer = cell.clone();
        thread::spawn(move || {
            writer.set(Some(Value::Number(2.0)));
        })
        .join()
        .unwrap();

        // The producer thread only enqueued the write.
        assert_eq!(cell.get(), None);
        dispatcher.drain();
        assert_eq!(cell.get(), Some(Value::Number(2.0)));
    }

    #[test]
    fn test_cell_subscribers_run_after_marshaled_write() {
        let dispatcher = UiDispatcher::new();
        let cell = Arc::new(SourceCell::new(dispatcher.clone()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let _sub = cell.subscribe(move |v: &Option<Value>| {
            log.lock().unwrap().push(v.clone());
        });

        let writer = cell.clone();
        thread::spawn(move || {
            writer.set(Some(Value::Boolean(true)));
        })
        .join()
        .unwrap();

        assert!(seen.lock().unwrap().is_empty());
        dispatcher.drain();
        assert_eq!(*seen.lock().unwrap(), vec![Some(Value::Boolean(true))]);
    }

    #[test]
    fn test_none_source() {
        let dispatcher = UiDispatcher::new();
        let source = none_source(&dispatcher);
        assert_eq!(source.name(), "");
        assert!(!source.active());
        assert_eq!(source.data_type(), DataType::All);
        assert_eq!(source.value().get(), None);
        assert!(source.entries().is_none());
    }
}
