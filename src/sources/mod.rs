//! Concrete data sources
//!
//! The transport feeding these (network tables, replay files, simulation) is
//! the caller's concern; a producer thread pushes values in and the
//! marshaling in `teledeck-core` takes it from there.

use std::sync::Arc;
use teledeck_core::{DataSource, DataType, ObservableMap, SourceCell, UiDispatcher};
use teledeck_types::Value;

/// A scalar source: one named, typed, observable value.
pub struct ValueSource {
    name: String,
    data_type: DataType,
    cell: SourceCell,
}

impl ValueSource {
    /// Create an empty scalar source. The value stays absent until the
    /// first [`ValueSource::set`].
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        dispatcher: &Arc<UiDispatcher>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            data_type,
            cell: SourceCell::new(dispatcher.clone()),
        })
    }

    /// Push a new value; callable from any thread.
    pub fn set(&self, value: Value) {
        self.cell.set(Some(value));
    }

    /// Clear the value back to the absent state.
    pub fn clear(&self) {
        self.cell.set(None);
    }
}

impl DataSource for ValueSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn value(&self) -> &SourceCell {
        &self.cell
    }
}

/// A composite source: a flat, observable key-value namespace.
///
/// Keys are opaque strings; `"a/b/c"` is one key, not a path. This is the
/// shape a network-table subsystem entry arrives in.
pub struct TableSource {
    name: String,
    data_type: DataType,
    cell: SourceCell,
    entries: ObservableMap,
}

impl TableSource {
    /// Create an empty composite source.
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        dispatcher: &Arc<UiDispatcher>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            data_type,
            cell: SourceCell::new(dispatcher.clone()),
            entries: ObservableMap::new(),
        })
    }

    /// Set one entry; callable from any thread.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.entries.insert(key, value);
    }
}

impl DataSource for TableSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    // The scalar channel of a composite source stays inert; consumers bind
    // against the entries map.
    fn value(&self) -> &SourceCell {
        &self.cell
    }

    fn entries(&self) -> Option<&ObservableMap> {
        Some(&self.entries)
    }
}
