//! teledeck: widget registry and reactive data binding for telemetry
//! dashboards.
//!
//! This library provides the pieces a dashboard shell composes:
//! - A validating registry of declarative view definitions
//! - Observable primitives and binding helpers that keep surfaces in sync
//!   with externally-mutated data sources, marshaled onto the UI-owning
//!   thread
//! - Concrete data sources with the transport left to the caller
//! - The built-in view catalog

pub mod sources;
pub mod views;

// Re-export commonly used types
pub use teledeck_core::{
    bind_bidirectional, bind_bidirectional_with, bind_map_key, bind_one_way, bind_one_way_with,
    DataSource, DataType, InvalidSizeError, InvalidViewError, KeyBinding, ObservableMap, Property,
    Registry, Size, Subscription, Surface, TypeMismatchError, UiDispatcher, Value, View,
    ViewDescription,
};
pub use views::register_builtin_views;
