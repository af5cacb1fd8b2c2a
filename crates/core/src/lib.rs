//! teledeck-core: View registry and reactive binding engine.
//!
//! This crate contains the core of the dashboard: the `View` model and its
//! validating `Registry`, the observable primitives (`Property`,
//! `ObservableMap`) and binding helpers that keep surfaces synchronized with
//! externally-mutated data sources, and the `UiDispatcher` that marshals all
//! of that work onto the single UI-owning thread.

mod binding;
mod data_source;
mod dispatcher;
mod error;
mod observable;
mod observable_map;
mod registry;
mod surface;
mod view;

pub use binding::{
    bind_bidirectional, bind_bidirectional_with, bind_map_key, bind_one_way, bind_one_way_with,
    KeyBinding,
};
pub use data_source::{none_source, DataSource, NoneSource, SourceCell};
pub use dispatcher::UiDispatcher;
pub use error::InvalidViewError;
pub use observable::{Property, Subscription};
pub use observable_map::{MapChange, ObservableMap};
pub use registry::{Registry, ViewInit};
pub use surface::{Label, Node, Separator, Slider, Surface, TextField, Toggle};
pub use view::{BuildContext, SurfaceFactory, View, ViewDescription};

// Re-export types used in core signatures for convenience
pub use teledeck_types::{DataType, InvalidSizeError, Size, TypeMismatchError, Value};
