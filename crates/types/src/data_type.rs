//! Data-shape classifiers for matching views to sources

use serde::{Deserialize, Serialize};

/// Classifier for the shape of a data source's value.
///
/// A view declares the set of types it can display; a source exposes exactly
/// one type. [`DataType::All`] on a view means "no restriction"; a source
/// reporting `All` is untyped and only matches restriction-free views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// No restriction (on a view) or untyped (on a source)
    All,
    /// Text data
    Text,
    /// Numerical data
    Number,
    /// Boolean value
    Boolean,
    /// Flat string-keyed map with no declared shape
    Composite,
    /// Motor controller fields (speed, current draw, ...)
    MotorController,
    /// Subsystem status fields
    Subsystem,
    /// Command status fields
    Command,
}

impl DataType {
    /// Whether this type describes a flat key-value map rather than a scalar.
    pub fn is_composite(self) -> bool {
        matches!(
            self,
            DataType::Composite | DataType::MotorController | DataType::Subsystem | DataType::Command
        )
    }
}
