//! Built-in view catalog
//!
//! The view definitions every dashboard starts with. Each registers through
//! the log-and-skip path, so one bad definition never takes the others down.

mod motor_controller;
mod text;
mod toggle;

use teledeck_core::{Registry, Size};

/// Register all built-in views with the given registry.
pub fn register_builtin_views(registry: &mut Registry) {
    let before = registry.len();
    text::register(registry);
    toggle::register(registry);
    motor_controller::register(registry);
    log::debug!("registered {} built-in views", registry.len() - before);
}

/// Grid extent for built-in definitions, which use only literal positive
/// dimensions.
fn grid(width: u32, height: u32) -> Size {
    Size::new(width, height).expect("built-in view sizes are positive")
}
