//! Toggle views for boolean sources

use super::grid;
use teledeck_core::{bind_bidirectional_with, DataType, Registry, Surface, Value, View};

fn define_toggle(name: &'static str) -> impl Fn(&mut View) + Send + Sync + 'static {
    move |view: &mut View| {
        view.set_name(name);
        view.accept(DataType::Boolean);
        view.enable_user_input();

        view.add_variant(grid(1, 1), |ctx| {
            let mut surface = Surface::new(ctx.size);
            let toggle = surface.add_toggle("state");
            toggle.text.set(ctx.source.name().to_string());
            let sub = bind_bidirectional_with(
                &toggle.selected,
                ctx.source.value().property(),
                |value: &Option<Value>| {
                    value
                        .as_ref()
                        .and_then(|v| v.as_boolean().ok())
                        .unwrap_or(false)
                },
                |selected: &bool| Some(Value::Boolean(*selected)),
            );
            surface.retain(sub);
            surface
        });
    }
}

pub(crate) fn register(registry: &mut Registry) {
    // Same contract, different skins; the toolkit picks the rendering.
    registry.register(define_toggle("Toggle Button"));
    registry.register(define_toggle("Toggle Switch"));
}
