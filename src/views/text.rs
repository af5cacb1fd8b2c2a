//! Basic text view for scalar sources

use super::grid;
use teledeck_core::{bind_one_way_with, DataType, Registry, Surface, Value};

pub(crate) fn register(registry: &mut Registry) {
    registry.register(|view| {
        view.set_name("Text View");
        view.accept_all([DataType::Text, DataType::Number, DataType::Boolean]);
        view.set_preferred_size(grid(2, 1));

        view.add_variant(grid(1, 1), |ctx| {
            let mut surface = Surface::new(ctx.size);
            let field = surface.add_text_field("value");
            let sub = bind_one_way_with(
                &field.text,
                ctx.source.value().property(),
                |value: &Option<Value>| {
                    value.as_ref().map(Value::to_string).unwrap_or_default()
                },
            );
            surface.retain(sub);
            surface
        });

        // The wider variant gets a title above the value.
        view.add_variant(grid(2, 1), |ctx| {
            let mut surface = Surface::new(ctx.size);
            let title = surface.add_label("title");
            title.text.set(ctx.source.name().to_string());
            let field = surface.add_text_field("value");
            let sub = bind_one_way_with(
                &field.text,
                ctx.source.value().property(),
                |value: &Option<Value>| {
                    value.as_ref().map(Value::to_string).unwrap_or_default()
                },
            );
            surface.retain(sub);
            surface
        });
    });
}
