//! Motor controller composite view
//!
//! Displays the flat namespace of a motor controller source: speed with a
//! write-back slider, and current draw.

use super::grid;
use teledeck_core::{bind_map_key, DataType, Registry, Value};

fn format_speed(value: Option<&Value>) -> String {
    let speed = value.and_then(|v| v.as_number().ok()).unwrap_or(0.0);
    format!("Speed: {speed:.3}")
}

fn format_current_draw(value: Option<&Value>) -> String {
    let amps = value.and_then(|v| v.as_number().ok()).unwrap_or(0.0);
    format!("Current draw: {amps:.3} Amps")
}

pub(crate) fn register(registry: &mut Registry) {
    registry.register_composite(|view| {
        view.set_name("Motor Controller");
        view.accept(DataType::MotorController);
        view.enable_user_input();

        view.add_variant(grid(2, 1), |ctx| {
            let mut surface = teledeck_core::Surface::new(ctx.size);

            let title = surface.add_label("title");
            title.text.set(ctx.source.name().to_string());
            surface.add_separator();

            let speed_label = surface.add_label("speed");
            let slider = surface.add_slider("speed_slider", -1.0, 1.0, 0.5);
            let current_label = surface.add_label("current_draw");

            match ctx.source.entries() {
                Some(entries) => {
                    let sub = bind_map_key(
                        &speed_label.text,
                        &ctx.dispatcher,
                        entries,
                        "Speed",
                        format_speed,
                    );
                    surface.retain(sub);

                    // The slider mirrors the speed entry and pushes user
                    // changes back into the source.
                    let sub = bind_map_key(
                        &slider.value,
                        &ctx.dispatcher,
                        entries,
                        "Speed",
                        |value| value.and_then(|v| v.as_number().ok()).unwrap_or(0.0),
                    );
                    surface.retain(sub);
                    let write_back = {
                        let entries = entries.clone();
                        slider
                            .value
                            .subscribe(move |speed: &f64| {
                                entries.insert("Speed", Value::Number(*speed));
                            })
                    };
                    surface.retain(write_back);

                    let sub = bind_map_key(
                        &current_label.text,
                        &ctx.dispatcher,
                        entries,
                        "CurrentDraw",
                        format_current_draw,
                    );
                    surface.retain(sub);
                }
                None => {
                    // Bound to a scalar (or no) source: show the defaults.
                    speed_label.text.set(format_speed(None));
                    current_label.text.set(format_current_draw(None));
                }
            }

            surface
        });
    });
}
