use egui::Context;

use crate::controller::{Action, FrameLoopContext, KeyBindings};
use crate::model::AnimatedObject;

/// Draw the overlay for one frame. Call inside `egui::Context::run`.
pub fn build_ui(ctx: &Context, frame: &mut FrameLoopContext, surface_width: f32) {
    draw_crosshair(ctx);
    draw_debug_window(ctx, frame);
    draw_settings_window(ctx, frame, surface_width);
}

fn draw_crosshair(ctx: &Context) {
    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::TOP, egui::Id::new("crosshair")));
    let center = ctx.available_rect().center();
    let size = 10.0;
    let stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    painter.line_segment(
        [egui::Pos2::new(center.x - size, center.y), egui::Pos2::new(center.x + size, center.y)],
        stroke,
    );
    painter.line_segment(
        [egui::Pos2::new(center.x, center.y - size), egui::Pos2::new(center.x, center.y + size)],
        stroke,
    );
}

fn draw_debug_window(ctx: &Context, frame: &FrameLoopContext) {
    let scene = &frame.scene;
    let pos = scene.camera.position;
    let bindings = frame.processor.bindings();

    egui::Window::new("Debug")
        .default_pos([8.0, 8.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(format!("FPS: {:.0}", frame.fps.fps())).small());
            ui.label(egui::RichText::new(format!("Pos: x: {:.2} y: {:.2} z: {:.2}", pos.x, pos.y, pos.z)).small());
            ui.label(
                egui::RichText::new(format!("Yaw: {:.1} Pitch: {:.1}", scene.camera.yaw(), scene.camera.pitch()))
                    .small(),
            );
            ui.separator();
            for (object, toggle) in scene.animations.iter() {
                ui.horizontal(|ui| {
                    let state = if toggle.enabled() { "on" } else { "off" };
                    ui.label(egui::RichText::new(format!("{} [{}]", object.label(), state)).small());
                    ui.add(egui::ProgressBar::new(toggle.progress().clamp(0.0, 1.0)).desired_width(60.0));
                });
            }
            let lamp = if scene.lamp.is_on() { "on" } else { "off" };
            ui.label(egui::RichText::new(format!("Lamp [{lamp}]")).small());
            ui.separator();
            ui.label(egui::RichText::new("Controls:").small());
            ui.label(egui::RichText::new("WASD / arrows - Move").small());
            ui.label(egui::RichText::new("Mouse - Look").small());
            for (action, text) in [
                (Action::ToggleDoor, AnimatedObject::Door.label()),
                (Action::ToggleDrawer, AnimatedObject::Drawer.label()),
                (Action::ToggleLamp, "Lamp"),
                (Action::ToggleRockingChair, AnimatedObject::RockingChair.label()),
                (Action::ToggleRadio, AnimatedObject::Radio.label()),
                (Action::Quit, "Quit"),
            ] {
                ui.label(egui::RichText::new(format!("{} - {}", key_names(bindings, action), text)).small());
            }
        });
}

fn draw_settings_window(ctx: &Context, frame: &mut FrameLoopContext, surface_width: f32) {
    egui::Window::new("Settings")
        .default_pos([surface_width - 140.0, 8.0])
        .default_size([130.0, 100.0])
        .show(ctx, |ui| {
            let camera = &mut frame.scene.camera;
            let mut zoom = camera.zoom.clamp(30.0, 120.0);
            ui.label(egui::RichText::new("FOV").small());
            if ui.add(egui::Slider::new(&mut zoom, 30.0..=120.0).step_by(5.0)).changed() {
                camera.zoom = zoom;
            }
        });
}

fn key_names(bindings: &KeyBindings, action: Action) -> String {
    let names: Vec<String> = bindings
        .keys_for(action)
        .iter()
        .map(|code| format!("{code:?}").trim_start_matches("Digit").trim_start_matches("Key").to_string())
        .collect();
    names.join("/")
}
