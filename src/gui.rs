use crate::camera::Projection;
use crate::params::{
    Animation, LightParams, MaterialKind, ModeControl, Params, Shape, ANGLE_RANGE, DECAY_RANGE, DISTANCE_RANGE,
    FOCUS_RANGE, INTENSITY_RANGE, LIGHT_POSITION_STEP, LIGHT_X_RANGE, LIGHT_Y_RANGE, LIGHT_Z_RANGE, PENUMBRA_RANGE,
};

/// Panel interactions the app reacts to beyond the bound fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    MaterialChanged(MaterialKind),
    AnimationChanged(Animation),
    LightChanged,
    LoadTexture,
    ToggleProjection,
    ResetView,
}

fn hex_to_bytes(hex: u32) -> [u8; 3] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

fn color_row(ui: &mut egui::Ui, label: &str, hex: &mut u32) -> bool {
    let mut rgb = hex_to_bytes(*hex);
    let changed = ui
        .horizontal(|ui| {
            let changed = ui.color_edit_button_srgb(&mut rgb).changed();
            ui.label(label);
            changed
        })
        .inner;
    if changed {
        *hex = crate::math::rgb_to_hex(rgb);
    }
    changed
}

fn combo<T: Copy + PartialEq>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut T,
    options: &[T],
    text: impl Fn(T) -> &'static str,
) -> bool {
    let before = *value;
    egui::ComboBox::from_label(label)
        .selected_text(text(*value))
        .show_ui(ui, |ui| {
            for &option in options {
                ui.selectable_value(value, option, text(option));
            }
        });
    *value != before
}

/// Draw the "Controls" window and return what changed
pub fn show_panel(
    ctx: &egui::Context,
    params: &mut Params,
    light: &mut LightParams,
    projection: Projection,
) -> Vec<PanelEvent> {
    let mut events = Vec::new();

    egui::Window::new("Controls")
        .title_bar(true)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .default_width(260.0)
        .show(ctx, |ui| {
            egui::CollapsingHeader::new("Object").default_open(true).show(ui, |ui| {
                combo(ui, "Shape", &mut params.shape, &Shape::ALL, Shape::label);
                if combo(ui, "Material", &mut params.material, &MaterialKind::ALL, MaterialKind::label) {
                    events.push(PanelEvent::MaterialChanged(params.material));
                }
                if ui.button("LoadImage texture").clicked() {
                    events.push(PanelEvent::LoadTexture);
                }
                color_row(ui, "Color object", &mut params.color);
                if combo(ui, "Animation", &mut params.animation, &Animation::ALL, Animation::label) {
                    events.push(PanelEvent::AnimationChanged(params.animation));
                }
                combo(ui, "Mode Control", &mut params.mode_control, &ModeControl::ALL, ModeControl::label);
            });

            egui::CollapsingHeader::new("Light").default_open(true).show(ui, |ui| {
                let mut changed = color_row(ui, "light color", &mut light.light_color);
                changed |= ui.add(egui::Slider::new(&mut light.intensity, INTENSITY_RANGE).text("intensity")).changed();
                changed |= ui.add(egui::Slider::new(&mut light.distance, DISTANCE_RANGE).text("distance")).changed();
                changed |= ui.add(egui::Slider::new(&mut light.angle, ANGLE_RANGE).text("angle")).changed();
                changed |= ui.add(egui::Slider::new(&mut light.penumbra, PENUMBRA_RANGE).text("penumbra")).changed();
                changed |= ui.add(egui::Slider::new(&mut light.decay, DECAY_RANGE).text("decay")).changed();
                changed |= ui.add(egui::Slider::new(&mut light.focus, FOCUS_RANGE).text("focus")).changed();
                if changed {
                    events.push(PanelEvent::LightChanged);
                }
            });

            egui::CollapsingHeader::new("Light direction").default_open(true).show(ui, |ui| {
                ui.add(egui::Slider::new(&mut params.lx, LIGHT_X_RANGE).step_by(LIGHT_POSITION_STEP).text("x"));
                ui.add(egui::Slider::new(&mut params.ly, LIGHT_Y_RANGE).step_by(LIGHT_POSITION_STEP).text("y"));
                ui.add(egui::Slider::new(&mut params.lz, LIGHT_Z_RANGE).step_by(LIGHT_POSITION_STEP).text("z"));
            });

            egui::CollapsingHeader::new("Camera").default_open(false).show(ui, |ui| {
                let label = match projection {
                    Projection::Perspective => "Switch to orthographic",
                    Projection::Orthographic => "Switch to perspective",
                };
                if ui.button(label).clicked() {
                    events.push(PanelEvent::ToggleProjection);
                }
                if ui.button("Reset view").clicked() {
                    events.push(PanelEvent::ResetView);
                }
                ui.label(
                    egui::RichText::new("X / Y / Z: constrain gizmo axis")
                        .size(11.0)
                        .color(egui::Color32::GRAY),
                );
            });
        });

    events
}

pub fn show_fps(ctx: &egui::Context, fps: f32) {
    egui::Window::new("FPS")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{:.0}", fps))
                    .size(48.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.label(egui::RichText::new("FPS").size(12.0).color(egui::Color32::GRAY));
        });
}
