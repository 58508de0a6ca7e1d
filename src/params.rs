use std::f32::consts::{FRAC_PI_3, FRAC_PI_4};
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Selectable mesh shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    Box,
    Sphere,
    Cone,
    Cylinder,
    Torus,
    Teapot,
    #[serde(rename = "torusKnox")]
    #[value(name = "torus-knot", alias = "torusKnox")]
    TorusKnot,
    Octahedron,
    #[default]
    Tube,
}

impl Shape {
    /// Panel order
    pub const ALL: [Shape; 9] = [
        Shape::Box,
        Shape::Sphere,
        Shape::Cone,
        Shape::Cylinder,
        Shape::Torus,
        Shape::Teapot,
        Shape::TorusKnot,
        Shape::Octahedron,
        Shape::Tube,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Shape::Box => "Box",
            Shape::Sphere => "Sphere",
            Shape::Cone => "Cone",
            Shape::Cylinder => "Cylinder",
            Shape::Torus => "Torus",
            Shape::Teapot => "TeaPot",
            Shape::TorusKnot => "TorusKnox",
            Shape::Octahedron => "Octahedron",
            Shape::Tube => "Tube",
        }
    }
}

/// Selectable surface material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum MaterialKind {
    Point,
    Wireframe,
    Smooth,
    #[default]
    Flat,
    Glossy,
    Textured,
    Reflective,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 7] = [
        MaterialKind::Point,
        MaterialKind::Wireframe,
        MaterialKind::Smooth,
        MaterialKind::Flat,
        MaterialKind::Glossy,
        MaterialKind::Textured,
        MaterialKind::Reflective,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MaterialKind::Point => "Point",
            MaterialKind::Wireframe => "Lines",
            MaterialKind::Smooth => "Solid",
            MaterialKind::Flat => "Flat",
            MaterialKind::Glossy => "Glossy",
            MaterialKind::Textured => "Textured",
            MaterialKind::Reflective => "Reflective",
        }
    }
}

/// Canned procedural animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Animation {
    #[default]
    #[serde(rename = "disable")]
    Disable,
    #[serde(rename = "aniScale")]
    Scaling,
    #[serde(rename = "aniRotation")]
    Rotation,
    #[serde(rename = "aniTranslate")]
    Translate,
}

impl Animation {
    pub const ALL: [Animation; 4] = [
        Animation::Disable,
        Animation::Scaling,
        Animation::Rotation,
        Animation::Translate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Animation::Disable => "Disable",
            Animation::Scaling => "Scaling",
            Animation::Rotation => "Rotation",
            Animation::Translate => "Translate",
        }
    }
}

/// Transform gizmo mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum ModeControl {
    Disable,
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl ModeControl {
    pub const ALL: [ModeControl; 4] = [
        ModeControl::Disable,
        ModeControl::Translate,
        ModeControl::Rotate,
        ModeControl::Scale,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModeControl::Disable => "Disable",
            ModeControl::Translate => "Translate",
            ModeControl::Rotate => "Rotate",
            ModeControl::Scale => "Scale",
        }
    }
}

pub const LIGHT_X_RANGE: RangeInclusive<f32> = -100.0..=100.0;
pub const LIGHT_Y_RANGE: RangeInclusive<f32> = 0.0..=400.0;
pub const LIGHT_Z_RANGE: RangeInclusive<f32> = -100.0..=100.0;
pub const LIGHT_POSITION_STEP: f64 = 10.0;

/// Object panel state plus light position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Params {
    pub shape: Shape,
    pub material: MaterialKind,
    pub mode_control: ModeControl,
    /// Object color as 0xRRGGBB
    pub color: u32,
    pub lx: f32,
    pub ly: f32,
    pub lz: f32,
    /// Initial camera position
    pub cx: f32,
    pub cy: f32,
    pub cz: f32,
    pub animation: Animation,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            shape: Shape::Tube,
            material: MaterialKind::Flat,
            mode_control: ModeControl::Translate,
            color: 0xffffff,
            lx: -50.0,
            ly: 200.0,
            lz: 50.0,
            cx: 400.0,
            cy: 200.0,
            cz: 400.0,
            animation: Animation::Disable,
        }
    }
}

impl Params {
    pub fn light_position(&self) -> glam::Vec3 {
        glam::Vec3::new(self.lx, self.ly, self.lz)
    }

    pub fn camera_position(&self) -> glam::Vec3 {
        glam::Vec3::new(self.cx, self.cy, self.cz)
    }

    /// Keep slider-bound fields inside their slider ranges
    pub fn clamp(&mut self) {
        self.lx = clamp_to(self.lx, &LIGHT_X_RANGE);
        self.ly = clamp_to(self.ly, &LIGHT_Y_RANGE);
        self.lz = clamp_to(self.lz, &LIGHT_Z_RANGE);
        self.color &= 0xffffff;
    }
}

pub const INTENSITY_RANGE: RangeInclusive<f32> = 0.0..=10.0;
pub const DISTANCE_RANGE: RangeInclusive<f32> = 200.0..=800.0;
pub const ANGLE_RANGE: RangeInclusive<f32> = 0.0..=FRAC_PI_3;
pub const PENUMBRA_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const DECAY_RANGE: RangeInclusive<f32> = 1.0..=2.0;
pub const FOCUS_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Spotlight panel state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LightParams {
    pub light_color: u32,
    pub intensity: f32,
    pub distance: f32,
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
    pub focus: f32,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            light_color: 0xffffff,
            intensity: 5.0,
            distance: 400.0,
            angle: FRAC_PI_4,
            penumbra: 0.1,
            decay: 2.0,
            focus: 1.0,
        }
    }
}

impl LightParams {
    pub fn clamp(&mut self) {
        self.light_color &= 0xffffff;
        self.intensity = clamp_to(self.intensity, &INTENSITY_RANGE);
        self.distance = clamp_to(self.distance, &DISTANCE_RANGE);
        self.angle = clamp_to(self.angle, &ANGLE_RANGE);
        self.penumbra = clamp_to(self.penumbra, &PENUMBRA_RANGE);
        self.decay = clamp_to(self.decay, &DECAY_RANGE);
        self.focus = clamp_to(self.focus, &FOCUS_RANGE);
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_initial_panel() {
        let params = Params::default();
        assert_eq!(params.shape, Shape::Tube);
        assert_eq!(params.material, MaterialKind::Flat);
        assert_eq!(params.mode_control, ModeControl::Translate);
        assert_eq!(params.animation, Animation::Disable);
        assert_eq!(params.color, 0xffffff);
        assert_eq!(params.light_position(), glam::Vec3::new(-50.0, 200.0, 50.0));
    }

    #[test]
    fn test_all_lists_are_unique() {
        let shapes: std::collections::HashSet<_> = Shape::ALL.iter().collect();
        assert_eq!(shapes.len(), Shape::ALL.len());
        let materials: std::collections::HashSet<_> = MaterialKind::ALL.iter().collect();
        assert_eq!(materials.len(), MaterialKind::ALL.len());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Shape::Teapot.label(), "TeaPot");
        assert_eq!(Shape::TorusKnot.label(), "TorusKnox");
        assert_eq!(MaterialKind::Wireframe.label(), "Lines");
        assert_eq!(MaterialKind::Smooth.label(), "Solid");
        assert_eq!(Animation::Scaling.label(), "Scaling");
    }

    #[test]
    fn test_serde_uses_panel_keys() {
        let json = serde_json::to_string(&Params::default()).unwrap();
        assert!(json.contains("\"shape\":\"tube\""));
        assert!(json.contains("\"modeControl\":\"translate\""));
        assert!(json.contains("\"animation\":\"disable\""));

        let parsed: Params =
            serde_json::from_str(r#"{"shape":"torusKnox","material":"wireframe","animation":"aniRotation"}"#)
                .unwrap();
        assert_eq!(parsed.shape, Shape::TorusKnot);
        assert_eq!(parsed.material, MaterialKind::Wireframe);
        assert_eq!(parsed.animation, Animation::Rotation);
        // Missing fields fall back to defaults
        assert_eq!(parsed.ly, 200.0);
    }

    #[test]
    fn test_params_clamp() {
        let mut params = Params {
            lx: -500.0,
            ly: 1000.0,
            lz: 20.0,
            color: 0xff_123456,
            ..Params::default()
        };
        params.clamp();
        assert_eq!(params.lx, -100.0);
        assert_eq!(params.ly, 400.0);
        assert_eq!(params.lz, 20.0);
        assert_eq!(params.color, 0x123456);
    }

    #[test]
    fn test_light_params_clamp() {
        let mut light = LightParams {
            intensity: 20.0,
            distance: 10.0,
            angle: 3.0,
            decay: 0.0,
            ..LightParams::default()
        };
        light.clamp();
        assert_eq!(light.intensity, 10.0);
        assert_eq!(light.distance, 200.0);
        assert!((light.angle - FRAC_PI_3).abs() < 1e-6);
        assert_eq!(light.decay, 1.0);
    }
}
