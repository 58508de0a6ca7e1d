pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod controls;
pub mod core;
pub mod frame;
pub mod geometry;
pub mod gui;
pub mod helpers;
pub mod material;
pub mod math;
pub mod params;
pub mod renderer;
pub mod scene;
pub mod simulate;
pub mod texture;
pub mod types;
pub mod window;

pub use app::{Viewer, ViewerCommand};
pub use params::{Animation, LightParams, MaterialKind, ModeControl, Params, Shape};
