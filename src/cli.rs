// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::params::{Animation, MaterialKind, ModeControl, Shape};

#[derive(Parser, Debug, Clone)]
#[command(name = "shape-viewer")]
#[command(about = "Interactive shape, material and spotlight viewer", long_about = None)]
pub struct Cli {
    /// Hide the control panel and FPS readout
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Directory holding Wood.jpg and the pisa/ cube faces
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Initial shape
    #[arg(long, value_enum)]
    pub shape: Option<Shape>,

    /// Initial material
    #[arg(long, value_enum)]
    pub material: Option<MaterialKind>,

    /// Initial animation
    #[arg(long, value_enum)]
    pub animation: Option<Animation>,

    /// Initial transform-control mode
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ModeControl>,

    /// JSON preset with "params" and "light" sections
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Start with the orthographic camera
    #[arg(long)]
    pub orthographic: bool,
}
