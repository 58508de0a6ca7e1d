use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use thiserror::Error;

pub const COLOR_MAP_FILE: &str = "Wood.jpg";
pub const ENVIRONMENT_DIR: &str = "pisa";
/// Cube face files in +X, -X, +Y, -Y, +Z, -Z order
pub const CUBE_FACE_FILES: [&str; 6] = ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"];

const FALLBACK_COLOR_MAP_SIZE: u32 = 256;
const FALLBACK_CUBE_SIZE: u32 = 128;
pub const DISC_SIZE: u32 = 32;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("failed to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cube face {path} is {width}x{height}, expected a square {expected}x{expected}")]
    FaceSize {
        path: PathBuf,
        width: u32,
        height: u32,
        expected: u32,
    },
}

/// Six square faces of equal size
#[derive(Debug, Clone)]
pub struct CubeImages {
    pub faces: [RgbaImage; 6],
}

impl CubeImages {
    pub fn size(&self) -> u32 {
        self.faces[0].width()
    }
}

pub fn load_image(path: &Path) -> Result<RgbaImage, TextureError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| TextureError::Load {
            path: path.to_path_buf(),
            source,
        })
}

pub fn load_cube(dir: &Path) -> Result<CubeImages, TextureError> {
    let paths = CUBE_FACE_FILES.map(|file| dir.join(file));
    let faces = [
        load_image(&paths[0])?,
        load_image(&paths[1])?,
        load_image(&paths[2])?,
        load_image(&paths[3])?,
        load_image(&paths[4])?,
        load_image(&paths[5])?,
    ];

    let expected = faces[0].width();
    for (face, path) in faces.iter().zip(&paths) {
        if face.width() != expected || face.height() != expected {
            return Err(TextureError::FaceSize {
                path: path.clone(),
                width: face.width(),
                height: face.height(),
                expected,
            });
        }
    }
    Ok(CubeImages { faces })
}

/// Wood map from the asset root, or the procedural stand-in
pub fn color_map_or_fallback(asset_dir: &Path) -> RgbaImage {
    let path = asset_dir.join(COLOR_MAP_FILE);
    match load_image(&path) {
        Ok(image) => {
            log::info!("Loaded color map {} ({}x{})", path.display(), image.width(), image.height());
            image
        }
        Err(e) => {
            log::warn!("{}; using procedural wood", e);
            procedural_wood(FALLBACK_COLOR_MAP_SIZE)
        }
    }
}

/// Environment cube from the asset root, or a gradient sky
pub fn environment_or_fallback(asset_dir: &Path) -> CubeImages {
    let dir = asset_dir.join(ENVIRONMENT_DIR);
    match load_cube(&dir) {
        Ok(cube) => {
            log::info!("Loaded environment cube {} ({}px faces)", dir.display(), cube.size());
            cube
        }
        Err(e) => {
            log::warn!("{}; using gradient sky", e);
            gradient_sky(FALLBACK_CUBE_SIZE)
        }
    }
}

/// Native open dialog for a replacement color map
pub fn pick_image_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("LoadImage texture")
        .add_filter("Image", &["png", "jpg", "jpeg", "bmp"])
        .pick_file()
}

/// Ring pattern with a little grain, in the browns of a wood plank
pub fn procedural_wood(size: u32) -> RgbaImage {
    let light = [196.0, 148.0, 96.0];
    let dark = [128.0, 84.0, 48.0];
    RgbaImage::from_fn(size, size, |x, y| {
        let u = x as f32 / size as f32;
        let v = y as f32 / size as f32;
        let warp = (v * std::f32::consts::TAU * 2.0).sin() * 0.02;
        let ring = ((u + warp) * 24.0).fract();
        let grain = ((x.wrapping_mul(73) ^ y.wrapping_mul(151)) % 17) as f32 / 17.0 * 0.08;
        let t = (ring * std::f32::consts::PI).sin().powi(2) * 0.9 + grain;
        let c = |i: usize| (light[i] + (dark[i] - light[i]) * t.min(1.0)) as u8;
        Rgba([c(0), c(1), c(2), 255])
    })
}

/// Vertical gradient: horizon grey at the equator, blue overhead, brown below
pub fn gradient_sky(size: u32) -> CubeImages {
    let zenith = [70.0, 120.0, 200.0];
    let horizon = [200.0, 210.0, 220.0];
    let nadir = [90.0, 80.0, 70.0];

    let face = |index: usize| {
        RgbaImage::from_fn(size, size, |x, y| {
            let dir = cube_direction(index, x, y, size);
            let h = dir.y / dir.length();
            let (from, to, t) = if h >= 0.0 { (horizon, zenith, h) } else { (horizon, nadir, -h) };
            let c = |i: usize| (from[i] + (to[i] - from[i]) * t.sqrt()) as u8;
            Rgba([c(0), c(1), c(2), 255])
        })
    };
    CubeImages {
        faces: [face(0), face(1), face(2), face(3), face(4), face(5)],
    }
}

/// Direction through texel centre (x, y) of a cube face, standard cube map layout
fn cube_direction(face: usize, x: u32, y: u32, size: u32) -> glam::Vec3 {
    let s = 2.0 * (x as f32 + 0.5) / size as f32 - 1.0;
    let t = 2.0 * (y as f32 + 0.5) / size as f32 - 1.0;
    match face {
        0 => glam::Vec3::new(1.0, -t, -s),
        1 => glam::Vec3::new(-1.0, -t, s),
        2 => glam::Vec3::new(s, 1.0, t),
        3 => glam::Vec3::new(s, -1.0, -t),
        4 => glam::Vec3::new(s, -t, 1.0),
        _ => glam::Vec3::new(-s, -t, -1.0),
    }
}

/// White disc with a soft edge, alpha carries the mask
pub fn disc_mask(size: u32) -> RgbaImage {
    let r = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let d = glam::Vec2::new(x as f32 + 0.5 - r, y as f32 + 0.5 - r).length() / r;
        let alpha = ((1.0 - d) * 4.0).clamp(0.0, 1.0);
        Rgba([255, 255, 255, (alpha * 255.0) as u8])
    })
}
