mod aabb;
mod color;
mod ray;

pub use aabb::AABB;
pub use color::{hex_to_rgb, hex_to_linear, rgb_to_hex, srgb_to_linear};
pub use ray::{intersect_aabb, intersect_plane, Ray};
