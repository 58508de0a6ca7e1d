mod orbit;
mod transform;

pub use orbit::OrbitControls;
pub use transform::{pick, Axis, TransformControls};
