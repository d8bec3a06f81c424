pub mod planar;
pub mod state;

pub use planar::{accelerations, apply_accelerations};
pub use state::{Accel, Environment, State, G};
