pub mod attitude;
pub mod controller;
pub mod pid;

pub use attitude::AttitudeHold;
pub use controller::{Controller, FixedGimbal};
pub use pid::Pid;
