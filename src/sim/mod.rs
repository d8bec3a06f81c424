pub mod integrator;
pub mod runner;
pub mod trajectory;

pub use integrator::{semi_implicit_euler, GroundContact};
pub use runner::{FlightSimulator, Phase, SimError};
pub use trajectory::{Sample, Trajectory};
