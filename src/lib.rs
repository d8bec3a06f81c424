pub mod config;
pub mod dynamics;
mod gnc_mod;
pub mod io;
pub mod math;
pub mod propulsion;
pub mod sim;
pub mod vehicle;

// The gnc module: expose gnc_mod as `gnc` publicly
pub mod gnc {
    pub use crate::gnc_mod::*;
}

pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::dynamics::state::{Environment, State, G};
    pub use crate::gnc::{AttitudeHold, Controller, FixedGimbal};
    pub use crate::propulsion::{ThrustCurve, ThrustProfile};
    pub use crate::sim::{FlightSimulator, Phase, Trajectory};
    pub use crate::vehicle::{Rocket, RocketBuilder};
}
