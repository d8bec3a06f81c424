pub mod rocket;

pub use rocket::{presets, Rocket, RocketBuilder, VehicleError};
