use thiserror::Error;

use crate::dynamics::state::Environment;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum VehicleError {
    #[error("vehicle parameter '{name}' must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

// ---------------------------------------------------------------------------
// Rigid planar rocket with a gimballed motor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Rocket {
    pub name: String,
    pub mass: f64,              // kg, constant (no propellant depletion)
    pub moment_of_inertia: f64, // kg·m^2 about the CG, pitch axis
    pub moment_arm: f64,        // m, CG to gimbal pivot
    pub initial_angle: f64,     // deg from vertical at ignition
}

impl Rocket {
    /// Check the parameters the dynamics divide by.
    pub fn validate(&self) -> Result<(), VehicleError> {
        positive("mass", self.mass)?;
        positive("moment_of_inertia", self.moment_of_inertia)?;
        if !self.moment_arm.is_finite() {
            return Err(VehicleError::InvalidParameter {
                name: "moment_arm",
                value: self.moment_arm,
            });
        }
        if !self.initial_angle.is_finite() {
            return Err(VehicleError::InvalidParameter {
                name: "initial_angle",
                value: self.initial_angle,
            });
        }
        Ok(())
    }

    /// Weight in `env`'s gravity field, N.
    pub fn weight(&self, env: &Environment) -> f64 {
        self.mass * env.gravity
    }

    /// Thrust-to-weight ratio for a given thrust in `env`.
    pub fn twr(&self, thrust: f64, env: &Environment) -> f64 {
        thrust / self.weight(env)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), VehicleError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(VehicleError::InvalidParameter { name, value })
    }
}

// ---------------------------------------------------------------------------
// Rocket builder
// ---------------------------------------------------------------------------

pub struct RocketBuilder {
    name: String,
    mass: f64,
    moment_of_inertia: f64,
    moment_arm: f64,
    initial_angle: f64,
}

impl RocketBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mass: 1.0,
            moment_of_inertia: 0.1,
            moment_arm: 0.5,
            initial_angle: 0.0,
        }
    }

    pub fn mass(mut self, v: f64) -> Self { self.mass = v; self }
    pub fn moment_of_inertia(mut self, v: f64) -> Self { self.moment_of_inertia = v; self }
    pub fn moment_arm(mut self, v: f64) -> Self { self.moment_arm = v; self }
    pub fn initial_angle(mut self, v: f64) -> Self { self.initial_angle = v; self }

    pub fn build(self) -> Result<Rocket, VehicleError> {
        let rocket = Rocket {
            name: self.name,
            mass: self.mass,
            moment_of_inertia: self.moment_of_inertia,
            moment_arm: self.moment_arm,
            initial_angle: self.initial_angle,
        };
        rocket.validate()?;
        Ok(rocket)
    }
}

// ---------------------------------------------------------------------------
// Preset vehicles
// ---------------------------------------------------------------------------

pub mod presets {
    use super::Rocket;

    /// Model rocket sized for an H-class motor, launched 10 deg off vertical.
    pub fn h13_demo() -> Rocket {
        Rocket {
            name: "H13 demo".into(),
            mass: 0.75,
            moment_of_inertia: 0.06,
            moment_arm: 0.4,
            initial_angle: 10.0,
        }
    }
}
