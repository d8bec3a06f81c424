//! Scenario configuration loaded from TOML.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dynamics::state::{Environment, G};
use crate::gnc::{AttitudeHold, Controller, FixedGimbal, Pid};
use crate::vehicle::{presets, Rocket, VehicleError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Full scenario: integration grid, vehicle, environment and gimbal control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub time_step: f64,        // s
    pub max_time: f64,         // s
    pub thrust_curve: PathBuf, // two-column time/thrust CSV
    pub vehicle: VehicleConfig,
    pub environment: EnvironmentConfig,
    pub controller: ControllerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VehicleConfig {
    pub name: String,
    pub mass: f64,           // kg
    pub moment_arm: f64,     // m
    pub moment_inertia: f64, // kg·m^2
    pub initial_angle: f64,  // deg from vertical
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    pub gravity: f64, // m/s^2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControllerConfig {
    Fixed {
        #[serde(default)]
        gimbal: f64,
    },
    AttitudeHold {
        #[serde(default)]
        target_theta: f64,
        max_gimbal: f64,
        kp: f64,
        #[serde(default)]
        ki: f64,
        #[serde(default)]
        kd: f64,
        #[serde(default)]
        integral_limit: Option<f64>,
    },
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_step: 0.005,
            max_time: 60.0,
            thrust_curve: PathBuf::from("data/demo_motor.csv"),
            vehicle: VehicleConfig::default(),
            environment: EnvironmentConfig::default(),
            controller: ControllerConfig::default(),
        }
    }
}

impl Default for VehicleConfig {
    fn default() -> Self {
        let r = presets::h13_demo();
        Self {
            name: r.name,
            mass: r.mass,
            moment_arm: r.moment_arm,
            moment_inertia: r.moment_of_inertia,
            initial_angle: r.initial_angle,
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self { gravity: G }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig::Fixed { gimbal: 0.0 }
    }
}

impl SimConfig {
    /// Read, parse and validate a TOML scenario file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Reading configuration from '{}'", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("time_step", self.time_step)?;
        positive("max_time", self.max_time)?;
        positive("vehicle.mass", self.vehicle.mass)?;
        positive("vehicle.moment_inertia", self.vehicle.moment_inertia)?;
        finite("vehicle.moment_arm", self.vehicle.moment_arm)?;
        finite("vehicle.initial_angle", self.vehicle.initial_angle)?;
        finite("environment.gravity", self.environment.gravity)?;
        if self.time_step > self.max_time {
            return Err(ConfigError::Invalid {
                field: "time_step",
                reason: format!("{} s exceeds max_time {} s", self.time_step, self.max_time),
            });
        }
        if let ControllerConfig::AttitudeHold { max_gimbal, .. } = self.controller {
            positive("controller.max_gimbal", max_gimbal)?;
        }
        Ok(())
    }

    pub fn rocket(&self) -> Result<Rocket, VehicleError> {
        let v = &self.vehicle;
        let rocket = Rocket {
            name: v.name.clone(),
            mass: v.mass,
            moment_of_inertia: v.moment_inertia,
            moment_arm: v.moment_arm,
            initial_angle: v.initial_angle,
        };
        rocket.validate()?;
        Ok(rocket)
    }

    pub fn environment(&self) -> Environment {
        Environment {
            gravity: self.environment.gravity,
        }
    }

    /// Instantiate the configured gimbal controller.
    pub fn controller(&self) -> Box<dyn Controller> {
        match self.controller {
            ControllerConfig::Fixed { gimbal } => Box::new(FixedGimbal(gimbal)),
            ControllerConfig::AttitudeHold {
                target_theta,
                max_gimbal,
                kp,
                ki,
                kd,
                integral_limit,
            } => {
                let mut pid = Pid::new(kp, ki, kd);
                if let Some(limit) = integral_limit {
                    pid = pid.with_integral_limit(limit);
                }
                Box::new(AttitudeHold::new(target_theta, max_gimbal, pid))
            }
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_reference_scenario() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.time_step, 0.005);
        assert_eq!(config.vehicle.initial_angle, 10.0);
        assert_eq!(config.environment().gravity, 9.81);
    }

    #[test]
    fn full_scenario_parses() {
        let toml = r#"
            time_step = 0.01
            max_time = 20.0
            thrust_curve = "motors/F15.csv"

            [vehicle]
            name = "Test"
            mass = 1.2
            moment_arm = 0.35
            moment_inertia = 0.08
            initial_angle = 0.0

            [environment]
            gravity = 3.71

            [controller]
            kind = "attitude_hold"
            max_gimbal = 6.0
            kp = 0.5
            kd = 0.1
        "#;
        let config = SimConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.thrust_curve, PathBuf::from("motors/F15.csv"));
        assert_eq!(config.rocket().unwrap().mass, 1.2);
        assert_eq!(config.environment().gravity, 3.71);
        assert_eq!(config.controller().name(), "AttitudeHold");
    }

    #[test]
    fn fixed_controller_is_default() {
        let config = SimConfig::default();
        assert_eq!(config.controller().name(), "FixedGimbal");
    }

    #[test]
    fn non_positive_time_step_rejected() {
        let err = SimConfig::from_toml_str("time_step = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "time_step", .. }));
    }

    #[test]
    fn non_positive_mass_rejected() {
        let err = SimConfig::from_toml_str("[vehicle]\nmass = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "vehicle.mass", .. }));
    }

    #[test]
    fn unknown_keys_are_errors() {
        let err = SimConfig::from_toml_str("timestep = 0.1").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
