use crate::dynamics::state::State;

/// Source of gimbal commands for the simulation loop.
///
/// Implement this to close the loop around the vehicle attitude; the
/// simulator queries it once per step before evaluating the dynamics.
pub trait Controller {
    /// Gimbal deflection in degrees for the coming step.
    fn gimbal(&mut self, state: &State, time: f64, dt: f64) -> f64;

    /// Reset controller internal state (e.g., PID integrators).
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Open-loop constant gimbal command, degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedGimbal(pub f64);

impl Controller for FixedGimbal {
    fn gimbal(&mut self, _state: &State, _time: f64, _dt: f64) -> f64 {
        self.0
    }

    fn name(&self) -> &str {
        "FixedGimbal"
    }
}
