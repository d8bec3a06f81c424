use nalgebra::Vector2;

use crate::dynamics::state::{Accel, Environment, State};
use crate::vehicle::Rocket;

// ---------------------------------------------------------------------------
// Planar equations of motion
// ---------------------------------------------------------------------------

/// Accelerations for the current state under a given thrust magnitude.
///
/// Forces & moments:
///   1. Thrust along the body axis, tilted `theta` from vertical
///   2. Gravity, `-g * mass` along y
///   3. Gimbal torque, `thrust * sin(gimbal) * moment_arm`
///
/// The angular term is added to `theta` (degrees) without unit conversion.
pub fn accelerations(state: &State, thrust: f64, rocket: &Rocket, env: &Environment) -> Accel {
    let (sin_theta, cos_theta) = state.theta.to_radians().sin_cos();
    let f_thrust = Vector2::new(thrust * sin_theta, thrust * cos_theta);

    let torque = thrust * state.gimbal_theta.to_radians().sin() * rocket.moment_arm;

    let f_net = f_thrust - Vector2::new(0.0, env.gravity * rocket.mass);

    Accel {
        linear: f_net / rocket.mass,
        angular: torque / rocket.moment_of_inertia,
    }
}

/// Store freshly computed accelerations on the state.
pub fn apply_accelerations(state: &mut State, accel: &Accel) {
    state.accel = accel.linear;
    state.theta_accel = accel.angular;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
