use crate::dynamics::state::State;

/// Outcome of the ground check at the end of an integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundContact {
    Airborne,
    /// `y` was clamped to zero; x and theta were not advanced this step.
    Grounded,
}

// ---------------------------------------------------------------------------
// Semi-implicit Euler with ground clamp
// ---------------------------------------------------------------------------

/// Advance `state` by `dt` using the accelerations already stored on it.
///
/// Velocities are always integrated. Only `y` moves when the vehicle ends
/// the step at or below the ground; the velocities are left as integrated.
pub fn semi_implicit_euler(state: &mut State, dt: f64) -> GroundContact {
    state.vel += state.accel * dt;
    state.theta_vel += state.theta_accel * dt;

    state.pos.y += state.vel.y * dt;
    if state.pos.y <= 0.0 {
        state.pos.y = 0.0;
        return GroundContact::Grounded;
    }

    state.pos.x += state.vel.x * dt;
    state.theta += state.theta_vel * dt;
    GroundContact::Airborne
}
