use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G: f64 = 9.81; // gravitational acceleration, m/s^2

/// Environment the vehicle flies in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub gravity: f64, // m/s^2, acts along -y
}

impl Default for Environment {
    fn default() -> Self {
        Self { gravity: G }
    }
}

// ---------------------------------------------------------------------------
// Planar state: position, orientation and their rates
// ---------------------------------------------------------------------------

/// Kinematic state of the vehicle in the vertical plane.
/// Frame: x downrange, y up, origin at the launch pad.
/// Angles are in degrees, `theta` measured from vertical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub pos: Vector2<f64>,   // m
    pub vel: Vector2<f64>,   // m/s
    pub accel: Vector2<f64>, // m/s^2
    pub theta: f64,          // deg
    pub theta_vel: f64,      // deg/s
    pub theta_accel: f64,    // deg/s^2
    pub gimbal_theta: f64,   // deg, commanded gimbal deflection
}

impl State {
    /// Vehicle at rest on the pad, tilted `theta_deg` from vertical.
    pub fn on_pad(theta_deg: f64) -> Self {
        Self::at_rest(0.0, 0.0, theta_deg)
    }

    /// Vehicle at rest at an arbitrary position.
    pub fn at_rest(x: f64, y: f64, theta_deg: f64) -> Self {
        Self {
            pos: Vector2::new(x, y),
            vel: Vector2::zeros(),
            accel: Vector2::zeros(),
            theta: theta_deg,
            theta_vel: 0.0,
            theta_accel: 0.0,
            gimbal_theta: 0.0,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.pos.y
    }

    pub fn on_ground(&self) -> bool {
        self.pos.y <= 0.0
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::on_pad(0.0)
    }
}

// ---------------------------------------------------------------------------
// Accelerations produced by the dynamics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accel {
    pub linear: Vector2<f64>, // m/s^2
    pub angular: f64,         // deg/s^2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_state_is_grounded_and_still() {
        let s = State::on_pad(10.0);
        assert!(s.on_ground());
        assert_eq!(s.speed(), 0.0);
        assert_eq!(s.theta, 10.0);
        assert_eq!(s.gimbal_theta, 0.0);
    }

    #[test]
    fn default_environment_uses_g() {
        assert_eq!(Environment::default().gravity, 9.81);
    }
}
