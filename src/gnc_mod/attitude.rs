use crate::dynamics::state::State;
use super::controller::Controller;
use super::pid::Pid;

// ---------------------------------------------------------------------------
// Attitude hold: gimbal the motor to drive theta toward a target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AttitudeHold {
    pub target_theta: f64, // deg from vertical
    pub max_gimbal: f64,   // deg, symmetric limit
    pub pid: Pid,
}

impl AttitudeHold {
    pub fn new(target_theta: f64, max_gimbal: f64, pid: Pid) -> Self {
        Self {
            target_theta,
            max_gimbal: max_gimbal.abs(),
            pid,
        }
    }

    /// Hold vertical with a ±5 deg gimbal, gains tuned for a ~1 kg model rocket.
    pub fn vertical() -> Self {
        Self::new(0.0, 5.0, Pid::new(0.8, 0.05, 0.3).with_integral_limit(20.0))
    }
}

impl Default for AttitudeHold {
    fn default() -> Self {
        Self::vertical()
    }
}

impl Controller for AttitudeHold {
    fn gimbal(&mut self, state: &State, _time: f64, dt: f64) -> f64 {
        let error = self.target_theta - state.theta;
        self.pid
            .update(error, dt)
            .clamp(-self.max_gimbal, self.max_gimbal)
    }

    fn reset(&mut self) {
        self.pid.reset();
    }

    fn name(&self) -> &str {
        "AttitudeHold"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_opposes_tilt() {
        let mut c = AttitudeHold::new(0.0, 5.0, Pid::new(1.0, 0.0, 0.0));
        let tilted = State::at_rest(0.0, 10.0, 2.0);
        assert_eq!(c.gimbal(&tilted, 0.0, 0.01), -2.0);
    }

    #[test]
    fn command_is_clamped() {
        let mut c = AttitudeHold::new(0.0, 5.0, Pid::new(10.0, 0.0, 0.0));
        let tilted = State::at_rest(0.0, 10.0, -30.0);
        assert_eq!(c.gimbal(&tilted, 0.0, 0.01), 5.0);
    }

    #[test]
    fn level_vehicle_needs_no_correction() {
        let mut c = AttitudeHold::vertical();
        assert_eq!(c.gimbal(&State::on_pad(0.0), 0.0, 0.01), 0.0);
        assert_eq!(c.name(), "AttitudeHold");
    }
}
