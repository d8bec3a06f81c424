use log::{debug, info, warn};
use thiserror::Error;

use crate::dynamics::planar;
use crate::dynamics::state::{Environment, State};
use crate::gnc::Controller;
use crate::propulsion::{index_for_time, ThrustCurveError, ThrustProfile};
use crate::vehicle::{Rocket, VehicleError};
use super::integrator::{semi_implicit_euler, GroundContact};
use super::trajectory::Trajectory;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation already complete (elapsed {elapsed:.4} s >= max {max_time:.4} s)")]
    OutOfRange { elapsed: f64, max_time: f64 },

    #[error(transparent)]
    ThrustCurve(#[from] ThrustCurveError),

    #[error(transparent)]
    Vehicle(#[from] VehicleError),
}

/// Where the simulator is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No step taken yet.
    Idle,
    /// `0 <= elapsed_time < max_time`.
    Running,
    /// `elapsed_time >= max_time`; `step()` fails until the clock is rewound.
    Complete,
}

// ---------------------------------------------------------------------------
// Flight simulator: fixed-step loop over the thrust profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FlightSimulator {
    rocket: Rocket,
    env: Environment,
    profile: ThrustProfile,
    initial: State,
    state: State,
    steps: usize,
    contact: GroundContact,
    trajectory: Trajectory,
}

impl FlightSimulator {
    /// Simulator for `rocket` sitting on the pad at its initial angle.
    pub fn new(rocket: Rocket, profile: ThrustProfile) -> Result<Self, SimError> {
        rocket.validate()?;
        let initial = State::on_pad(rocket.initial_angle);
        Ok(Self {
            env: Environment::default(),
            initial,
            state: initial,
            steps: 0,
            contact: contact_of(&initial),
            trajectory: Trajectory::with_capacity(profile.len()),
            rocket,
            profile,
        })
    }

    /// Resample raw `(time, thrust)` pairs and build the simulator.
    pub fn from_samples(
        rocket: Rocket,
        raw: &[(f64, f64)],
        dt: f64,
        max_time: f64,
    ) -> Result<Self, SimError> {
        let profile = ThrustProfile::build(raw, dt, max_time)?;
        Self::new(rocket, profile)
    }

    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Replace the launch state, e.g. to drop the vehicle from altitude.
    pub fn with_initial_state(mut self, state: State) -> Self {
        self.initial = state;
        self.state = state;
        self.contact = contact_of(&state);
        self
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Advance one `dt` using the gimbal angle currently on the state.
    pub fn step(&mut self) -> Result<(), SimError> {
        let thrust = self.next_thrust()?;
        self.advance(thrust);
        Ok(())
    }

    /// Advance one `dt`, asking `controller` for the gimbal angle first.
    pub fn step_with(&mut self, controller: &mut dyn Controller) -> Result<(), SimError> {
        let thrust = self.next_thrust()?;
        self.state.gimbal_theta = controller.gimbal(&self.state, self.elapsed_time(), self.dt());
        self.advance(thrust);
        Ok(())
    }

    /// Rewind the clock to zero and step until `max_time`.
    ///
    /// Kinematic state and trajectory are kept, so a second call continues
    /// the flight from where the first left off and appends to the log.
    /// Use [`reset`](Self::reset) for a clean rerun.
    pub fn run_to_completion(&mut self) -> &Trajectory {
        self.steps = 0;
        self.log_run_start("open loop");
        while let Some(thrust) = self.profile.get(self.thrust_index()) {
            self.advance(thrust);
        }
        self.log_run_end();
        &self.trajectory
    }

    /// Same as [`run_to_completion`](Self::run_to_completion) with a closed-loop
    /// gimbal controller.
    pub fn run_with(&mut self, controller: &mut dyn Controller) -> &Trajectory {
        self.steps = 0;
        self.log_run_start(controller.name());
        let dt = self.dt();
        while let Some(thrust) = self.profile.get(self.thrust_index()) {
            self.state.gimbal_theta = controller.gimbal(&self.state, self.elapsed_time(), dt);
            self.advance(thrust);
        }
        self.log_run_end();
        &self.trajectory
    }

    /// Restore the initial state and clear the trajectory.
    pub fn reset(&mut self) {
        self.state = self.initial;
        self.contact = contact_of(&self.initial);
        self.steps = 0;
        self.trajectory.clear();
    }

    /// Command a gimbal deflection (degrees) for subsequent steps.
    pub fn set_gimbal(&mut self, gimbal_deg: f64) {
        self.state.gimbal_theta = gimbal_deg;
    }

    /// Grid index for the current clock, `floor(elapsed_time / dt)` snapped
    /// against rounding noise.
    fn thrust_index(&self) -> usize {
        index_for_time(self.elapsed_time(), self.dt())
    }

    fn next_thrust(&self) -> Result<f64, SimError> {
        self.profile.get(self.thrust_index()).ok_or(SimError::OutOfRange {
            elapsed: self.elapsed_time(),
            max_time: self.max_time(),
        })
    }

    fn advance(&mut self, thrust: f64) {
        self.trajectory.record(&self.state);

        let accel = planar::accelerations(&self.state, thrust, &self.rocket, &self.env);
        planar::apply_accelerations(&mut self.state, &accel);
        let contact = semi_implicit_euler(&mut self.state, self.profile.dt());

        self.steps += 1;
        if contact != self.contact {
            match contact {
                GroundContact::Airborne => {
                    debug!("liftoff at t={:.3} s (thrust {:.2} N)", self.elapsed_time(), thrust)
                }
                GroundContact::Grounded => debug!(
                    "ground contact at t={:.3} s, x={:.2} m, speed {:.2} m/s",
                    self.elapsed_time(),
                    self.state.pos.x,
                    self.state.speed()
                ),
            }
            self.contact = contact;
        }
    }

    fn log_run_start(&self, mode: &str) {
        info!(
            "Running '{}' for {:.2} s at dt={} s ({} steps, {})",
            self.rocket.name,
            self.max_time(),
            self.dt(),
            self.profile.len(),
            mode
        );
        let weight = self.rocket.weight(&self.env);
        if self.profile.max_thrust() <= weight {
            warn!(
                "peak thrust {:.2} N never exceeds vehicle weight {:.2} N",
                self.profile.max_thrust(),
                weight
            );
        }
    }

    fn log_run_end(&self) {
        let apogee = self.trajectory.apogee().map_or(0.0, |(_, y)| y);
        info!(
            "Run complete: {} samples logged, apogee {:.1} m",
            self.trajectory.len(),
            apogee
        );
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        if self.steps >= self.profile.len() {
            Phase::Complete
        } else if self.steps == 0 && self.trajectory.is_empty() {
            Phase::Idle
        } else {
            Phase::Running
        }
    }

    /// Simulated time within the current run, s.
    pub fn elapsed_time(&self) -> f64 {
        self.steps as f64 * self.profile.dt()
    }

    pub fn step_index(&self) -> usize {
        self.steps
    }

    pub fn dt(&self) -> f64 {
        self.profile.dt()
    }

    pub fn max_time(&self) -> f64 {
        self.profile.max_time()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn rocket(&self) -> &Rocket {
        &self.rocket
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn profile(&self) -> &ThrustProfile {
        &self.profile
    }

    /// Simulation times for the logged samples of one run.
    ///
    /// Cut to the history length after a partial run. A continued second run
    /// logs more samples than the grid holds, so the full grid is returned.
    pub fn times(&self) -> &[f64] {
        let grid = self.profile.times();
        &grid[..self.trajectory.len().min(grid.len())]
    }

    /// Run clock at which logged sample `index` was taken, s.
    ///
    /// Samples appended by a continued run map back onto the grid, since
    /// the clock is rewound at the start of every run.
    pub fn sample_time(&self, index: usize) -> Option<f64> {
        let grid = self.profile.times();
        if index >= self.trajectory.len() || grid.is_empty() {
            return None;
        }
        grid.get(index % grid.len()).copied()
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn x_history(&self) -> &[f64] {
        self.trajectory.x_history()
    }

    pub fn y_history(&self) -> &[f64] {
        self.trajectory.y_history()
    }

    pub fn theta_history(&self) -> &[f64] {
        self.trajectory.theta_history()
    }
}

fn contact_of(state: &State) -> GroundContact {
    if state.on_ground() {
        GroundContact::Grounded
    } else {
        GroundContact::Airborne
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
