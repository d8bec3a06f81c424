use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::sim::FlightSimulator;

/// Summary statistics computed from a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSummary {
    pub vehicle: String,
    pub samples: usize,
    pub apogee_m: f64,
    pub apogee_time_s: f64,
    pub max_downrange_m: f64,
    pub liftoff_time_s: Option<f64>,
    pub landing_time_s: Option<f64>,
    pub final_theta_deg: f64,
    pub total_impulse_ns: f64,
    pub burn_time_s: f64,
}

impl FlightSummary {
    /// Compute the summary from the simulator's trajectory log.
    ///
    /// Liftoff is the first logged sample above ground, landing the first
    /// sample back on the ground after that.
    pub fn from_run(sim: &FlightSimulator) -> Self {
        let traj = sim.trajectory();
        let y = traj.y_history();
        let time_of = |i: usize| sim.sample_time(i).unwrap_or_default();

        let (apogee_idx, apogee_m) = traj.apogee().unwrap_or((0, 0.0));
        let max_downrange_m = traj
            .x_history()
            .iter()
            .map(|x| x.abs())
            .fold(0.0_f64, f64::max);

        let liftoff = y.iter().position(|&v| v > 0.0);
        let landing = liftoff.and_then(|i| y[i..].iter().position(|&v| v <= 0.0).map(|j| i + j));

        FlightSummary {
            vehicle: sim.rocket().name.clone(),
            samples: traj.len(),
            apogee_m,
            apogee_time_s: time_of(apogee_idx),
            max_downrange_m,
            liftoff_time_s: liftoff.map(time_of),
            landing_time_s: landing.map(time_of),
            final_theta_deg: traj.last().map_or(sim.state().theta, |s| s.theta),
            total_impulse_ns: sim.profile().total_impulse(),
            burn_time_s: sim.profile().burn_time(),
        }
    }
}

/// Write the summary as pretty-printed JSON.
pub fn write_summary<W: Write>(writer: W, summary: &FlightSummary) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, summary)
}

/// Write the summary JSON to a file.
pub fn write_summary_file<P: AsRef<Path>>(path: P, summary: &FlightSummary) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_summary(file, summary)?;
    Ok(())
}
