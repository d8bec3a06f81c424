use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::sim::{FlightSimulator, Trajectory};

#[derive(Serialize)]
struct Row {
    time: f64,
    x: f64,
    y: f64,
    theta: f64,
}

/// Write the trajectory log as CSV.
///
/// Columns: time, x, y, theta. Rows are paired with `times` index by index and
/// stop at the shorter of the two.
pub fn write_trajectory<W: Write>(
    writer: W,
    times: &[f64],
    trajectory: &Trajectory,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (&time, s) in times.iter().zip(trajectory.iter()) {
        wtr.serialize(Row {
            time,
            x: s.x,
            y: s.y,
            theta: s.theta,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write every logged sample of `sim`, stamped with its run clock.
///
/// Unlike [`write_trajectory`], no rows are dropped when a continued run has
/// logged more samples than the time grid holds.
pub fn write_flight<W: Write>(writer: W, sim: &FlightSimulator) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (i, s) in sim.trajectory().iter().enumerate() {
        wtr.serialize(Row {
            time: sim.sample_time(i).unwrap_or_default(),
            x: s.x,
            y: s.y,
            theta: s.theta,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_flight_file<P: AsRef<Path>>(path: P, sim: &FlightSimulator) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_flight(file, sim)
}

/// Write the trajectory to a CSV file at the given path.
pub fn write_trajectory_file<P: AsRef<Path>>(
    path: P,
    times: &[f64],
    trajectory: &Trajectory,
) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_trajectory(file, times, trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::State;

    #[test]
    fn csv_output_has_header_and_rows() {
        let mut traj = Trajectory::default();
        traj.record(&State::at_rest(0.0, 0.0, 10.0));
        traj.record(&State::at_rest(0.5, 2.25, 10.0));

        let mut buf = Vec::new();
        write_trajectory(&mut buf, &[0.0, 0.005], &traj).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "time,x,y,theta");
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert_eq!(lines[2], "0.005,0.5,2.25,10.0");
    }

    #[test]
    fn rows_stop_at_shorter_column() {
        let mut traj = Trajectory::default();
        traj.record(&State::on_pad(0.0));

        let mut buf = Vec::new();
        write_trajectory(&mut buf, &[0.0, 0.1, 0.2], &traj).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 2);
    }

    fn falling() -> FlightSimulator {
        let rocket = crate::vehicle::RocketBuilder::new("Drop").build().unwrap();
        FlightSimulator::from_samples(rocket, &[(0.0, 0.0), (1.0, 0.0)], 0.1, 1.0)
            .unwrap()
            .with_initial_state(State::at_rest(0.0, 50.0, 0.0))
    }

    fn row_count(sim: &FlightSimulator) -> usize {
        let mut buf = Vec::new();
        write_flight(&mut buf, sim).unwrap();
        String::from_utf8(buf).unwrap().lines().count() - 1
    }

    #[test]
    fn partial_run_writes_every_logged_step() {
        let mut sim = falling();
        for _ in 0..3 {
            sim.step().unwrap();
        }
        assert_eq!(row_count(&sim), 3);
        assert_eq!(sim.times().len(), 3);
    }

    #[test]
    fn continued_run_keeps_all_rows() {
        let mut sim = falling();
        sim.run_to_completion();
        sim.run_to_completion();

        let mut buf = Vec::new();
        write_flight(&mut buf, &sim).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let rows: Vec<&str> = output.lines().skip(1).collect();
        assert_eq!(rows.len(), 20);
        assert!(rows[10].starts_with("0.0,"));
    }
}
