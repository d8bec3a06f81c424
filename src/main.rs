use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use gimbal_rocket_sim::config::SimConfig;
use gimbal_rocket_sim::io::{csv, json::{self, FlightSummary}};
use gimbal_rocket_sim::propulsion::ThrustCurve;
use gimbal_rocket_sim::sim::FlightSimulator;

/// Planar flight simulation of a gimballed rocket driven by a thrust curve.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Scenario TOML; the built-in H13 scenario is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Thrust curve CSV (time, thrust), overrides the scenario file
    #[arg(short, long)]
    thrust_curve: Option<PathBuf>,

    /// Trajectory CSV output
    #[arg(short, long, default_value = "trajectory.csv")]
    output: PathBuf,

    /// Flight summary JSON output
    #[arg(short, long)]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Default log level to "info"
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading scenario '{}'", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(curve) = args.thrust_curve {
        config.thrust_curve = curve;
    }

    let curve = ThrustCurve::from_path(&config.thrust_curve)
        .with_context(|| format!("reading thrust curve '{}'", config.thrust_curve.display()))?;
    let profile = curve.resample(config.time_step, config.max_time)?;

    let mut sim = FlightSimulator::new(config.rocket()?, profile)?
        .with_environment(config.environment());
    let mut controller = config.controller();
    sim.run_with(controller.as_mut());

    csv::write_flight_file(&args.output, &sim)
        .with_context(|| format!("writing '{}'", args.output.display()))?;
    info!("Trajectory written to '{}'", args.output.display());

    let summary = FlightSummary::from_run(&sim);
    if let Some(path) = &args.summary {
        json::write_summary_file(path, &summary)
            .with_context(|| format!("writing '{}'", path.display()))?;
        info!("Summary written to '{}'", path.display());
    }

    print_summary(&summary, controller.name());
    Ok(())
}

fn print_summary(s: &FlightSummary, controller: &str) {
    let fmt_opt = |t: Option<f64>| t.map_or_else(|| "-".to_string(), |t| format!("{t:.2} s"));

    println!();
    println!("====================================================================");
    println!("  GIMBALLED ROCKET SIMULATION: {}", s.vehicle);
    println!("====================================================================");
    println!("  Controller:     {controller}");
    println!("  Total impulse:  {:>8.1} N·s   Burn time: {:>6.2} s", s.total_impulse_ns, s.burn_time_s);
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Liftoff:        {}", fmt_opt(s.liftoff_time_s));
    println!("  Apogee:         {:>8.1} m at {:.2} s", s.apogee_m, s.apogee_time_s);
    println!("  Max downrange:  {:>8.1} m", s.max_downrange_m);
    println!("  Landing:        {}", fmt_opt(s.landing_time_s));
    println!("  Final attitude: {:>8.2} deg", s.final_theta_deg);
    println!("  Samples:        {}", s.samples);
    println!("====================================================================");
    println!();
}
