use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use gimbal_rocket_sim::config::SimConfig;
use gimbal_rocket_sim::io::json::FlightSummary;
use gimbal_rocket_sim::propulsion::ThrustCurve;
use gimbal_rocket_sim::sim::FlightSimulator;

fn main() -> eframe::Result {
    pretty_env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(&path).unwrap_or_else(|e| fail(&e)),
        None => SimConfig::default(),
    };
    let sim = simulate(&config).unwrap_or_else(|e| fail(e.as_ref()));

    let app = SimViz {
        summary: FlightSummary::from_run(&sim),
        times: sim.times().to_vec(),
        x: sim.x_history().to_vec(),
        y: sim.y_history().to_vec(),
        theta: sim.theta_history().to_vec(),
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Rocket Simulation Trajectory", options, Box::new(|_| Ok(Box::new(app))))
}

fn simulate(config: &SimConfig) -> Result<FlightSimulator, Box<dyn std::error::Error>> {
    let profile = ThrustCurve::from_path(&config.thrust_curve)?
        .resample(config.time_step, config.max_time)?;
    let mut sim = FlightSimulator::new(config.rocket()?, profile)?
        .with_environment(config.environment());
    sim.run_with(config.controller().as_mut());
    Ok(sim)
}

fn fail(err: &dyn std::error::Error) -> ! {
    eprintln!("rocket-viz: {err}");
    std::process::exit(1)
}

struct SimViz {
    summary: FlightSummary,
    times: Vec<f64>,
    x: Vec<f64>,
    y: Vec<f64>,
    theta: Vec<f64>,
}

impl SimViz {
    fn series(&self, values: &[f64]) -> Vec<[f64; 2]> {
        let step = (values.len() / 2000).max(1);
        self.times
            .iter()
            .zip(values)
            .step_by(step)
            .map(|(&t, &v)| [t, v])
            .collect()
    }
}

impl eframe::App for SimViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Vehicle: {}", self.summary.vehicle));
            ui.label(format!(
                "Apogee: {:.1} m  |  Max downrange: {:.1} m  |  Impulse: {:.1} N·s  |  Samples: {}",
                self.summary.apogee_m,
                self.summary.max_downrange_m,
                self.summary.total_impulse_ns,
                self.summary.samples,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let third_w = available.x / 3.0 - 8.0;

            ui.horizontal(|ui| {
                for (id, label, values) in [
                    ("altitude", "Altitude vs. Time (m)", &self.y),
                    ("downrange", "Horizontal Position vs. Time (m)", &self.x),
                    ("attitude", "Attitude vs. Time (deg)", &self.theta),
                ] {
                    ui.vertical(|ui| {
                        ui.label(label);
                        let points = self.series(values);
                        Plot::new(id)
                            .width(third_w)
                            .height(available.y - 24.0)
                            .x_axis_label("Time (s)")
                            .show(ui, |plot_ui| {
                                plot_ui.line(Line::new(label, PlotPoints::from(points)));
                            });
                    });
                }
            });
        });
    }
}
