use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use ascent_sim::io;
use ascent_sim::sim::{self, Channel, TrajectoryRecord};
use ascent_sim::vehicle::{presets, VehicleConfig};

#[derive(Parser)]
#[command(author, version, about = "Plot the vertical ascent record")]
struct Cli {
    /// Vehicle configuration JSON (defaults to the Falcon 9 suborbital preset)
    vehicle: Option<PathBuf>,
}

fn main() -> eframe::Result {
    let cli = Cli::parse();
    let vehicle = match &cli.vehicle {
        Some(path) => match io::load_config_file(path) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => presets::falcon9_suborbital(),
    };
    let record = match sim::run_record(&vehicle) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let app = SimViz { record, vehicle };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Ascent Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

struct SimViz {
    record: TrajectoryRecord,
    vehicle: VehicleConfig,
}

impl SimViz {
    fn points(&self, channel: Channel, thrusting: bool) -> Vec<[f64; 2]> {
        if thrusting {
            self.record.thrusting(channel).map(|p| [f64::from(p.time), p.value]).collect()
        } else {
            self.record.coasting(channel).map(|p| [f64::from(p.time), p.value]).collect()
        }
    }
}

impl eframe::App for SimViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Vehicle: {}", self.vehicle.name));
            let apogee = self.record.rows.iter().map(|r| r.altitude).fold(0.0_f64, f64::max);
            let impact = self
                .record
                .meta
                .impact
                .map_or("none".to_string(), |i| format!("t={} s at {:.0} m/s", i.time, i.velocity));
            ui.label(format!(
                "Apogee: {:.1} km  |  Liftoff TWR: {:.2}  |  Burn: {} s  |  Impact: {}",
                apogee / 1000.0,
                self.vehicle.liftoff_twr(),
                self.record.meta.thrust_section.len(),
                impact,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let cell_w = available.x / 4.0 - 8.0;
            let cell_h = available.y / 2.0 - 24.0;

            for row in Channel::ALL.chunks(4) {
                ui.horizontal(|ui| {
                    for &channel in row {
                        ui.vertical(|ui| {
                            ui.label(channel.label());
                            let thrust = self.points(channel, true);
                            let coast = self.points(channel, false);
                            Plot::new(channel.name())
                                .width(cell_w)
                                .height(cell_h)
                                .x_axis_label("Time (s)")
                                .legend(Legend::default())
                                .show(ui, |plot_ui| {
                                    plot_ui.line(Line::new("Thrust", PlotPoints::from(thrust)));
                                    plot_ui.line(Line::new("Coast", PlotPoints::from(coast)));
                                });
                        });
                    }
                });
            }
        });
    }
}
