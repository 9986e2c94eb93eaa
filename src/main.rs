use std::path::PathBuf;

use clap::Parser;

use ascent_sim::io::{self, FlightSummary};
use ascent_sim::orbital::{self, Apsides};
use ascent_sim::physics::gravity::{EARTH_RADIUS, MU_EARTH};
use ascent_sim::sim::{self, ApsisTracker, DepletionDetector, EventKind, GroundContactDetector};
use ascent_sim::vehicle::presets;
use ascent_sim::Result;

#[derive(Parser)]
#[command(author, version, about = "Rocket ascent and reference orbit report")]
struct Cli {
    /// Vehicle configuration JSON (defaults to the Falcon 9 orbit preset)
    vehicle: Option<PathBuf>,

    /// Write trajectory, record and summary files into this directory
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let vehicle = match &cli.vehicle {
        Some(path) => io::load_config_file(path)?,
        None => presets::falcon9_orbit(),
    };

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let mut apsis = ApsisTracker::new();
    let mut depletion = DepletionDetector::default();
    let mut ground = GroundContactDetector;
    let (trajectory, events) =
        sim::run_trajectory_with(&vehicle, &mut [&mut apsis, &mut depletion, &mut ground])?;
    let record = sim::run_record(&vehicle)?;

    let Some(summary) = FlightSummary::from_samples(&trajectory) else {
        println!("  no samples");
        return Ok(());
    };

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  ASCENT SIMULATION — {}", vehicle.name);
    println!("====================================================================");
    println!();
    println!("  Vehicle Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Wet mass:      {:>10.0} kg  Dry mass:     {:>10.0} kg",
        vehicle.initial_mass, vehicle.final_mass
    );
    println!(
        "  Thrust:        {:>10.0} N   Isp:          {:>10.0} s",
        vehicle.thrust, vehicle.isp
    );
    println!(
        "  Liftoff TWR:   {:>10.2}     Cd x A:       {:>10.3} m^2",
        vehicle.liftoff_twr(),
        vehicle.cd * vehicle.area
    );
    println!("  Phases:        {:?}", vehicle.phases.iter().map(|p| p.kind()).collect::<Vec<_>>());
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &events {
        let label = match e.kind {
            EventKind::Apoapsis { .. } => "APOAPSIS",
            EventKind::Periapsis { .. } => "PERIAPSIS",
            EventKind::Depletion => "BURNOUT",
            EventKind::GroundContact => "IMPACT",
        };
        println!(
            "  {:<9} t={:>6}s   alt={:>10.0}m   vel={:>8.1}m/s",
            label,
            e.time,
            e.sample.altitude(),
            e.sample.speed()
        );
    }
    if let (Some(apo), Some(peri)) = (apsis.apoapsis(), apsis.periapsis()) {
        let apsides = Apsides { apoapsis: apo, periapsis: peri };
        println!(
            "  Orbit: e={:.4}  a={:.0} km  T={:.1} min",
            apsides.eccentricity(),
            apsides.semi_major_axis() / 1000.0,
            apsides.period(MU_EARTH) / 60.0
        );
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Max altitude:  {:>10.0} m   ({:.1} km at t={} s)",
        summary.apogee_m,
        summary.apogee_m / 1000.0,
        summary.apogee_time_s
    );
    println!("  Max speed:     {:>10.1} m/s", summary.max_speed_ms);
    println!(
        "  Max accel:     {:>10.1} m/s^2 ({:.1} g)",
        summary.max_accel_ms2, summary.max_accel_g
    );
    println!("  Max q:         {:>10.0} Pa", summary.max_q_pa);
    println!("  Flight time:   {:>10} s", summary.flight_time_s);
    println!();

    println!("  Vertical Profile (planar model)");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>10}  {:>9}  {:>6}  {:>10}  {:>6}",
        "t (s)", "alt (m)", "vel (m/s)", "TWR", "mass (kg)", "phase"
    );
    println!("  {}", "─".repeat(60));
    let every = (record.len() / 30).max(1);
    for (i, row) in record.rows.iter().enumerate() {
        if i % every != 0 && i != record.len() - 1 {
            continue;
        }
        let phase = if row.thrust > 0.0 { "BURN" } else { "COAST" };
        println!(
            "  {:>7}  {:>10.0}  {:>9.1}  {:>6.2}  {:>10.0}  {:>6}",
            row.time, row.altitude, row.velocity, row.twr, row.mass, phase
        );
    }
    if let Some(impact) = record.meta.impact {
        println!("  Impact at t={} s, {:.1} m/s", impact.time, impact.velocity);
    }
    println!();

    // -----------------------------------------------------------------------
    // Reference orbits
    // -----------------------------------------------------------------------
    println!("  Reference Orbits (RK4, two-body)");
    println!("  ──────────────────────────────────────────────────────────────────");
    for preset in orbital::presets::leo_450km() {
        let history = orbital::propagate_orbit(&preset.initial, preset.tspan, preset.h)?;
        if let Some(apsides) = Apsides::from_history(&history) {
            println!(
                "  {:<11} apo={:>7.1} km  peri={:>7.1} km  e={:.2e}  T={:.1} min",
                preset.name,
                (apsides.apoapsis.norm() - EARTH_RADIUS) / 1000.0,
                (apsides.periapsis.norm() - EARTH_RADIUS) / 1000.0,
                apsides.eccentricity(),
                apsides.period(MU_EARTH) / 60.0
            );
        }
    }
    println!();

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------
    if let Some(dir) = &cli.out {
        std::fs::create_dir_all(dir)?;
        io::csv::write_samples_file(dir.join("trajectory.csv"), &trajectory)?;
        io::csv::write_record_file(dir.join("record.csv"), &record)?;
        io::json::write_record_file(dir.join("record.json"), &record)?;
        io::json::write_summary_file(dir.join("summary.json"), &vehicle, &summary)?;
        println!("  Wrote trajectory, record and summary to {}", dir.display());
    }

    println!("  Simulation: {} steps, dt=1 s", trajectory.len());
    println!("====================================================================");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_is_not_a_vehicle_path() {
        let err = Cli::try_parse_from(["ascent-sim", "--help"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn parses_vehicle_and_out_dir() {
        let cli = Cli::try_parse_from(["ascent-sim", "f9.json", "--out", "run"]).unwrap();
        assert_eq!(cli.vehicle, Some(PathBuf::from("f9.json")));
        assert_eq!(cli.out, Some(PathBuf::from("run")));

        let cli = Cli::try_parse_from(["ascent-sim"]).unwrap();
        assert!(cli.vehicle.is_none() && cli.out.is_none());
    }
}
