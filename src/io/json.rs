use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::dynamics::state::FlightSample;
use crate::error::Result;
use crate::physics::aerodynamics::dynamic_pressure;
use crate::physics::gravity::{gravity_earth, EARTH_RADIUS};
use crate::sim::record::TrajectoryRecord;
use crate::vehicle::VehicleConfig;

// ---------------------------------------------------------------------------
// Vehicle configuration input
// ---------------------------------------------------------------------------

/// Read and validate a vehicle configuration.
pub fn load_config<R: Read>(reader: R) -> Result<VehicleConfig> {
    let config: VehicleConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config_file(path: impl AsRef<Path>) -> Result<VehicleConfig> {
    let file = File::open(path.as_ref())?;
    log::debug!("loading vehicle from {}", path.as_ref().display());
    load_config(BufReader::new(file))
}

// ---------------------------------------------------------------------------
// Flight summary
// ---------------------------------------------------------------------------

/// Summary statistics computed from a 3D trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSummary {
    pub apogee_m: f64,
    pub apogee_time_s: u32,
    pub max_speed_ms: f64,
    pub max_accel_ms2: f64,
    pub max_accel_g: f64,
    pub max_q_pa: f64,
    pub burnout_time_s: Option<u32>,
    pub flight_time_s: u32,
    pub final_altitude_m: f64,
    pub final_speed_ms: f64,
    pub grounded: bool,
}

impl FlightSummary {
    /// `None` for an empty trajectory.
    pub fn from_samples(samples: &[FlightSample]) -> Option<Self> {
        let first = samples.first()?;
        let last = samples.last()?;

        let apogee = samples
            .iter()
            .max_by(|a, b| a.altitude().total_cmp(&b.altitude()))
            .unwrap_or(first);

        let max_speed = samples.iter().map(|s| s.speed()).fold(0.0_f64, f64::max);

        // one second between samples
        let max_accel = samples
            .windows(2)
            .map(|w| (w[1].vel - w[0].vel).norm())
            .fold(0.0_f64, f64::max);

        let max_q = samples
            .iter()
            .map(|s| dynamic_pressure(s.speed(), s.altitude()))
            .fold(0.0_f64, f64::max);

        Some(FlightSummary {
            apogee_m: apogee.altitude(),
            apogee_time_s: apogee.time,
            max_speed_ms: max_speed,
            max_accel_ms2: max_accel,
            max_accel_g: max_accel / gravity_earth(EARTH_RADIUS),
            max_q_pa: max_q,
            burnout_time_s: samples.iter().find(|s| s.depleted).map(|s| s.time),
            flight_time_s: last.time - first.time,
            final_altitude_m: last.altitude(),
            final_speed_ms: last.speed(),
            grounded: last.grounded,
        })
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    vehicle: &'a VehicleConfig,
    performance: &'a FlightSummary,
}

/// Write vehicle and flight summary as pretty JSON.
pub fn write_summary<W: Write>(
    writer: &mut W,
    vehicle: &VehicleConfig,
    summary: &FlightSummary,
) -> Result<()> {
    let doc = SummaryDocument { vehicle, performance: summary };
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_summary_file(
    path: impl AsRef<Path>,
    vehicle: &VehicleConfig,
    summary: &FlightSummary,
) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_summary(&mut file, vehicle, summary)?;
    file.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Planar record
// ---------------------------------------------------------------------------

/// Write the planar record (rows and metadata) as JSON.
pub fn write_record<W: Write>(writer: &mut W, record: &TrajectoryRecord) -> Result<()> {
    serde_json::to_writer(&mut *writer, record)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_record_file(path: impl AsRef<Path>, record: &TrajectoryRecord) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_record(&mut file, record)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::sim::runner::{run_record, run_trajectory};
    use crate::vehicle::{presets, PhaseKind, VehicleConfigBuilder};

    fn hopper() -> VehicleConfig {
        VehicleConfigBuilder::new("hopper")
            .initial_mass(1_000.0)
            .final_mass(950.0)
            .thrust(15_000.0)
            .isp(300.0)
            .cd(0.5)
            .area(0.1)
            .end(600)
            .build()
            .unwrap()
    }

    #[test]
    fn config_round_trips_through_json() {
        let original = presets::falcon9_orbit();
        let json = serde_json::to_string(&original).unwrap();
        let loaded = load_config(json.as_bytes()).unwrap();
        assert_eq!(loaded, original);
        assert!(loaded.phases.get(PhaseKind::GravityTurn).is_some());
    }

    #[test]
    fn load_rejects_invalid_config() {
        let json = r#"{
            "initial_mass": 100, "final_mass": 200, "thrust": 1000,
            "isp": 300, "cd": 0.3, "area": 1.0, "end": 10
        }"#;
        assert!(matches!(
            load_config(json.as_bytes()),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn load_reports_malformed_json() {
        assert!(matches!(load_config("{ nope".as_bytes()), Err(SimError::Json(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        assert!(matches!(
            load_config_file("/nonexistent/vehicle.json"),
            Err(SimError::Io(_))
        ));
    }

    #[test]
    fn summary_of_hopper_flight() {
        let samples = run_trajectory(&hopper()).unwrap();
        let s = FlightSummary::from_samples(&samples).unwrap();
        assert!(s.apogee_m > 100.0);
        assert!(s.apogee_time_s > 0);
        assert!(s.burnout_time_s.is_some_and(|t| t < s.apogee_time_s));
        assert!(s.grounded);
        assert!(s.final_altitude_m.abs() < 1e-6);
        assert!(FlightSummary::from_samples(&[]).is_none());
    }

    #[test]
    fn summary_json_has_sections() {
        let vehicle = hopper();
        let samples = run_trajectory(&vehicle).unwrap();
        let summary = FlightSummary::from_samples(&samples).unwrap();

        let mut buf = Vec::new();
        write_summary(&mut buf, &vehicle, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["vehicle"]["name"], "hopper");
        assert!(value["performance"]["apogee_m"].is_number());
    }

    #[test]
    fn record_json_keeps_meta() {
        let record = run_record(&hopper()).unwrap();
        let mut buf = Vec::new();
        write_record(&mut buf, &record).unwrap();
        let back: TrajectoryRecord = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back.meta, record.meta);
        assert_eq!(back.len(), record.len());
    }
}
