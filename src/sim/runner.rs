use crate::dynamics::planar::{planar_step, PlanarState};
use crate::dynamics::state::{FlightSample, KinematicState};
use crate::dynamics::step::step;
use crate::error::Result;
use crate::physics::aerodynamics::dynamic_pressure;
use crate::physics::gravity::EARTH_RADIUS;
use crate::vehicle::VehicleConfig;
use super::event::{EventDetector, FlightEvent};
use super::record::{Impact, RecordRow, TrajectoryRecord};

// ---------------------------------------------------------------------------
// Planar record (chart data)
// ---------------------------------------------------------------------------

/// Fly the vertical model from `start` to `end` and record every channel.
///
/// A time `t > start` is recorded when it is a multiple of
/// `sample_interval` or the vehicle is at or below the surface. A recorded
/// step below the surface is lifted back onto it (velocity is kept, it is the
/// impact speed). The run stops at the first recorded surface contact with
/// the engine off.
pub fn run_record(config: &VehicleConfig) -> Result<TrajectoryRecord> {
    config.validate()?;
    log::debug!("planar record '{}': t={}..={}", config.name, config.start, config.end);

    let mut state = PlanarState::on_pad(config);
    let mut record = TrajectoryRecord::default();

    for t in config.start..=config.end {
        let s = planar_step(&state, config);
        state = s.next;

        let on_surface = state.pos.y <= EARTH_RADIUS;
        if t <= config.start || (t % config.sample_interval != 0 && !on_surface) {
            continue;
        }

        if state.pos.y < EARTH_RADIUS {
            state.pos.y = EARTH_RADIUS;
        }
        record.push(RecordRow {
            time: t,
            altitude: state.altitude(),
            velocity: state.vel.y,
            acceleration: s.acceleration,
            gravity: s.gravity,
            twr: s.twr,
            mass: state.mass,
            dynamic_pressure: dynamic_pressure(state.vel.norm(), state.pos.norm() - EARTH_RADIUS),
            thrust: s.thrust,
        });

        if on_surface && s.thrust <= 0.0 {
            let impact = Impact { time: t, velocity: state.vel.norm() };
            log::info!("impact at t={}s, {:.1} m/s", impact.time, impact.velocity);
            record.meta.impact = Some(impact);
            break;
        }
    }

    log::debug!("planar record '{}': {} rows", config.name, record.len());
    Ok(record)
}

// ---------------------------------------------------------------------------
// 3D trajectory
// ---------------------------------------------------------------------------

/// Fly the full 3D model from `start` to `end`, keeping every step.
///
/// Stops after the first step that sank below the surface and returns the
/// partial trajectory; that last sample is already clamped onto the ground.
pub fn run_trajectory(config: &VehicleConfig) -> Result<Vec<FlightSample>> {
    let (samples, _) = run_trajectory_with(config, &mut [])?;
    Ok(samples)
}

/// `run_trajectory` with passive event detectors fed every pair of
/// consecutive samples.
pub fn run_trajectory_with(
    config: &VehicleConfig,
    detectors: &mut [&mut dyn EventDetector],
) -> Result<(Vec<FlightSample>, Vec<FlightEvent>)> {
    config.validate()?;
    log::debug!("trajectory '{}': t={}..={}", config.name, config.start, config.end);

    let capacity = (config.end - config.start) as usize + 1;
    let mut samples: Vec<FlightSample> = Vec::with_capacity(capacity.min(100_000));
    let mut events = Vec::new();
    let mut state = KinematicState::on_pad(config);

    for _ in config.start..=config.end {
        let sample = step(&state, config);
        state = sample.next_state();

        if let Some(prev) = samples.last() {
            for det in detectors.iter_mut() {
                if let Some(kind) = det.check(prev, &sample) {
                    events.push(FlightEvent { time: sample.time, kind, sample });
                }
            }
        }
        samples.push(sample);

        if sample.grounded {
            log::info!("ground contact at t={}s, trajectory ends", sample.time);
            break;
        }
    }

    Ok((samples, events))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
