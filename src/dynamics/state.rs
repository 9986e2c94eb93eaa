use nalgebra::Vector3;
use serde::Serialize;

use crate::physics::gravity::EARTH_RADIUS;
use crate::vehicle::VehicleConfig;

// ---------------------------------------------------------------------------
// Kinematic state (owned by exactly one driver, replaced every step)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KinematicState {
    pub time: u32,           // s, time step this state is integrated at
    pub pos: Vector3<f64>,   // m, planet-centred
    pub vel: Vector3<f64>,   // m/s
    pub mass: f64,           // kg
}

impl KinematicState {
    /// On the surface at the north pole, creeping upward at 1 m/s so the
    /// velocity-aligned thrust has a direction on the first step.
    pub fn on_pad(config: &VehicleConfig) -> Self {
        Self {
            time: config.start,
            pos: Vector3::new(0.0, EARTH_RADIUS, 0.0),
            vel: Vector3::new(0.0, 1.0, 0.0),
            mass: config.initial_mass,
        }
    }

    pub fn altitude(&self) -> f64 {
        self.pos.norm() - EARTH_RADIUS
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }
}

// ---------------------------------------------------------------------------
// Flight sample (read-only snapshot of one step)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightSample {
    pub time: u32,
    pub pos: Vector3<f64>,      // m, after the step
    pub vel: Vector3<f64>,      // m/s, after the step
    pub gravity: Vector3<f64>,  // m/s^2, at the start of the step
    pub drag: Vector3<f64>,     // N
    pub thrust: Vector3<f64>,   // N, zero while coasting or after depletion
    pub mass: f64,              // kg, after the step
    pub grounded: bool,         // ground clamp fired in this step
    pub depleted: bool,         // thrust cut in this step because the tanks are dry
}

impl FlightSample {
    pub fn altitude(&self) -> f64 {
        self.pos.norm() - EARTH_RADIUS
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    pub fn is_thrusting(&self) -> bool {
        self.thrust.norm() > 0.0
    }

    /// State a driver continues from after this sample.
    pub fn next_state(&self) -> KinematicState {
        KinematicState {
            time: self.time.saturating_add(1),
            pos: self.pos,
            vel: self.vel,
            mass: self.mass,
        }
    }
}
