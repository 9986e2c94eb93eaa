use nalgebra::Vector2;

use crate::physics::aerodynamics::drag;
use crate::physics::gravity::{gravity_earth, EARTH_RADIUS};
use crate::physics::propulsion::mass_flow;
use crate::vehicle::VehicleConfig;

// ---------------------------------------------------------------------------
// Planar (vertical-only) ascent step, used by the chart record
// ---------------------------------------------------------------------------

/// State of the simplified vertical flight. Only the `y` components ever
/// change; `x` stays zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarState {
    pub time: u32,
    pub pos: Vector2<f64>, // m, planet-centred
    pub vel: Vector2<f64>, // m/s
    pub mass: f64,         // kg
}

impl PlanarState {
    /// At rest on the surface.
    pub fn on_pad(config: &VehicleConfig) -> Self {
        Self {
            time: config.start,
            pos: Vector2::new(0.0, EARTH_RADIUS),
            vel: Vector2::zeros(),
            mass: config.initial_mass,
        }
    }

    pub fn altitude(&self) -> f64 {
        self.pos.y - EARTH_RADIUS
    }
}

/// Scalar quantities of one planar step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarStep {
    pub next: PlanarState,
    pub acceleration: f64, // m/s^2, vertical
    pub gravity: f64,      // m/s^2
    pub thrust: f64,       // N
    pub twr: f64,
}

/// Advance the vertical flight by one second.
///
/// Differs from the 3D step: thrust always points up, only max-Q throttles
/// (see `PhaseSet::planar_thrust_ratio`), dry-out triggers on `mass <
/// final_mass` strictly, and there is no ground clamp here. The record
/// driver clamps the altitude when it samples.
pub fn planar_step(state: &PlanarState, config: &VehicleConfig) -> PlanarStep {
    let t = f64::from(state.time);
    let drag_mag = drag(state.vel.norm(), state.pos.norm() - EARTH_RADIUS, config.cd, config.area);
    let g = gravity_earth(state.pos.norm());

    let mut thrust = config.thrust * config.phases.planar_thrust_ratio(t);
    let mut mass = state.mass - mass_flow(thrust, config.isp, g);
    if mass < config.final_mass {
        mass = config.final_mass;
        thrust = 0.0;
    }

    let twr = thrust / (mass * g);
    // drag always opposes the vertical motion
    let drag = if state.vel.y < 0.0 { drag_mag } else { -drag_mag };
    let acceleration = (thrust + drag) / mass - g;

    let vel = state.vel + Vector2::new(0.0, acceleration);
    let pos = state.pos + vel;

    PlanarStep {
        next: PlanarState {
            time: state.time.saturating_add(1),
            pos,
            vel,
            mass,
        },
        acceleration,
        gravity: g,
        thrust,
        twr,
    }
}
