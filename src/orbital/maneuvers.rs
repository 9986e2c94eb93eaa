use nalgebra::Vector3;

use super::propagator::OrbitalState;
use crate::physics::gravity::MU_EARTH;
use crate::physics::with_length;

/// Calculate circular orbit velocity at a given radius.
pub fn circular_velocity(r: f64) -> f64 {
    circular_velocity_mu(r, MU_EARTH)
}

pub fn circular_velocity_mu(r: f64, mu: f64) -> f64 {
    (mu / r).sqrt()
}

/// State at `pos` moving at circular speed along `direction`.
///
/// The orbit is only circular when `direction` is perpendicular to `pos`;
/// that is left to the caller.
pub fn circular_orbit(pos: Vector3<f64>, direction: &Vector3<f64>) -> OrbitalState {
    let v = circular_velocity(pos.norm());
    OrbitalState::new(pos, with_length(direction, v))
}

/// An initial state together with how long and how finely to propagate it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPreset {
    pub name: String,
    pub initial: OrbitalState,
    pub tspan: f64, // s
    pub h: f64,     // s
}

pub mod presets {
    use super::*;
    use crate::physics::gravity::EARTH_RADIUS;

    const LEO_ALTITUDE: f64 = 450_000.0;

    fn leo(name: &str, pos: Vector3<f64>, direction: Vector3<f64>) -> OrbitPreset {
        OrbitPreset {
            name: name.into(),
            initial: circular_orbit(pos, &direction),
            tspan: 95.0 * 60.0,
            h: 10.0,
        }
    }

    /// Three circular orbits at 450 km: equatorial, polar and inclined 45°.
    pub fn leo_450km() -> Vec<OrbitPreset> {
        let r = EARTH_RADIUS + LEO_ALTITUDE;
        vec![
            leo("equatorial", Vector3::new(r, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
            leo("polar", Vector3::new(0.0, r, 0.0), Vector3::new(0.0, 0.0, 1.0)),
            leo("inclined", Vector3::new(r, 0.0, 0.0), Vector3::new(0.0, 1.0, 1.0)),
        ]
    }
}
