use nalgebra::Vector3;

use super::atmosphere;
use super::with_length;

/// Dynamic pressure `q = rho * v^2 / 2` (Pa).
pub fn dynamic_pressure(speed: f64, altitude: f64) -> f64 {
    atmosphere::density(altitude) * speed * speed / 2.0
}

/// Aerodynamic drag magnitude `Cd * A * q` (N).
pub fn drag(speed: f64, altitude: f64, cd: f64, area: f64) -> f64 {
    cd * area * dynamic_pressure(speed, altitude)
}

/// Drag force vector, opposing `vel`. Zero at rest.
pub fn drag_vector(vel: &Vector3<f64>, altitude: f64, cd: f64, area: f64) -> Vector3<f64> {
    with_length(&-vel, drag(vel.norm(), altitude, cd, area))
}
