pub mod aerodynamics;
pub mod atmosphere;
pub mod gravity;
pub mod propulsion;

use nalgebra::Vector3;

/// `v` rescaled to `len`, keeping its direction. A zero vector stays zero.
pub(crate) fn with_length(v: &Vector3<f64>, len: f64) -> Vector3<f64> {
    v.try_normalize(0.0)
        .map_or_else(Vector3::zeros, |unit| unit * len)
}
