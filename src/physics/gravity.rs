use nalgebra::Vector3;

use super::with_length;

// ---------------------------------------------------------------------------
// Modelled planet
// ---------------------------------------------------------------------------

/// Mean planet radius, m.
pub const EARTH_RADIUS: f64 = 6_371_000.0;
/// Gravitational parameter GM, m^3/s^2 (5.972e24 kg * 6.67384e-11).
pub const MU_EARTH: f64 = 597_200_000.0 * 667_384.0;

/// Inverse-square gravitational acceleration magnitude at radius `r`.
///
/// Precondition: `r != 0`. A zero radius yields `inf`; callers that cannot
/// rule it out must check before calling.
pub fn gravity(r: f64, mu: f64) -> f64 {
    mu / (r * r)
}

/// `gravity` with the modelled planet's `MU_EARTH`.
pub fn gravity_earth(r: f64) -> f64 {
    gravity(r, MU_EARTH)
}

/// Gravitational acceleration vector pointing from `pos` toward the origin.
/// Returns zero for a zero-length position instead of a NaN direction.
pub fn gravity_vector(pos: &Vector3<f64>, mu: f64) -> Vector3<f64> {
    with_length(&-pos, gravity(pos.norm(), mu))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn surface_gravity_is_earthlike() {
        let g = gravity_earth(EARTH_RADIUS);
        assert!(g > 9.7 && g < 9.9, "surface gravity {g}");
    }

    #[test]
    fn gravity_follows_inverse_square() {
        let g1 = gravity_earth(EARTH_RADIUS);
        let g2 = gravity_earth(2.0 * EARTH_RADIUS);
        assert_relative_eq!(g1 / g2, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn vector_points_to_origin() {
        let pos = Vector3::new(0.0, EARTH_RADIUS, 0.0);
        let g = gravity_vector(&pos, MU_EARTH);
        assert!(g.y < 0.0);
        assert_relative_eq!(g.norm(), gravity_earth(EARTH_RADIUS), epsilon = 1e-12);
        assert_eq!(g.x, 0.0);
    }

    #[test]
    fn zero_position_has_no_direction() {
        let g = gravity_vector(&Vector3::zeros(), MU_EARTH);
        assert_eq!(g, Vector3::zeros());
    }
}
