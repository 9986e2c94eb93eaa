// ---------------------------------------------------------------------------
// Exponential atmosphere
// ---------------------------------------------------------------------------

/// Air density at the surface, kg/m^3.
pub const SURFACE_DENSITY: f64 = 1.3;
/// Density scale height, m.
pub const SCALE_HEIGHT: f64 = 7_000.0;

/// Air density at a geometric altitude above the surface (kg/m^3).
///
/// `rho = rho0 * exp(-h / H)`. No clamping: negative altitudes extrapolate
/// to densities above `SURFACE_DENSITY`, so callers near the ground must
/// supply a sane altitude themselves.
pub fn density(altitude: f64) -> f64 {
    SURFACE_DENSITY * (-altitude / SCALE_HEIGHT).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn surface_density() {
        assert_relative_eq!(density(0.0), 1.3);
    }

    #[test]
    fn one_scale_height_divides_by_e() {
        assert_relative_eq!(density(SCALE_HEIGHT), 1.3 / std::f64::consts::E, epsilon = 1e-12);
    }

    #[test]
    fn density_monotonically_decreases() {
        let rho_0 = density(0.0);
        let rho_10k = density(10_000.0);
        let rho_100k = density(100_000.0);
        assert!(rho_0 > rho_10k);
        assert!(rho_10k > rho_100k);
        assert!(rho_100k > 0.0);
    }

    #[test]
    fn negative_altitude_extrapolates() {
        assert!(density(-500.0) > SURFACE_DENSITY);
    }
}
