/// Propellant mass consumed per unit time (kg/s) at thrust `thrust`.
///
/// `mdot = F / (Isp * g)` where `g` is the caller's *local* gravity, not
/// standard gravity.
//
// KNOWN DEFECT, kept on purpose: Isp is defined against standard surface
// gravity, so the divisor should be the fixed g0 (or Isp should be an
// impulse constant I0 = Isp * g0). Using local gravity makes the burn rate
// drop with altitude. Changing this alters every trajectory, so it stays
// until the intended propulsion model is settled.
pub fn mass_flow(thrust: f64, isp: f64, g: f64) -> f64 {
    thrust / (isp * g)
}
