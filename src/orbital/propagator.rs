use nalgebra::Vector3;
use serde::Serialize;

use crate::error::{Result, SimError};
use crate::physics::gravity::{gravity, EARTH_RADIUS, MU_EARTH};

/// Upper bound on `tspan / h` accepted by `propagate_orbit`.
pub const MAX_ORBIT_STEPS: f64 = 10_000_000.0;

/// Two-body orbital state (no attitude, no mass).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalState {
    pub time: f64,          // s, index * h
    pub pos: Vector3<f64>,  // m, planet-centred
    pub vel: Vector3<f64>,  // m/s
}

impl OrbitalState {
    pub fn new(pos: Vector3<f64>, vel: Vector3<f64>) -> Self {
        Self { time: 0.0, pos, vel }
    }

    pub fn altitude(&self) -> f64 {
        self.pos.norm() - EARTH_RADIUS
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }
}

/// Two-body equations of motion: `(d pos/dt, d vel/dt)`.
///
/// Precondition: `pos != 0`. The unit vector of a zero position is NaN and
/// so is everything integrated from it.
pub fn two_body(pos: &Vector3<f64>, vel: &Vector3<f64>, mu: f64) -> (Vector3<f64>, Vector3<f64>) {
    let r = pos.norm();
    (*vel, -(pos / r) * gravity(r, mu))
}

/// One classical RK4 step of size `h`.
pub fn rk4_step(state: &OrbitalState, h: f64, mu: f64) -> OrbitalState {
    let (k1_dr, k1_dv) = two_body(&state.pos, &state.vel, mu);
    let (k2_dr, k2_dv) = two_body(
        &(state.pos + k1_dr * h * 0.5),
        &(state.vel + k1_dv * h * 0.5),
        mu,
    );
    let (k3_dr, k3_dv) = two_body(
        &(state.pos + k2_dr * h * 0.5),
        &(state.vel + k2_dv * h * 0.5),
        mu,
    );
    let (k4_dr, k4_dv) = two_body(&(state.pos + k3_dr * h), &(state.vel + k3_dv * h), mu);

    OrbitalState {
        time: state.time + h,
        pos: state.pos + (k1_dr + 2.0 * k2_dr + 2.0 * k3_dr + k4_dr) * (h / 6.0),
        vel: state.vel + (k1_dv + 2.0 * k2_dv + 2.0 * k3_dv + k4_dv) * (h / 6.0),
    }
}

/// Propagate around the modelled planet for `tspan` seconds in steps of `h`.
///
/// Runs `floor(tspan / h)` steps; the history holds the initial state at
/// index 0 plus one entry per step. There is no accuracy control, `h` must
/// be small against the orbital period. More than `MAX_ORBIT_STEPS` steps
/// is rejected as `InvalidConfiguration`.
pub fn propagate_orbit(initial: &OrbitalState, tspan: f64, h: f64) -> Result<Vec<OrbitalState>> {
    propagate_orbit_mu(initial, tspan, h, MU_EARTH)
}

/// `propagate_orbit` with an explicit gravitational parameter.
pub fn propagate_orbit_mu(
    initial: &OrbitalState,
    tspan: f64,
    h: f64,
    mu: f64,
) -> Result<Vec<OrbitalState>> {
    if !(h.is_finite() && h > 0.0) {
        return Err(SimError::invalid(format!("step size must be positive, got {h}")));
    }
    if !(tspan.is_finite() && tspan >= 0.0) {
        return Err(SimError::invalid(format!("tspan must be finite and >= 0, got {tspan}")));
    }
    if initial.pos.norm() == 0.0 {
        return Err(SimError::invalid("initial position must not be the origin"));
    }

    let ratio = (tspan / h).floor();
    if ratio > MAX_ORBIT_STEPS {
        return Err(SimError::invalid(format!(
            "tspan / h = {ratio:e} steps, at most {MAX_ORBIT_STEPS:e} allowed"
        )));
    }
    let n_steps = ratio as usize;
    log::debug!("propagating {n_steps} steps of {h} s");

    let mut history = Vec::with_capacity(n_steps.min(100_000) + 1);
    let mut state = *initial;
    history.push(state);
    for _ in 0..n_steps {
        state = rk4_step(&state, h, mu);
        history.push(state);
    }
    Ok(history)
}
