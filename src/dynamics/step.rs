use nalgebra::Vector3;

use super::state::{FlightSample, KinematicState};
use crate::physics::aerodynamics::drag_vector;
use crate::physics::gravity::{gravity_earth, EARTH_RADIUS};
use crate::physics::propulsion::mass_flow;
use crate::physics::with_length;
use crate::vehicle::VehicleConfig;

// ---------------------------------------------------------------------------
// Ascent integrator: one unit time step, semi-implicit Euler
// ---------------------------------------------------------------------------

/// Advance `state` by one second.
///
/// Forces are evaluated at the start of the step:
///   1. Drag    opposing velocity, from speed and altitude
///   2. Gravity toward the planet centre, inverse-square
///   3. Thrust  along velocity (prograde), scaled by the phase scheduler
///
/// Then mass is burned, velocity updated from acceleration and position from
/// the *new* velocity. Velocity before position is load-bearing: swapping
/// them turns this into explicit Euler and changes every trajectory.
///
/// Sinking below the surface rescales the position onto it and zeroes the
/// velocity. The gravity-turn impulse is applied last, after the clamp.
pub fn step(state: &KinematicState, config: &VehicleConfig) -> FlightSample {
    let t = f64::from(state.time);
    let r = state.pos.norm();

    let drag = drag_vector(&state.vel, r - EARTH_RADIUS, config.cd, config.area);
    let g = gravity_earth(r);
    let gravity = with_length(&-state.pos, g);
    let mut thrust = with_length(&state.vel, config.thrust * config.phases.thrust_ratio(t));

    let mut mass = state.mass - mass_flow(thrust.norm(), config.isp, g);
    let mut depleted = false;
    if mass <= config.final_mass && thrust.norm() > 0.0 {
        if state.mass > config.final_mass {
            log::info!("t={}s: propellant depleted at {:.0} m", state.time, r - EARTH_RADIUS);
        }
        mass = config.final_mass;
        thrust = Vector3::zeros();
        depleted = true;
    }

    let acc = (thrust + drag) / mass + gravity;
    let mut vel = state.vel + acc;
    let mut pos = state.pos + vel;

    let grounded = pos.norm() < EARTH_RADIUS;
    if grounded {
        pos = with_length(&pos, EARTH_RADIUS);
        vel = Vector3::zeros();
    }

    if let Some(impulse) = config.phases.impulse_at(t) {
        vel += impulse;
    }

    FlightSample {
        time: state.time,
        pos,
        vel,
        gravity,
        drag,
        thrust,
        mass,
        grounded,
        depleted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{presets, GravityTurn, Phase, ThrustWindow, VehicleConfigBuilder};
    use approx::assert_relative_eq;

    fn coasting_vehicle() -> VehicleConfig {
        VehicleConfigBuilder::new("coast")
            .initial_mass(1_000.0)
            .final_mass(500.0)
            .thrust(0.0)
            .end(100)
            .build()
            .unwrap()
    }

    #[test]
    fn zero_thrust_keeps_mass_constant() {
        let v = coasting_vehicle();
        let mut state = KinematicState {
            pos: Vector3::new(0.0, EARTH_RADIUS + 50_000.0, 0.0),
            vel: Vector3::new(300.0, 800.0, 0.0),
            ..KinematicState::on_pad(&v)
        };
        for _ in 0..100 {
            let sample = step(&state, &v);
            assert_eq!(sample.mass, v.initial_mass);
            assert_eq!(sample.thrust, Vector3::zeros());
            state = sample.next_state();
        }
    }

    #[test]
    fn ground_clamp_is_idempotent() {
        let v = coasting_vehicle();
        let resting = KinematicState {
            vel: Vector3::zeros(),
            ..KinematicState::on_pad(&v)
        };
        let mut state = resting;
        for _ in 0..10 {
            let sample = step(&state, &v);
            assert!(sample.grounded);
            assert_eq!(sample.pos, resting.pos);
            assert_eq!(sample.vel, Vector3::zeros());
            state = sample.next_state();
        }
    }

    #[test]
    fn mass_never_drops_below_dry_mass() {
        let v = VehicleConfigBuilder::new("short burn")
            .initial_mass(1_000.0)
            .final_mass(900.0)
            .thrust(30_000.0)
            .isp(100.0)
            .end(200)
            .build()
            .unwrap();
        let mut state = KinematicState::on_pad(&v);
        let mut saw_depletion = false;
        for _ in 0..200 {
            let sample = step(&state, &v);
            assert!(sample.mass >= v.final_mass);
            saw_depletion |= sample.depleted;
            state = sample.next_state();
        }
        assert!(saw_depletion);
        assert_eq!(state.mass, v.final_mass);
    }

    #[test]
    fn depletion_zeroes_thrust_for_the_step() {
        let v = VehicleConfigBuilder::new("one step")
            .initial_mass(1_000.0)
            .final_mass(999.0)
            .thrust(50_000.0)
            .isp(10.0)
            .build()
            .unwrap();
        let sample = step(&KinematicState::on_pad(&v), &v);
        assert!(sample.depleted);
        assert_eq!(sample.mass, 999.0);
        assert_eq!(sample.thrust, Vector3::zeros());
    }

    #[test]
    fn thrust_is_prograde() {
        let v = presets::falcon9_orbit();
        let state = KinematicState {
            pos: Vector3::new(0.0, EARTH_RADIUS + 10_000.0, 0.0),
            vel: Vector3::new(100.0, 400.0, 0.0),
            time: 100,
            mass: 400_000.0,
        };
        let sample = step(&state, &v);
        let along = sample.thrust.normalize().dot(&state.vel.normalize());
        assert_relative_eq!(along, 1.0, epsilon = 1e-12);
        assert_relative_eq!(sample.thrust.norm(), v.thrust, epsilon = 1e-6);
    }

    #[test]
    fn velocity_updates_before_position() {
        let v = coasting_vehicle();
        let state = KinematicState {
            pos: Vector3::new(0.0, EARTH_RADIUS + 200_000.0, 0.0),
            vel: Vector3::new(7_000.0, 0.0, 0.0),
            ..KinematicState::on_pad(&v)
        };
        let sample = step(&state, &v);
        let acc = sample.drag / state.mass + sample.gravity;
        assert_relative_eq!(sample.vel, state.vel + acc, epsilon = 1e-9);
        assert_relative_eq!(sample.pos, state.pos + sample.vel, epsilon = 1e-6);
    }

    #[test]
    fn gravity_turn_adds_exact_impulse() {
        let impulse = Vector3::new(0.1, 0.2, 0.3);
        let with_turn = VehicleConfigBuilder::new("turn")
            .phase(Phase::Ascent(ThrustWindow::new(0.0, 100.0, 1.0)))
            .phase(Phase::GravityTurn(GravityTurn { start: 5.0, impulse }))
            .build()
            .unwrap();
        let without_turn = VehicleConfig {
            phases: with_turn
                .phases
                .iter()
                .filter(|p| p.window().is_some())
                .collect(),
            ..with_turn.clone()
        };
        let state = KinematicState {
            time: 5,
            pos: Vector3::new(0.0, EARTH_RADIUS + 1_000.0, 0.0),
            vel: Vector3::new(0.0, 150.0, 0.0),
            mass: 900.0,
        };
        let turned = step(&state, &with_turn);
        let plain = step(&state, &without_turn);
        assert_eq!(turned.vel, plain.vel + impulse);
        assert_eq!(turned.pos, plain.pos);

        let later = step(&KinematicState { time: 6, ..state }, &with_turn);
        let later_plain = step(&KinematicState { time: 6, ..state }, &without_turn);
        assert_eq!(later.vel, later_plain.vel);
    }
}
