use std::f64::consts::PI;

use approx::assert_relative_eq;
use nalgebra::Vector3;

use ascent_sim::dynamics::{step, KinematicState};
use ascent_sim::orbital::{self, Apsides, OrbitalState};
use ascent_sim::physics::gravity::{EARTH_RADIUS, MU_EARTH};
use ascent_sim::sim::{self, ApsisTracker, Channel, EventKind, ManualClock, StreamDriver};
use ascent_sim::vehicle::{presets, GravityTurn, Phase, ThrustWindow, VehicleConfig, VehicleConfigBuilder};

fn falcon9_no_phases() -> VehicleConfig {
    VehicleConfigBuilder::new("scenario")
        .initial_mass(549_054.0)
        .final_mass(200_000.0)
        .thrust(7_607_000.0)
        .isp(1_200.0)
        .cd(0.3)
        .area(10.7521)
        .end(10_000)
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Ascent
// ---------------------------------------------------------------------------

#[test]
fn unphased_falcon9_ends_at_end_time_or_impact() {
    let config = falcon9_no_phases();
    let record = sim::run_record(&config).unwrap();

    let last = record.rows.last().unwrap();
    assert!(last.time <= config.end);
    assert!(last.time == config.end || record.meta.impact.is_some());
    if let Some(impact) = record.meta.impact {
        assert_eq!(impact.time, last.time);
        assert_eq!(last.thrust, 0.0);
    }
    assert!(record.channel(Channel::Twr).all(|p| p.value >= 0.0));
    assert!(record.channel(Channel::Mass).all(|p| p.value >= config.final_mass));
}

#[test]
fn inverted_window_falls_through_to_default() {
    let inverted = VehicleConfig {
        phases: [Phase::MaxQ(ThrustWindow::new(100.0, 50.0, 0.3))].into_iter().collect(),
        ..falcon9_no_phases()
    };
    for t in 0..=200 {
        assert_eq!(inverted.phases.active_window(f64::from(t)), None);
    }

    // planar default is full thrust, same as no phases at all
    let with = sim::run_record(&inverted).unwrap();
    let without = sim::run_record(&falcon9_no_phases()).unwrap();
    assert_eq!(with.rows, without.rows);
    assert_eq!(with.meta, without.meta);
}

#[test]
fn gravity_turn_impulse_is_exact_vector_addition() {
    let impulse = Vector3::new(1.0, 0.0, 0.0);
    let base = falcon9_no_phases();
    let turned = VehicleConfig {
        phases: [Phase::GravityTurn(GravityTurn { start: 23.0, impulse })].into_iter().collect(),
        ..base.clone()
    };

    let mut state = KinematicState::on_pad(&base);
    while state.time < 23 {
        let a = step(&state, &base);
        let b = step(&state, &turned);
        assert_eq!(a, b, "no impulse before t=23");
        state = a.next_state();
    }

    let plain = step(&state, &base);
    let kicked = step(&state, &turned);
    assert_eq!(kicked.vel, plain.vel + impulse);
    assert_eq!(kicked.pos, plain.pos);
    assert_eq!(kicked.mass, plain.mass);
}

#[test]
fn full_orbit_flight_respects_dry_mass_and_surface() {
    let config = presets::falcon9_orbit();
    let samples = sim::run_trajectory(&config).unwrap();
    assert_eq!(samples.len(), config.end as usize + 1);
    for pair in samples.windows(2) {
        assert!(pair[1].mass <= pair[0].mass);
    }
    for s in &samples {
        assert!(s.mass >= config.final_mass);
        assert!(s.pos.norm() >= EARTH_RADIUS);
    }
}

#[test]
fn stream_and_batch_agree() {
    let config = VehicleConfig { end: 120, ..presets::falcon9_orbit() };
    let batch = sim::run_trajectory(&config).unwrap();

    let mut driver = StreamDriver::with_clock(config, ManualClock::new()).unwrap();
    let mut streamed = Vec::new();
    driver.run_blocking(|s| streamed.push(*s));

    assert_eq!(streamed, batch);
    assert!(driver.is_finished());
}

// ---------------------------------------------------------------------------
// Orbit
// ---------------------------------------------------------------------------

#[test]
fn circular_orbit_returns_to_its_radius() {
    let r = EARTH_RADIUS + 450_000.0;
    let initial = orbital::circular_orbit(Vector3::new(r, 0.0, 0.0), &Vector3::new(0.0, 1.0, 0.0));
    let period = 2.0 * PI * (r.powi(3) / MU_EARTH).sqrt();

    let history = orbital::propagate_orbit(&initial, period, 5.0).unwrap();
    assert_relative_eq!(history.last().unwrap().pos.norm(), r, max_relative = 0.01);

    let apsides = Apsides::from_history(&history).unwrap();
    assert!(apsides.eccentricity().abs() < 1e-4);
    assert_relative_eq!(apsides.semi_major_axis(), r, max_relative = 1e-4);
}

#[test]
fn live_tracker_agrees_with_sorted_apsides() {
    let rp = EARTH_RADIUS + 400_000.0;
    let ra = EARTH_RADIUS + 2_000_000.0;
    let a = (rp + ra) / 2.0;
    let vp = (MU_EARTH * (2.0 / rp - 1.0 / a)).sqrt();
    let initial = OrbitalState::new(Vector3::new(rp, 0.0, 0.0), Vector3::new(0.0, vp, 0.0));
    let period = 2.0 * PI * (a.powi(3) / MU_EARTH).sqrt();

    let history = orbital::propagate_orbit(&initial, period * 1.2, 1.0).unwrap();

    let mut tracker = ApsisTracker::new();
    let events: Vec<EventKind> = history.iter().filter_map(|s| tracker.observe(s.pos)).collect();
    assert!(matches!(events.first(), Some(EventKind::Apoapsis { .. })));
    assert!(events.iter().any(|e| matches!(e, EventKind::Periapsis { .. })));

    let sorted = Apsides::from_history(&history).unwrap();
    let apo = tracker.apoapsis().unwrap();
    let peri = tracker.periapsis().unwrap();
    assert_relative_eq!(apo.norm(), sorted.apoapsis.norm(), max_relative = 1e-9);
    assert_relative_eq!(peri.norm(), rp, max_relative = 1e-6);
    assert_relative_eq!(sorted.apoapsis.norm(), ra, max_relative = 1e-4);
}
