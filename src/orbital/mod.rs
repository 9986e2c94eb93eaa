pub mod elements;
pub mod maneuvers;
pub mod propagator;

pub use elements::{Apsides, HistoryOrder};
pub use maneuvers::{circular_orbit, circular_velocity, presets, OrbitPreset};
pub use propagator::{propagate_orbit, propagate_orbit_mu, rk4_step, OrbitalState};
