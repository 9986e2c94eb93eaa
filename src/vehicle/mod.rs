pub mod config;
pub mod phase;

pub use config::{presets, VehicleConfig, VehicleConfigBuilder};
pub use phase::{GravityTurn, Phase, PhaseKind, PhaseSet, ThrustWindow};
