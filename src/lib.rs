pub mod error;
pub mod physics;
pub mod vehicle;
pub mod dynamics;
pub mod sim;
pub mod orbital;
pub mod io;

pub use error::{Result, SimError};
pub use vehicle::{Phase, PhaseSet, VehicleConfig, VehicleConfigBuilder};
pub use dynamics::{step, FlightSample, KinematicState};
pub use sim::{run_record, run_trajectory, StreamDriver, StreamStatus, TrajectoryRecord};
pub use orbital::{propagate_orbit, OrbitalState};
