pub mod planar;
pub mod state;
pub mod step;

pub use planar::{planar_step, PlanarState, PlanarStep};
pub use state::{FlightSample, KinematicState};
pub use step::step;
