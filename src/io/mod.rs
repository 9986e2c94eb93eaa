pub mod csv;
pub mod json;

pub use json::{load_config, load_config_file, FlightSummary};
