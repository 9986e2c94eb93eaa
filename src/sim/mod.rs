pub mod event;
pub mod record;
pub mod runner;
pub mod stream;

pub use event::{
    ApsisTracker, DepletionDetector, EventDetector, EventKind, FlightEvent, GroundContactDetector,
};
pub use record::{Channel, ChannelPoint, FlightMeta, Impact, RecordRow, TrajectoryRecord};
pub use runner::{run_record, run_trajectory, run_trajectory_with};
pub use stream::{Clock, ManualClock, StreamDriver, StreamStatus, SystemClock};
