use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

use crate::dynamics::state::{FlightSample, KinematicState};
use crate::dynamics::step::step;
use crate::error::Result;
use crate::vehicle::VehicleConfig;

// ---------------------------------------------------------------------------
// Clocks
// ---------------------------------------------------------------------------

/// Wall-clock source used to pace a stream.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
    /// Block the current thread for `d`.
    fn wait(&self, d: Duration);
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wait(&self, d: Duration) {
        thread::sleep(d);
    }
}

/// Clock that only moves when told to. `wait` advances it instantly.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn wait(&self, d: Duration) {
        self.advance(d);
    }
}

// ---------------------------------------------------------------------------
// Streaming driver
// ---------------------------------------------------------------------------

pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    /// Called again too soon; nothing was integrated.
    Pending,
    /// One step was integrated and more remain.
    Stepped,
    /// The step at `end` has been integrated.
    Finished,
}

/// Real-time paced 3D flight, one step per `poll`.
///
/// The caller owns the loop (typically a frame callback) and calls `poll`
/// every frame. Dropping the driver cancels the flight. Unlike the batch
/// path it keeps stepping after ground contact until `end`.
pub struct StreamDriver<C: Clock = SystemClock> {
    config: VehicleConfig,
    state: KinematicState,
    clock: C,
    min_interval: Duration,
    last_step: Duration,
    finished: bool,
}

impl StreamDriver<SystemClock> {
    pub fn new(config: VehicleConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock::default())
    }
}

impl<C: Clock> StreamDriver<C> {
    pub fn with_clock(config: VehicleConfig, clock: C) -> Result<Self> {
        config.validate()?;
        log::debug!("stream '{}': t={}..={}", config.name, config.start, config.end);
        let state = KinematicState::on_pad(&config);
        let last_step = clock.now();
        Ok(Self {
            config,
            state,
            clock,
            min_interval: DEFAULT_MIN_INTERVAL,
            last_step,
            finished: false,
        })
    }

    pub fn with_min_interval(mut self, d: Duration) -> Self {
        self.min_interval = d;
        self
    }

    /// Integrate at most one step, if `min_interval` has passed since the
    /// previous one (or since construction), and hand it to `on_step`.
    pub fn poll(&mut self, mut on_step: impl FnMut(&FlightSample)) -> StreamStatus {
        if self.finished {
            return StreamStatus::Finished;
        }
        let now = self.clock.now();
        if now.saturating_sub(self.last_step) < self.min_interval {
            return StreamStatus::Pending;
        }

        let sample = step(&self.state, &self.config);
        self.state = sample.next_state();
        self.last_step = now;
        log::trace!(
            "t={}s alt={:.0} m v={:.1} m/s",
            sample.time,
            sample.altitude(),
            sample.speed()
        );
        on_step(&sample);

        if sample.time >= self.config.end {
            self.finished = true;
            log::debug!("stream '{}' finished", self.config.name);
            StreamStatus::Finished
        } else {
            StreamStatus::Stepped
        }
    }

    /// Drive the stream to completion on this thread, sleeping out the
    /// pacing interval between steps.
    pub fn run_blocking(&mut self, mut on_step: impl FnMut(&FlightSample)) {
        loop {
            match self.poll(&mut on_step) {
                StreamStatus::Finished => break,
                StreamStatus::Stepped => {}
                StreamStatus::Pending => {
                    let since = self.clock.now().saturating_sub(self.last_step);
                    self.clock.wait(self.min_interval.saturating_sub(since));
                }
            }
        }
    }

    /// State the next step starts from.
    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
