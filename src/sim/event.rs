use nalgebra::Vector3;

use crate::dynamics::state::FlightSample;

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Highest point since the last apoapsis, confirmed once radius drops.
    Apoapsis { position: Vector3<f64> },
    /// Lowest point after an apoapsis, confirmed once radius grows again.
    Periapsis { position: Vector3<f64> },
    /// Tanks ran dry.
    Depletion,
    /// The ground clamp caught the vehicle.
    GroundContact,
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct FlightEvent {
    pub time: u32,
    pub kind: EventKind,
    pub sample: FlightSample,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive samples and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &FlightSample, current: &FlightSample) -> Option<EventKind>;
}

/// Tracks apsides live, one sample at a time.
///
/// A candidate apoapsis follows the radius while it grows; the first drop
/// confirms it. Climbing past a confirmed apoapsis withdraws it and the
/// search resumes. After the first apoapsis a candidate periapsis follows
/// the radius down and is confirmed by the first rise.
#[derive(Debug, Default)]
pub struct ApsisTracker {
    apoapsis: Option<Vector3<f64>>,
    apoapsis_confirmed: bool,
    periapsis: Option<Vector3<f64>>,
    periapsis_confirmed: bool,
}

impl ApsisTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest confirmed apoapsis.
    pub fn apoapsis(&self) -> Option<Vector3<f64>> {
        self.apoapsis.filter(|_| self.apoapsis_confirmed)
    }

    /// Latest confirmed periapsis.
    pub fn periapsis(&self) -> Option<Vector3<f64>> {
        self.periapsis.filter(|_| self.periapsis_confirmed)
    }

    /// Feed one position; returns the apsis confirmed by it, if any.
    pub fn observe(&mut self, pos: Vector3<f64>) -> Option<EventKind> {
        let r = pos.norm();
        let mut event = None;

        let apo = self.apoapsis.get_or_insert(pos);
        if r >= apo.norm() {
            *apo = pos;
            self.apoapsis_confirmed = false;
        }
        if r < apo.norm() && !self.apoapsis_confirmed {
            self.apoapsis_confirmed = true;
            log::debug!("apoapsis confirmed at r={:.0} m", apo.norm());
            event = Some(EventKind::Apoapsis { position: *apo });
        }

        if self.apoapsis_confirmed && self.periapsis.is_none() {
            self.periapsis = Some(pos);
        }
        if let Some(peri) = self.periapsis.as_mut() {
            if r < peri.norm() {
                *peri = pos;
                self.periapsis_confirmed = false;
            } else if r > peri.norm() && !self.periapsis_confirmed {
                self.periapsis_confirmed = true;
                log::debug!("periapsis confirmed at r={:.0} m", peri.norm());
                event = event.or(Some(EventKind::Periapsis { position: *peri }));
            }
        }
        event
    }
}

impl EventDetector for ApsisTracker {
    fn check(&mut self, prev: &FlightSample, current: &FlightSample) -> Option<EventKind> {
        if self.apoapsis.is_none() {
            self.apoapsis = Some(prev.pos);
        }
        self.observe(current.pos)
    }
}

/// Reports the first step flown on dry tanks.
#[derive(Debug, Default)]
pub struct DepletionDetector {
    fired: bool,
}

impl EventDetector for DepletionDetector {
    fn check(&mut self, _prev: &FlightSample, current: &FlightSample) -> Option<EventKind> {
        if self.fired || !current.depleted {
            return None;
        }
        self.fired = true;
        Some(EventKind::Depletion)
    }
}

/// Reports each touchdown (not every step spent resting on the ground).
#[derive(Debug, Default)]
pub struct GroundContactDetector;

impl EventDetector for GroundContactDetector {
    fn check(&mut self, prev: &FlightSample, current: &FlightSample) -> Option<EventKind> {
        if current.grounded && !prev.grounded {
            Some(EventKind::GroundContact)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(radius: f64) -> FlightSample {
        FlightSample {
            time: 0,
            pos: Vector3::new(radius, 0.0, 0.0),
            vel: Vector3::zeros(),
            gravity: Vector3::zeros(),
            drag: Vector3::zeros(),
            thrust: Vector3::zeros(),
            mass: 100.0,
            grounded: false,
            depleted: false,
        }
    }

    #[test]
    fn apoapsis_then_periapsis() {
        let mut tracker = ApsisTracker::new();
        let radii = [10.0, 20.0, 30.0, 25.0, 15.0, 12.0, 14.0, 20.0];
        let events: Vec<EventKind> = radii
            .iter()
            .filter_map(|&r| tracker.observe(Vector3::new(r, 0.0, 0.0)))
            .collect();
        assert_eq!(
            events,
            vec![
                EventKind::Apoapsis { position: Vector3::new(30.0, 0.0, 0.0) },
                EventKind::Periapsis { position: Vector3::new(12.0, 0.0, 0.0) },
            ]
        );
        assert_eq!(tracker.apoapsis(), Some(Vector3::new(30.0, 0.0, 0.0)));
        assert_eq!(tracker.periapsis(), Some(Vector3::new(12.0, 0.0, 0.0)));
    }

    #[test]
    fn higher_climb_withdraws_apoapsis() {
        let mut tracker = ApsisTracker::new();
        for r in [10.0, 20.0, 15.0] {
            tracker.observe(Vector3::new(r, 0.0, 0.0));
        }
        assert!(tracker.apoapsis().is_some());
        tracker.observe(Vector3::new(40.0, 0.0, 0.0));
        assert_eq!(tracker.apoapsis(), None);
        let ev = tracker.observe(Vector3::new(35.0, 0.0, 0.0));
        assert_eq!(ev, Some(EventKind::Apoapsis { position: Vector3::new(40.0, 0.0, 0.0) }));
    }

    #[test]
    fn depletion_fires_once() {
        let mut det = DepletionDetector::default();
        let prev = sample_at(10.0);
        let dry = FlightSample { depleted: true, ..prev };
        assert_eq!(det.check(&prev, &dry), Some(EventKind::Depletion));
        assert_eq!(det.check(&dry, &dry), None);
    }

    #[test]
    fn ground_contact_fires_on_touchdown_only() {
        let mut det = GroundContactDetector;
        let flying = sample_at(10.0);
        let landed = FlightSample { grounded: true, ..flying };
        assert_eq!(det.check(&flying, &landed), Some(EventKind::GroundContact));
        assert_eq!(det.check(&landed, &landed), None);
    }
}
