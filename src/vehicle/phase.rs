use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Flight phases
// ---------------------------------------------------------------------------

/// Time window during which nominal thrust is scaled by `thrust_ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrustWindow {
    pub start: f64,        // s
    pub end: f64,          // s
    pub thrust_ratio: f64, // fraction of nominal thrust, [0, 1]
}

impl ThrustWindow {
    pub fn new(start: f64, end: f64, thrust_ratio: f64) -> Self {
        Self { start, end, thrust_ratio }
    }

    /// `start <= t <= end`. Never true when `start > end`.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }

    /// `start < t < end`, the planar path's bounds.
    pub fn contains_open(&self, t: f64) -> bool {
        self.start < t && t < self.end
    }
}

/// Instantaneous velocity change applied once, at exactly `t == start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityTurn {
    pub start: f64,
    pub impulse: Vector3<f64>, // m/s, added to velocity
}

/// One configured phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Phase {
    Ascent(ThrustWindow),
    MaxQ(ThrustWindow),
    Circularization(ThrustWindow),
    GravityTurn(GravityTurn),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    MaxQ,
    Ascent,
    Circularization,
    GravityTurn,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Ascent(_) => PhaseKind::Ascent,
            Phase::MaxQ(_) => PhaseKind::MaxQ,
            Phase::Circularization(_) => PhaseKind::Circularization,
            Phase::GravityTurn(_) => PhaseKind::GravityTurn,
        }
    }

    /// Thrust window of a window phase; `None` for the gravity turn.
    pub fn window(&self) -> Option<&ThrustWindow> {
        match self {
            Phase::Ascent(w) | Phase::MaxQ(w) | Phase::Circularization(w) => Some(w),
            Phase::GravityTurn(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Phase set + scheduler
// ---------------------------------------------------------------------------

/// At most one phase of each kind. Inserting a phase replaces any earlier
/// phase of the same kind.
///
/// Window phases are evaluated in the fixed order max-Q, ascent,
/// circularization; the first match wins and ratios are never summed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Phase>", into = "Vec<Phase>")]
pub struct PhaseSet {
    max_q: Option<ThrustWindow>,
    ascent: Option<ThrustWindow>,
    circularization: Option<ThrustWindow>,
    gravity_turn: Option<GravityTurn>,
}

impl PhaseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, phase: Phase) -> Self {
        self.insert(phase);
        self
    }

    pub fn insert(&mut self, phase: Phase) {
        match phase {
            Phase::MaxQ(w) => self.max_q = Some(w),
            Phase::Ascent(w) => self.ascent = Some(w),
            Phase::Circularization(w) => self.circularization = Some(w),
            Phase::GravityTurn(g) => self.gravity_turn = Some(g),
        }
    }

    pub fn get(&self, kind: PhaseKind) -> Option<Phase> {
        match kind {
            PhaseKind::MaxQ => self.max_q.map(Phase::MaxQ),
            PhaseKind::Ascent => self.ascent.map(Phase::Ascent),
            PhaseKind::Circularization => self.circularization.map(Phase::Circularization),
            PhaseKind::GravityTurn => self.gravity_turn.map(Phase::GravityTurn),
        }
    }

    /// Configured phases in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = Phase> + '_ {
        [
            PhaseKind::MaxQ,
            PhaseKind::Ascent,
            PhaseKind::Circularization,
            PhaseKind::GravityTurn,
        ]
        .into_iter()
        .filter_map(|kind| self.get(kind))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn has_windows(&self) -> bool {
        self.max_q.is_some() || self.ascent.is_some() || self.circularization.is_some()
    }

    /// Window phase active at `t`, in priority order.
    pub fn active_window(&self, t: f64) -> Option<PhaseKind> {
        self.iter()
            .find(|p| p.window().is_some_and(|w| w.contains(t)))
            .map(|p| p.kind())
    }

    /// Effective thrust ratio for the 3D path.
    ///
    /// Full thrust when no window phase is configured at all. Otherwise the
    /// first matching window supplies the ratio and the vehicle coasts
    /// (ratio 0) between windows.
    pub fn thrust_ratio(&self, t: f64) -> f64 {
        if !self.has_windows() {
            return 1.0;
        }
        self.iter()
            .filter_map(|p| p.window().copied())
            .find(|w| w.contains(t))
            .map_or(0.0, |w| w.thrust_ratio)
    }

    /// Effective thrust ratio for the planar path.
    ///
    /// Only max-Q is honoured, with exclusive bounds; every other time runs
    /// at full thrust. This differs from `thrust_ratio` on purpose, the two
    /// paths have always disagreed and consumers depend on both.
    pub fn planar_thrust_ratio(&self, t: f64) -> f64 {
        match self.max_q {
            Some(w) if w.contains_open(t) => w.thrust_ratio,
            _ => 1.0,
        }
    }

    /// Gravity-turn impulse to add at `t`, if `t` is exactly its start.
    pub fn impulse_at(&self, t: f64) -> Option<Vector3<f64>> {
        self.gravity_turn
            .filter(|g| g.start == t)
            .map(|g| g.impulse)
    }
}

impl From<Vec<Phase>> for PhaseSet {
    fn from(phases: Vec<Phase>) -> Self {
        phases.into_iter().fold(PhaseSet::new(), PhaseSet::with)
    }
}

impl From<PhaseSet> for Vec<Phase> {
    fn from(set: PhaseSet) -> Self {
        set.iter().collect()
    }
}

impl FromIterator<Phase> for PhaseSet {
    fn from_iter<I: IntoIterator<Item = Phase>>(iter: I) -> Self {
        iter.into_iter().fold(PhaseSet::new(), PhaseSet::with)
    }
}
