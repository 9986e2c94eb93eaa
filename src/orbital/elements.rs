use std::f64::consts::PI;

use nalgebra::Vector3;

use super::propagator::OrbitalState;

// ---------------------------------------------------------------------------
// Apsides from a sampled position history
// ---------------------------------------------------------------------------

/// Whether a position history is already sorted by radius, largest first.
/// `Descending` skips the sort; it is the caller's promise, not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOrder {
    Unsorted,
    Descending,
}

/// Copy of `positions` sorted by radius, largest first. Stable, so equal
/// radii keep their original order.
pub fn sort_by_radius(positions: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
    let mut sorted = positions.to_vec();
    sorted.sort_by(|a, b| b.norm().total_cmp(&a.norm()));
    sorted
}

fn ordered(positions: &[Vector3<f64>], order: HistoryOrder) -> std::borrow::Cow<'_, [Vector3<f64>]> {
    match order {
        HistoryOrder::Descending => positions.into(),
        HistoryOrder::Unsorted => sort_by_radius(positions).into(),
    }
}

/// Farthest sampled position. `None` for an empty history.
pub fn apoapsis(positions: &[Vector3<f64>], order: HistoryOrder) -> Option<Vector3<f64>> {
    ordered(positions, order).first().copied()
}

/// Nearest sampled position. `None` for an empty history.
pub fn periapsis(positions: &[Vector3<f64>], order: HistoryOrder) -> Option<Vector3<f64>> {
    ordered(positions, order).last().copied()
}

pub fn semi_major_axis(positions: &[Vector3<f64>], order: HistoryOrder) -> Option<f64> {
    Apsides::from_positions(positions, order).map(|a| a.semi_major_axis())
}

pub fn eccentricity(positions: &[Vector3<f64>], order: HistoryOrder) -> Option<f64> {
    Apsides::from_positions(positions, order).map(|a| a.eccentricity())
}

/// Kepler's third law on the sampled semi-major axis, s.
pub fn orbital_period(mu: f64, positions: &[Vector3<f64>], order: HistoryOrder) -> Option<f64> {
    Apsides::from_positions(positions, order).map(|a| a.period(mu))
}

/// Apoapsis and periapsis of one history, sorted once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Apsides {
    pub apoapsis: Vector3<f64>,
    pub periapsis: Vector3<f64>,
}

impl Apsides {
    pub fn from_positions(positions: &[Vector3<f64>], order: HistoryOrder) -> Option<Self> {
        let sorted = ordered(positions, order);
        Some(Self {
            apoapsis: *sorted.first()?,
            periapsis: *sorted.last()?,
        })
    }

    pub fn from_history(history: &[OrbitalState]) -> Option<Self> {
        let positions: Vec<Vector3<f64>> = history.iter().map(|s| s.pos).collect();
        Self::from_positions(&positions, HistoryOrder::Unsorted)
    }

    pub fn semi_major_axis(&self) -> f64 {
        (self.apoapsis.norm() + self.periapsis.norm()) / 2.0
    }

    pub fn eccentricity(&self) -> f64 {
        let (apo, peri) = (self.apoapsis.norm(), self.periapsis.norm());
        (apo - peri) / (apo + peri)
    }

    pub fn period(&self, mu: f64) -> f64 {
        2.0 * PI * (self.semi_major_axis().powi(3) / mu).sqrt()
    }
}
