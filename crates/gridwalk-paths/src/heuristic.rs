use gridwalk_core::Point3;

use crate::distance;

/// Estimate of the remaining cost from a lattice point to the destination,
/// in world units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Sum of per-axis distances. Overestimates once diagonals are allowed.
    Manhattan,
    /// Straight-line distance. Never overestimates on an 8-way lattice.
    Euclidean,
    /// Squared straight-line distance. Cheap, but grows faster than the
    /// real cost, so it trades optimality for fewer expansions.
    SquaredEuclidean,
    /// Always zero; turns A* into Dijkstra.
    Zero,
}

impl Heuristic {
    /// Estimated cost from `from` to `to` on a lattice with spacing `step`.
    pub fn estimate(self, from: Point3, to: Point3, step: f64) -> f64 {
        match self {
            Heuristic::Manhattan => f64::from(distance::manhattan(from, to)) * step,
            Heuristic::Euclidean => distance::euclidean(from, to) * step,
            Heuristic::SquaredEuclidean => {
                distance::squared_euclidean(from, to) as f64 * step * step
            }
            Heuristic::Zero => 0.0,
        }
    }

    /// Whether A* with this heuristic is guaranteed to return a cheapest path
    /// on an 8-way lattice.
    pub fn is_admissible(self) -> bool {
        matches!(self, Heuristic::Euclidean | Heuristic::Zero)
    }
}
