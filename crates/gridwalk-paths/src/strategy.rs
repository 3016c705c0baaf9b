//! Strategy selection and session configuration.

use std::fmt;
use std::str::FromStr;

use gridwalk_core::Vec3;

use crate::error::ParseStrategyError;
use crate::heuristic::Heuristic;

/// How an A* search manages duplicate frontier entries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AStarVariant {
    /// Indexed queue: a cheaper route updates the queued entry in place, so
    /// each position has at most one live entry.
    Indexed,
    /// Plain queue: a cheaper route pushes another entry, and stale entries
    /// are expanded again when they surface.
    Duplicates,
    /// Plain queue plus a closed set: stale entries for already expanded
    /// positions are discarded.
    #[default]
    ClosedSet,
}

impl AStarVariant {
    /// Heuristic used when the configuration does not override it.
    pub fn default_heuristic(self) -> Heuristic {
        match self {
            AStarVariant::Indexed => Heuristic::SquaredEuclidean,
            AStarVariant::Duplicates | AStarVariant::ClosedSet => Heuristic::Euclidean,
        }
    }
}

/// The search algorithm a session runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    DepthFirst,
    BreadthFirst,
    AStar(AStarVariant),
}

impl Strategy {
    /// Every strategy, in presentation order.
    pub const ALL: [Strategy; 5] = [
        Strategy::DepthFirst,
        Strategy::BreadthFirst,
        Strategy::AStar(AStarVariant::Indexed),
        Strategy::AStar(AStarVariant::Duplicates),
        Strategy::AStar(AStarVariant::ClosedSet),
    ];

    /// Short name, accepted back by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::DepthFirst => "dfs",
            Strategy::BreadthFirst => "bfs",
            Strategy::AStar(AStarVariant::Indexed) => "astar-indexed",
            Strategy::AStar(AStarVariant::Duplicates) => "astar-duplicates",
            Strategy::AStar(AStarVariant::ClosedSet) => "astar-closed",
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::AStar(AStarVariant::default())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" => Ok(Strategy::DepthFirst),
            "bfs" | "breadth-first" => Ok(Strategy::BreadthFirst),
            "astar" | "a*" => Ok(Strategy::default()),
            "astar-indexed" => Ok(Strategy::AStar(AStarVariant::Indexed)),
            "astar-duplicates" => Ok(Strategy::AStar(AStarVariant::Duplicates)),
            "astar-closed" => Ok(Strategy::AStar(AStarVariant::ClosedSet)),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Configuration for a [`PathSearch`](crate::PathSearch).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Lattice spacing used by [`PathSearch::search`](crate::PathSearch::search).
    pub step_distance: f64,
    /// World position of lattice point `(0, 0, 0)`.
    pub origin: Vec3,
    /// Overrides the A* variant's default heuristic. Ignored by DFS and BFS.
    pub heuristic: Option<Heuristic>,
}

impl SearchConfig {
    /// Default configuration running `strategy`.
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// The heuristic an A* session will use.
    pub fn effective_heuristic(&self) -> Option<Heuristic> {
        match self.strategy {
            Strategy::AStar(v) => Some(self.heuristic.unwrap_or(v.default_heuristic())),
            _ => None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            step_distance: 1.0,
            origin: Vec3::ZERO,
            heuristic: None,
        }
    }
}
