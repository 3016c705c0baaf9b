use std::fmt;

use gridwalk_core::Vec3;

/// Misconfiguration detected when a search is started.
///
/// Not finding a path is not an error; it is reported as
/// [`Outcome::Exhausted`](crate::Outcome::Exhausted).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchError {
    /// `search_path` was called before `set_destination`.
    MissingDestination,
    /// `search_path` was called before `set_oracle`.
    MissingOracle,
    /// The step distance is zero, negative, or not finite.
    InvalidStepDistance(f64),
    /// A start or destination that is not finite, or too far from the
    /// lattice origin to be represented at the requested step distance.
    InvalidPosition(Vec3),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDestination => f.write_str("search: no destination set"),
            Self::MissingOracle => f.write_str("search: no movement oracle set"),
            Self::InvalidStepDistance(d) => {
                write!(f, "search: step distance must be positive and finite, got {d}")
            }
            Self::InvalidPosition(p) => {
                write!(f, "search: position {p} cannot be placed on the lattice")
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Error returned when parsing a [`Strategy`](crate::Strategy) name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(pub String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy \u{201c}{}\u{201d} (expected dfs, bfs, astar, astar-indexed, astar-duplicates or astar-closed)",
            self.0
        )
    }
}

impl std::error::Error for ParseStrategyError {}
