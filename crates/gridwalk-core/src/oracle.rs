//! Movement-validity oracles.
//!
//! A search never inspects the world itself: it asks a [`MoveOracle`]
//! whether a single step from one lattice point in a given direction is
//! allowed. Any `Fn(Point3, Direction) -> bool` closure is an oracle;
//! [`OpenSpace`] and [`BlockMap`] cover the common cases.

use std::collections::HashSet;
use std::fmt;

use crate::geom::{Bounds3, Direction, Point3};

/// Host-supplied predicate gating single lattice steps.
///
/// Implementations must be side-effect free: a search may call
/// `is_valid_move` once per candidate neighbour and in any order.
pub trait MoveOracle {
    /// Whether moving one step from `from` in direction `dir` is permitted.
    fn is_valid_move(&self, from: Point3, dir: Direction) -> bool;
}

impl<F> MoveOracle for F
where
    F: Fn(Point3, Direction) -> bool,
{
    #[inline]
    fn is_valid_move(&self, from: Point3, dir: Direction) -> bool {
        self(from, dir)
    }
}

/// Obstacle-free space, optionally clipped to a box.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenSpace {
    pub bounds: Option<Bounds3>,
}

impl OpenSpace {
    /// Unbounded open space. Searches over it only terminate when they reach
    /// their destination.
    pub fn unbounded() -> Self {
        Self { bounds: None }
    }

    /// Open space limited to `bounds`.
    pub fn within(bounds: Bounds3) -> Self {
        Self {
            bounds: Some(bounds),
        }
    }
}

impl MoveOracle for OpenSpace {
    fn is_valid_move(&self, from: Point3, dir: Direction) -> bool {
        self.bounds.is_none_or(|b| b.contains(from.step(dir)))
    }
}

// ---------------------------------------------------------------------------
// BlockMap
// ---------------------------------------------------------------------------

/// A bounded lattice with blocked cells.
///
/// A move is valid when its target lies inside the bounds and is not
/// blocked. Diagonal moves can additionally be forbidden outright
/// ([`cardinal_only`](Self::cardinal_only)) or forbidden from cutting past
/// a blocked orthogonal neighbour ([`no_corner_cutting`](Self::no_corner_cutting)).
#[derive(Clone, Debug)]
pub struct BlockMap {
    bounds: Bounds3,
    blocked: HashSet<Point3>,
    cardinal_only: bool,
    corner_cutting: bool,
    start: Option<Point3>,
    goal: Option<Point3>,
}

impl BlockMap {
    /// An all-open map covering `bounds`.
    pub fn new(bounds: Bounds3) -> Self {
        Self {
            bounds,
            blocked: HashSet::new(),
            cardinal_only: false,
            corner_cutting: true,
            start: None,
            goal: None,
        }
    }

    /// Parse a single layer at height `y = 0` from ASCII art.
    ///
    /// Line `r` is `z = r`, column `c` is `x = c`. `#` marks a blocked cell;
    /// `.` and spaces are open; `S` and `G` are open cells recorded as
    /// [`start`](Self::start) and [`goal`](Self::goal). Every line must have
    /// the same width. Leading and trailing blank lines are ignored.
    pub fn parse(s: &str) -> Result<Self, MapParseError> {
        let s = s.trim_matches('\n');
        let mut width: Option<usize> = None;
        let mut rows = 0;
        let mut blocked = HashSet::new();
        let mut start = None;
        let mut goal = None;

        for (z, line) in s.lines().enumerate() {
            let w = line.chars().count();
            match width {
                Some(expected) if expected != w => {
                    return Err(MapParseError::InconsistentWidth {
                        line: z,
                        expected,
                        found: w,
                    });
                }
                _ => width = Some(w),
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point3::new(x as i32, 0, z as i32);
                match ch {
                    '#' => {
                        blocked.insert(p);
                    }
                    '.' | ' ' => {}
                    'S' => start = Some(p),
                    'G' => goal = Some(p),
                    _ => return Err(MapParseError::InvalidChar { ch, pos: p }),
                }
            }
            rows = z + 1;
        }

        let width = width.unwrap_or(0);
        Ok(Self {
            bounds: Bounds3::flat(0, 0, width as i32, rows as i32, 0),
            blocked,
            cardinal_only: false,
            corner_cutting: true,
            start,
            goal,
        })
    }

    /// Forbid every diagonal move.
    pub fn cardinal_only(mut self) -> Self {
        self.cardinal_only = true;
        self
    }

    /// Forbid diagonal moves past a blocked orthogonal neighbour.
    pub fn no_corner_cutting(mut self) -> Self {
        self.corner_cutting = false;
        self
    }

    /// Record start and goal cells, as `S` and `G` do in a parsed map.
    pub fn with_endpoints(mut self, start: Point3, goal: Point3) -> Self {
        self.start = Some(start);
        self.goal = Some(goal);
        self
    }

    /// Mark `p` as blocked.
    pub fn block(&mut self, p: Point3) {
        self.blocked.insert(p);
    }

    /// Mark `p` as open.
    pub fn unblock(&mut self, p: Point3) {
        self.blocked.remove(&p);
    }

    /// Whether `p` was explicitly blocked.
    pub fn is_blocked(&self, p: Point3) -> bool {
        self.blocked.contains(&p)
    }

    /// Whether `p` is inside the bounds and open.
    pub fn passable(&self, p: Point3) -> bool {
        self.bounds.contains(p) && !self.blocked.contains(&p)
    }

    /// The map extent.
    pub fn bounds(&self) -> Bounds3 {
        self.bounds
    }

    /// The `S` cell of a parsed map.
    pub fn start(&self) -> Option<Point3> {
        self.start
    }

    /// The `G` cell of a parsed map.
    pub fn goal(&self) -> Option<Point3> {
        self.goal
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }
}

impl MoveOracle for BlockMap {
    fn is_valid_move(&self, from: Point3, dir: Direction) -> bool {
        if !self.passable(from.step(dir)) {
            return false;
        }
        match dir.components() {
            None => true,
            Some(_) if self.cardinal_only => false,
            Some(_) if self.corner_cutting => true,
            Some((a, b)) => self.passable(from.step(a)) && self.passable(from.step(b)),
        }
    }
}

/// Error returned by [`BlockMap::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapParseError {
    /// A line's width differs from the first line's.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `#`, `.`, space, `S` or `G`.
    InvalidChar { ch: char, pos: Point3 },
}

impl fmt::Display for MapParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "map: line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "map contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for MapParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
S..#
.#.#
...G";

    #[test]
    fn closure_is_an_oracle() {
        let only_east = |_: Point3, d: Direction| d == Direction::East;
        assert!(only_east.is_valid_move(Point3::ZERO, Direction::East));
        assert!(!only_east.is_valid_move(Point3::ZERO, Direction::North));
    }

    #[test]
    fn boxed_closure_is_an_oracle() {
        let boxed: Box<dyn Fn(Point3, Direction) -> bool> =
            Box::new(|from: Point3, _: Direction| from.x < 2);
        assert!(boxed.is_valid_move(Point3::new(1, 0, 0), Direction::East));
        assert!(!boxed.is_valid_move(Point3::new(2, 0, 0), Direction::East));
    }

    #[test]
    fn open_space_respects_bounds() {
        let o = OpenSpace::within(Bounds3::flat(0, 0, 2, 2, 0));
        assert!(o.is_valid_move(Point3::ZERO, Direction::NorthEast));
        assert!(!o.is_valid_move(Point3::ZERO, Direction::West));
        assert!(OpenSpace::unbounded().is_valid_move(Point3::ZERO, Direction::West));
    }

    #[test]
    fn parse_room() {
        let m = BlockMap::parse(ROOM).unwrap();
        assert_eq!(m.bounds(), Bounds3::flat(0, 0, 4, 3, 0));
        assert_eq!(m.start(), Some(Point3::new(0, 0, 0)));
        assert_eq!(m.goal(), Some(Point3::new(3, 0, 2)));
        assert_eq!(m.blocked_count(), 3);
        assert!(m.is_blocked(Point3::new(1, 0, 1)));
    }

    #[test]
    fn parse_inconsistent_width() {
        let err = BlockMap::parse("..\n...").unwrap_err();
        assert_eq!(
            err,
            MapParseError::InconsistentWidth {
                line: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn parse_invalid_char() {
        let err = BlockMap::parse("..x").unwrap_err();
        assert!(matches!(err, MapParseError::InvalidChar { ch: 'x', .. }));
        assert!(err.to_string().contains("invalid character"));
    }

    #[test]
    fn blocked_targets_are_rejected() {
        let m = BlockMap::parse(ROOM).unwrap();
        let p = Point3::new(1, 0, 0);
        assert!(!m.is_valid_move(p, Direction::North));
        assert!(m.is_valid_move(p, Direction::East));
        assert!(!m.is_valid_move(Point3::ZERO, Direction::West));
    }

    #[test]
    fn cardinal_only_rejects_diagonals() {
        let m = BlockMap::new(Bounds3::flat(0, 0, 3, 3, 0)).cardinal_only();
        let c = Point3::new(1, 0, 1);
        for d in Direction::ALL {
            assert_eq!(m.is_valid_move(c, d), !d.is_diagonal(), "{d}");
        }
    }

    #[test]
    fn corner_cutting_switch() {
        let mut m = BlockMap::new(Bounds3::flat(0, 0, 3, 3, 0));
        m.block(Point3::new(1, 0, 0));
        let from = Point3::ZERO;
        assert!(m.is_valid_move(from, Direction::NorthEast));
        let mut m = m.no_corner_cutting();
        assert!(!m.is_valid_move(from, Direction::NorthEast));
        m.unblock(Point3::new(1, 0, 0));
        assert!(m.is_valid_move(from, Direction::NorthEast));
    }
}
