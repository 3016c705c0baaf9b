//! Lattice geometry: [`Point3`], [`Direction`], [`Bounds3`], and the
//! world-space conversion helpers [`Vec3`] and [`Lattice`].
//!
//! Searches run on integer lattice coordinates so that positions hash and
//! compare exactly. A [`Lattice`] maps those coordinates to world space by
//! scaling with the step distance.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Point3
// ---------------------------------------------------------------------------

/// A 3D integer lattice point. `y` is the vertical axis; lateral movement
/// happens in the x/z plane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a point shifted by (dx, dy, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// The neighbour one step away in direction `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        self + dir.offset()
    }

    /// The eight lateral neighbours, in [`Direction::ALL`] order.
    #[inline]
    pub fn neighbors_8(self) -> [Point3; 8] {
        Direction::ALL.map(|d| self.step(d))
    }
}

impl PartialOrd for Point3 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point3 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y
            .cmp(&other.y)
            .then(self.z.cmp(&other.z))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Point3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Point3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<(i32, i32, i32)> for Point3 {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight lateral moves. North is `+z`, east is `+x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Every direction, cardinals first. Searches expand neighbours in this
    /// order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// The four axis-aligned directions.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit lattice offset of this direction.
    #[inline]
    pub const fn offset(self) -> Point3 {
        match self {
            Direction::North => Point3::new(0, 0, 1),
            Direction::South => Point3::new(0, 0, -1),
            Direction::East => Point3::new(1, 0, 0),
            Direction::West => Point3::new(-1, 0, 0),
            Direction::NorthEast => Point3::new(1, 0, 1),
            Direction::NorthWest => Point3::new(-1, 0, 1),
            Direction::SouthEast => Point3::new(1, 0, -1),
            Direction::SouthWest => Point3::new(-1, 0, -1),
        }
    }

    /// Whether both lateral components of the offset are non-zero.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        let o = self.offset();
        o.x != 0 && o.z != 0
    }

    /// Multiplier applied to the step distance to get the move cost:
    /// `1` for cardinals, `√2` for diagonals.
    #[inline]
    pub fn cost_factor(self) -> f64 {
        if self.is_diagonal() {
            std::f64::consts::SQRT_2
        } else {
            1.0
        }
    }

    /// The two cardinal components of a diagonal direction, or `None` for a
    /// cardinal one.
    pub const fn components(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::NorthEast => Some((Direction::North, Direction::East)),
            Direction::NorthWest => Some((Direction::North, Direction::West)),
            Direction::SouthEast => Some((Direction::South, Direction::East)),
            Direction::SouthWest => Some((Direction::South, Direction::West)),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
            Direction::NorthEast => "NE",
            Direction::NorthWest => "NW",
            Direction::SouthEast => "SE",
            Direction::SouthWest => "SW",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Vec3 / Lattice
// ---------------------------------------------------------------------------

/// A world-space position.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to `other`.
    pub fn distance(self, other: Vec3) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// World position of `p` on the unit lattice anchored at the origin.
impl From<Point3> for Vec3 {
    fn from(p: Point3) -> Self {
        Vec3::new(f64::from(p.x), f64::from(p.y), f64::from(p.z))
    }
}

/// Maps lattice points to world space: `world = origin + point * step`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lattice {
    pub origin: Vec3,
    pub step: f64,
}

impl Lattice {
    /// Create a lattice anchored at `origin` with spacing `step`.
    pub const fn new(origin: Vec3, step: f64) -> Self {
        Self { origin, step }
    }

    /// World position of lattice point `p`.
    #[inline]
    pub fn to_world(&self, p: Point3) -> Vec3 {
        Vec3::new(
            self.origin.x + f64::from(p.x) * self.step,
            self.origin.y + f64::from(p.y) * self.step,
            self.origin.z + f64::from(p.z) * self.step,
        )
    }

    /// Largest lattice coordinate magnitude [`snap`](Self::snap) produces.
    /// Leaves headroom so that stepping away from a snapped point cannot
    /// overflow `i32`.
    pub const MAX_COORD: i32 = 1 << 30;

    /// Nearest lattice point to world position `v`, or `None` when `v` is not
    /// finite or lies further than [`MAX_COORD`](Self::MAX_COORD) steps from
    /// the origin on some axis.
    #[inline]
    pub fn snap(&self, v: Vec3) -> Option<Point3> {
        let q = |w: f64, o: f64| {
            let c = ((w - o) / self.step).round();
            (c.is_finite() && c.abs() <= f64::from(Self::MAX_COORD)).then_some(c as i32)
        };
        Some(Point3::new(
            q(v.x, self.origin.x)?,
            q(v.y, self.origin.y)?,
            q(v.z, self.origin.z)?,
        ))
    }
}

// ---------------------------------------------------------------------------
// Bounds3
// ---------------------------------------------------------------------------

/// A half-open box \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds3 {
    pub min: Point3,
    pub max: Point3,
}

impl Bounds3 {
    /// Create a box from two corners, canonicalized so that `min` ≤ `max` on
    /// each axis.
    #[inline]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// A single-layer box at height `y` covering `[x0, x1) × [z0, z1)`.
    #[inline]
    pub fn flat(x0: i32, z0: i32, x1: i32, z1: i32, y: i32) -> Self {
        Self::new(Point3::new(x0, y, z0), Point3::new(x1, y + 1, z1))
    }

    /// Size along each axis.
    #[inline]
    pub fn size(self) -> Point3 {
        self.max - self.min
    }

    /// Whether the box has zero or negative volume.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
    }

    /// Number of lattice points in the box.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let s = self.size();
        s.x as usize * s.y as usize * s.z as usize
    }

    /// Whether `p` is inside the half-open box.
    #[inline]
    pub fn contains(self, p: Point3) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }

    /// Iterate every point, x fastest, then z, then y.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Bounds3 {
    type Item = Point3;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

/// Iterator over the points in a [`Bounds3`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds3,
    cur: Point3,
}

impl Iterator for BoundsIter {
    type Item = Point3;

    #[inline]
    fn next(&mut self) -> Option<Point3> {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.max.y {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.bounds.max.x {
            self.cur.x = self.bounds.min.x;
            self.cur.z += 1;
            if self.cur.z >= self.bounds.max.z {
                self.cur.z = self.bounds.min.z;
                self.cur.y += 1;
            }
        }
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn point_arithmetic() {
        let a = Point3::new(1, 2, 3);
        let b = Point3::new(3, 4, 5);
        assert_eq!(a + b, Point3::new(4, 6, 8));
        assert_eq!(b - a, Point3::new(2, 2, 2));
        assert_eq!(a * 3, Point3::new(3, 6, 9));
        assert_eq!(a.shift(-1, 0, 2), Point3::new(0, 2, 5));
    }

    #[test]
    fn cardinals_lead_the_expansion_order() {
        assert_eq!(Direction::ALL[..4], Direction::CARDINAL);
        for d in Direction::CARDINAL {
            assert!(!d.is_diagonal());
            assert_eq!(d.components(), None);
        }
    }

    #[test]
    fn directions_are_lateral_and_distinct() {
        let offsets: HashSet<_> = Direction::ALL.iter().map(|d| d.offset()).collect();
        assert_eq!(offsets.len(), 8);
        for d in Direction::ALL {
            assert_eq!(d.offset().y, 0);
        }
    }

    #[test]
    fn diagonal_detection_and_cost() {
        let diagonals: Vec<_> = Direction::ALL.into_iter().filter(|d| d.is_diagonal()).collect();
        assert_eq!(diagonals.len(), 4);
        assert_eq!(Direction::North.cost_factor(), 1.0);
        assert!((Direction::SouthWest.cost_factor() - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn diagonal_components_sum_to_offset() {
        for d in Direction::ALL {
            match d.components() {
                Some((a, b)) => assert_eq!(a.offset() + b.offset(), d.offset()),
                None => assert!(!d.is_diagonal()),
            }
        }
    }

    #[test]
    fn lattice_round_trip() {
        let lat = Lattice::new(Vec3::new(1.0, 0.0, -2.0), 2.0);
        let p = Point3::new(3, 0, -1);
        let w = lat.to_world(p);
        assert_eq!(w, Vec3::new(7.0, 0.0, -4.0));
        assert_eq!(lat.snap(w), Some(p));
    }

    #[test]
    fn lattice_snaps_to_nearest() {
        let lat = Lattice::new(Vec3::ZERO, 0.5);
        assert_eq!(lat.snap(Vec3::new(0.74, 0.0, 1.26)), Some(Point3::new(1, 0, 3)));
    }

    #[test]
    fn snap_rejects_unrepresentable_positions() {
        let lat = Lattice::new(Vec3::ZERO, 1.0);
        assert_eq!(lat.snap(Vec3::new(f64::NAN, 0.0, 0.0)), None);
        assert_eq!(lat.snap(Vec3::new(0.0, f64::INFINITY, 0.0)), None);
        assert_eq!(lat.snap(Vec3::new(0.0, 0.0, 3e9)), None);
        let edge = f64::from(Lattice::MAX_COORD);
        assert_eq!(
            lat.snap(Vec3::new(-edge, 0.0, edge)),
            Some(Point3::new(-Lattice::MAX_COORD, 0, Lattice::MAX_COORD))
        );
        // A tiny step pushes ordinary positions out of range.
        let fine = Lattice::new(Vec3::ZERO, 1e-12);
        assert_eq!(fine.snap(Vec3::new(1.0, 0.0, 0.0)), None);
    }

    #[test]
    fn points_convert_on_the_unit_lattice() {
        let p = Point3::new(2, -1, 5);
        let unit = Lattice::new(Vec3::ZERO, 1.0);
        assert_eq!(Vec3::from(p), unit.to_world(p));
        assert_eq!(unit.snap(p.into()), Some(p));
    }

    #[test]
    fn bounds_basics() {
        let b = Bounds3::flat(0, 0, 3, 2, 0);
        assert_eq!(b.len(), 6);
        assert!(b.contains(Point3::new(2, 0, 1)));
        assert!(!b.contains(Point3::new(3, 0, 0)));
        assert!(!b.contains(Point3::new(0, 1, 0)));
        assert_eq!(b.iter().count(), 6);
    }

    #[test]
    fn bounds_canonicalize() {
        let b = Bounds3::new(Point3::new(3, 1, 2), Point3::new(0, 0, 0));
        assert_eq!(b.min, Point3::ZERO);
        assert_eq!(b.max, Point3::new(3, 1, 2));
    }

    #[test]
    fn empty_bounds_iter() {
        let b = Bounds3::default();
        assert!(b.is_empty());
        assert_eq!(b.iter().count(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn point_round_trip() {
        let p = Point3::new(-4, 1, 9);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point3 = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn direction_round_trip() {
        let json = serde_json::to_string(&Direction::NorthWest).unwrap();
        let back: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Direction::NorthWest);
    }
}
