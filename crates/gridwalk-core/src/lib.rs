//! **gridwalk-core**: lattice geometry and movement oracles shared by the
//! *gridwalk* search crates.
//!
//! Positions are integer [`Point3`] lattice coordinates; a [`Lattice`]
//! converts them to world space given a step distance. Whether a single step
//! is allowed is decided by a host-supplied [`MoveOracle`].

pub mod geom;
pub mod oracle;

pub use geom::{Bounds3, BoundsIter, Direction, Lattice, Point3, Vec3};
pub use oracle::{BlockMap, MapParseError, MoveOracle, OpenSpace};
