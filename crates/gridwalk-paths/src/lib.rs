//! Stepwise path search on a 3D lattice.
//!
//! A host configures a [`PathSearch`] with a destination, a movement oracle
//! ([`MoveOracle`](gridwalk_core::MoveOracle)) and any number of path-found
//! listeners, then starts a [`SearchSession`] from a start position. The
//! session performs one node expansion per [`tick`](SearchSession::tick), so
//! the host decides when, and how much, work is done.
//!
//! Five strategies are available through [`Strategy`]:
//!
//! - **Depth-first**: finds some path, not necessarily a short one.
//! - **Breadth-first**: finds a path with the fewest moves.
//! - **A\*** in three frontier variants ([`AStarVariant`]):
//!   - `Indexed`: updates queued priorities in an [`IndexedPriorityQueue`].
//!   - `Duplicates`: re-enqueues improved nodes and expands stale entries.
//!   - `ClosedSet`: re-enqueues improved nodes and skips closed positions.
//!
//! Lateral moves cost the lattice step; diagonal moves cost `step·√2`.
//! Movement is restricted to the horizontal plane of the start position.
//!
//! # Example
//!
//! ```
//! use gridwalk_core::BlockMap;
//! use gridwalk_paths::{Outcome, PathSearch, SearchConfig, Strategy};
//!
//! let map = BlockMap::parse("S.#\n..#\n...\n#.G").unwrap();
//! let mut search = PathSearch::new(SearchConfig::with_strategy(Strategy::BreadthFirst));
//! search.set_oracle(map.clone());
//! search.set_destination(map.goal().unwrap());
//!
//! let mut session = search.search_path(map.start().unwrap(), 1.0).unwrap();
//! while session.tick().is_some() {}
//! assert_eq!(session.outcome(), Some(Outcome::Found));
//! ```

mod astar;
mod bfs;
mod dfs;
mod distance;
mod error;
mod heuristic;
mod indexed;
mod node;
mod observer;
mod queue;
mod search;
mod strategy;
mod traits;

pub use distance::{chebyshev, euclidean, manhattan, octile, squared_euclidean};
pub use error::{ParseStrategyError, SearchError};
pub use heuristic::Heuristic;
pub use indexed::IndexedPriorityQueue;
pub use node::{AStarNode, Linked, Marker, NodeArena, NodeId, Path, PathNode, Waypoint};
pub use observer::{Outcome, SearchObserver, SearchReport, SearchStats};
pub use queue::PriorityQueue;
pub use search::{PathSearch, SearchSession, Tick};
pub use strategy::{AStarVariant, SearchConfig, Strategy};
