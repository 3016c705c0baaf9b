use gridwalk_core::{Direction, Lattice, MoveOracle, Point3};

use crate::node::PathNode;
use crate::observer::{SearchObserver, SearchStats};

/// Everything a traversal needs from its session for one step.
pub(crate) struct StepContext<'a, 'h> {
    pub(crate) oracle: &'a (dyn MoveOracle + 'h),
    pub(crate) observer: &'a mut (dyn SearchObserver + 'h),
    pub(crate) lattice: Lattice,
    pub(crate) destination: Point3,
    pub(crate) stats: &'a mut SearchStats,
}

impl StepContext<'_, '_> {
    /// Ask the oracle about one candidate move.
    #[inline]
    pub(crate) fn allows(&self, from: Point3, dir: Direction) -> bool {
        self.oracle.is_valid_move(from, dir)
    }

    /// Count an expansion and let the observer attach a marker to `node`
    /// the first time it is expanded.
    pub(crate) fn visit(&mut self, node: &mut PathNode) {
        self.stats.expanded += 1;
        if node.marker.is_none() {
            let world = self.lattice.to_world(node.position);
            node.marker = self.observer.on_expand(node.position, world);
        }
        log::trace!("expand {}", node.position);
    }

    /// Cost of one move in `dir`.
    #[inline]
    pub(crate) fn move_cost(&self, dir: Direction) -> f64 {
        self.lattice.step * dir.cost_factor()
    }
}

/// Result of advancing a traversal by one expansion.
pub(crate) enum Step {
    /// A node was expanded; the search continues.
    Expanded(Point3),
    /// The destination was expanded. Carries the start-first node chain.
    Found(Vec<PathNode>),
    /// The frontier is empty.
    Exhausted,
}

/// A resumable search state machine.
///
/// Each call to `step` performs at most one expansion and then returns
/// control to the caller.
pub(crate) trait Traversal {
    fn step(&mut self, cx: &mut StepContext<'_, '_>) -> Step;

    /// Entries currently waiting in the frontier.
    fn frontier_len(&self) -> usize;
}
