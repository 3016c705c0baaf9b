//! Depth-first search.
//!
//! The frontier is a stack, so the most recently discovered position is
//! expanded next. Positions are marked visited when pushed and are never
//! pushed twice. The path found is valid but usually not the shortest.
//!
//! Over an unbounded oracle such as
//! [`OpenSpace::unbounded`](gridwalk_core::OpenSpace::unbounded) the search
//! can run forever: the last direction pushed (south-west) is always popped
//! first, so it walks away from the destination one fresh position at a
//! time and never drains the stack. Bound the oracle, or bound the work with
//! [`SearchSession::run_for`](crate::SearchSession::run_for).

use std::collections::HashSet;

use gridwalk_core::{Direction, Point3};

use crate::node::{NodeArena, NodeId, PathNode};
use crate::traits::{Step, StepContext, Traversal};

pub(crate) struct DepthFirst {
    nodes: NodeArena<PathNode>,
    visited: HashSet<Point3>,
    stack: Vec<NodeId>,
}

impl DepthFirst {
    pub(crate) fn new(start: Point3) -> Self {
        let mut nodes = NodeArena::new();
        let root = nodes.push(PathNode::new(start, None));
        Self {
            nodes,
            visited: HashSet::from([start]),
            stack: vec![root],
        }
    }
}

impl Traversal for DepthFirst {
    fn step(&mut self, cx: &mut StepContext<'_, '_>) -> Step {
        let Some(id) = self.stack.pop() else {
            return Step::Exhausted;
        };

        let node = self.nodes.get_mut(id);
        cx.visit(node);
        let pos = node.position;

        if pos == cx.destination {
            return Step::Found(self.nodes.trace(id));
        }

        for dir in Direction::ALL {
            let next = pos.step(dir);
            if self.visited.contains(&next) || !cx.allows(pos, dir) {
                continue;
            }
            self.visited.insert(next);
            let child = self.nodes.push(PathNode::new(next, Some(id)));
            self.stack.push(child);
            cx.stats.enqueued += 1;
        }

        Step::Expanded(pos)
    }

    fn frontier_len(&self) -> usize {
        self.stack.len()
    }
}
