//! Breadth-first search.
//!
//! Same skeleton as depth-first search with a FIFO frontier: positions are
//! expanded in non-decreasing move count from the start, so the first path
//! to reach the destination has the fewest moves.

use std::collections::{HashSet, VecDeque};

use gridwalk_core::{Direction, Point3};

use crate::node::{NodeArena, NodeId, PathNode};
use crate::traits::{Step, StepContext, Traversal};

pub(crate) struct BreadthFirst {
    nodes: NodeArena<PathNode>,
    visited: HashSet<Point3>,
    queue: VecDeque<NodeId>,
}

impl BreadthFirst {
    pub(crate) fn new(start: Point3) -> Self {
        let mut nodes = NodeArena::new();
        let root = nodes.push(PathNode::new(start, None));
        Self {
            nodes,
            visited: HashSet::from([start]),
            queue: VecDeque::from([root]),
        }
    }
}

impl Traversal for BreadthFirst {
    fn step(&mut self, cx: &mut StepContext<'_, '_>) -> Step {
        let Some(id) = self.queue.pop_front() else {
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
            self.queue.push_back(child);
            cx.stats.enqueued += 1;
        }

        Step::Expanded(pos)
    }

    fn frontier_len(&self) -> usize {
        self.queue.len()
    }
}
