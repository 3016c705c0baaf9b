//! A* search in three frontier-management variants.
//!
//! All variants share the cost model (`step` per cardinal move, `step·√2`
//! per diagonal move), the `g + h` priority, and the relaxation rule: a
//! neighbour seen for the first time gets a fresh node, a known neighbour
//! reached more cheaply has its `g` and `previous` updated in place. They
//! differ only in how a cheaper route is put back on the frontier:
//!
//! - [`AStarVariant::Indexed`]: the queued entry's priority is updated, so a
//!   position never has more than one live entry.
//! - [`AStarVariant::Duplicates`]: another entry is pushed; when the stale one
//!   surfaces it is expanded again using the node's current cost.
//! - [`AStarVariant::ClosedSet`]: another entry is pushed, and entries for
//!   positions that were already expanded are discarded.
//!
//! Node records live in an arena indexed by position; queues only hold
//! [`NodeId`]s.

use std::collections::{HashMap, HashSet};

use gridwalk_core::{Direction, Point3};

use crate::heuristic::Heuristic;
use crate::indexed::IndexedPriorityQueue;
use crate::node::{AStarNode, NodeArena, NodeId};
use crate::queue::PriorityQueue;
use crate::strategy::AStarVariant;
use crate::traits::{Step, StepContext, Traversal};

enum Frontier {
    Indexed(IndexedPriorityQueue<NodeId>),
    Plain(PriorityQueue<NodeId>),
}

impl Frontier {
    fn push(&mut self, id: NodeId, priority: f64) {
        match self {
            Frontier::Indexed(q) => q.enqueue(id, priority),
            Frontier::Plain(q) => q.enqueue(id, priority),
        }
    }

    fn pop(&mut self) -> Option<NodeId> {
        match self {
            Frontier::Indexed(q) => q.dequeue(),
            Frontier::Plain(q) => q.dequeue(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Frontier::Indexed(q) => q.len(),
            Frontier::Plain(q) => q.len(),
        }
    }
}

pub(crate) struct AStar {
    variant: AStarVariant,
    heuristic: Heuristic,
    nodes: NodeArena<AStarNode>,
    by_position: HashMap<Point3, NodeId>,
    frontier: Frontier,
    closed: HashSet<Point3>,
}

impl AStar {
    pub(crate) fn new(
        variant: AStarVariant,
        heuristic: Heuristic,
        start: Point3,
        destination: Point3,
        step: f64,
    ) -> Self {
        let mut frontier = match variant {
            AStarVariant::Indexed => Frontier::Indexed(IndexedPriorityQueue::new()),
            AStarVariant::Duplicates | AStarVariant::ClosedSet => {
                Frontier::Plain(PriorityQueue::new())
            }
        };
        let mut nodes = NodeArena::new();
        let h = heuristic.estimate(start, destination, step);
        let root = nodes.push(AStarNode::new(start, None, 0.0, h));
        frontier.push(root, h);

        Self {
            variant,
            heuristic,
            nodes,
            by_position: HashMap::from([(start, root)]),
            frontier,
            closed: HashSet::new(),
        }
    }

    /// Pop the next entry worth expanding. Only the closed-set variant
    /// discards entries here; the other two expand whatever surfaces.
    fn next_open(&mut self) -> Option<NodeId> {
        loop {
            let id = self.frontier.pop()?;
            if self.variant != AStarVariant::ClosedSet {
                return Some(id);
            }
            if self.closed.insert(self.nodes.get(id).node.position) {
                return Some(id);
            }
        }
    }
}

impl Traversal for AStar {
    fn step(&mut self, cx: &mut StepContext<'_, '_>) -> Step {
        let Some(id) = self.next_open() else {
            return Step::Exhausted;
        };

        let current = self.nodes.get_mut(id);
        cx.visit(&mut current.node);
        let pos = current.node.position;
        let g = current.g;

        if pos == cx.destination {
            return Step::Found(self.nodes.trace(id));
        }

        for dir in Direction::ALL {
            let next = pos.step(dir);
            let tentative_g = g + cx.move_cost(dir);
            if !cx.allows(pos, dir) {
                continue;
            }

            match self.by_position.get(&next).copied() {
                None => {
                    let h = self
                        .heuristic
                        .estimate(next, cx.destination, cx.lattice.step);
                    let child = self.nodes.push(AStarNode::new(next, Some(id), tentative_g, h));
                    self.by_position.insert(next, child);
                    self.frontier.push(child, tentative_g + h);
                    cx.stats.enqueued += 1;
                }
                Some(known) => {
                    let node = self.nodes.get_mut(known);
                    if tentative_g < node.g {
                        node.relax(tentative_g, id);
                        let f = node.f();
                        self.frontier.push(known, f);
                        cx.stats.enqueued += 1;
                    }
                }
            }
        }

        Step::Expanded(pos)
    }

    fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}
