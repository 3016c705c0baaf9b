//! Discovered-node records and path reconstruction.
//!
//! Every search session owns a [`NodeArena`]. Frontiers hold [`NodeId`]
//! handles into it, never copies, so an A* cost update made through the
//! arena is seen by every queued handle for that node.

use gridwalk_core::{Lattice, Point3, Vec3};

/// Handle of a node inside a session's [`NodeArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Opaque host handle attached to a node, e.g. a "visited" marker in a
/// scene. The engine stores and returns it but never interprets it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker(pub u64);

/// A discovered lattice position and the node it was reached from.
#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    pub position: Point3,
    pub previous: Option<NodeId>,
    pub marker: Option<Marker>,
}

impl PathNode {
    pub fn new(position: Point3, previous: Option<NodeId>) -> Self {
        Self {
            position,
            previous,
            marker: None,
        }
    }
}

/// A [`PathNode`] with A* costs. `g` and `previous` are only ever changed
/// together, through [`relax`](Self::relax).
#[derive(Clone, Debug, PartialEq)]
pub struct AStarNode {
    pub node: PathNode,
    /// Cost of the best known route from the start.
    pub g: f64,
    /// Heuristic estimate of the remaining cost.
    pub h: f64,
}

impl AStarNode {
    pub fn new(position: Point3, previous: Option<NodeId>, g: f64, h: f64) -> Self {
        Self {
            node: PathNode::new(position, previous),
            g,
            h,
        }
    }

    /// Frontier priority, `g + h`.
    #[inline]
    pub fn f(&self) -> f64 {
        self.g + self.h
    }

    /// Record a cheaper route through `previous`.
    #[inline]
    pub fn relax(&mut self, g: f64, previous: NodeId) {
        self.g = g;
        self.node.previous = Some(previous);
    }
}

/// Access to the [`PathNode`] part of an arena record.
pub trait Linked {
    fn path_node(&self) -> &PathNode;
    fn path_node_mut(&mut self) -> &mut PathNode;
}

impl Linked for PathNode {
    fn path_node(&self) -> &PathNode {
        self
    }
    fn path_node_mut(&mut self) -> &mut PathNode {
        self
    }
}

impl Linked for AStarNode {
    fn path_node(&self) -> &PathNode {
        &self.node
    }
    fn path_node_mut(&mut self) -> &mut PathNode {
        &mut self.node
    }
}

/// Session-owned storage for discovered nodes.
#[derive(Debug)]
pub struct NodeArena<N> {
    nodes: Vec<N>,
}

impl<N: Linked> NodeArena<N> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Store `node` and return its handle.
    pub fn push(&mut self, node: N) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &N {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk `previous` links from `last` back to the start and return the
    /// chain in start → `last` order.
    pub fn trace(&self, last: NodeId) -> Vec<PathNode> {
        let mut chain = Vec::new();
        let mut cur = Some(last);
        while let Some(id) = cur {
            let node = self.get(id).path_node();
            chain.push(node.clone());
            cur = node.previous;
        }
        chain.reverse();
        chain
    }
}

impl<N: Linked> Default for NodeArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// One position of a found path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub position: Point3,
    pub world: Vec3,
    pub marker: Option<Marker>,
}

/// A path from the start to the destination, both included.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    waypoints: Vec<Waypoint>,
    cost: f64,
}

impl Path {
    /// Build a path from a traced node chain. The cost is recomputed from
    /// the geometry: `step` per cardinal move, `step·√2` per diagonal move.
    pub fn from_chain(chain: Vec<PathNode>, lattice: &Lattice) -> Self {
        let cost = chain
            .windows(2)
            .map(|w| {
                let d = w[1].position - w[0].position;
                if d.x != 0 && d.z != 0 {
                    lattice.step * std::f64::consts::SQRT_2
                } else {
                    lattice.step
                }
            })
            .sum();
        let waypoints = chain
            .into_iter()
            .map(|n| Waypoint {
                position: n.position,
                world: lattice.to_world(n.position),
                marker: n.marker,
            })
            .collect();
        Self { waypoints, cost }
    }

    /// All waypoints, start first.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Lattice positions, start first.
    pub fn positions(&self) -> impl Iterator<Item = Point3> + '_ {
        self.waypoints.iter().map(|w| w.position)
    }

    /// Number of waypoints (moves + 1).
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of moves.
    pub fn steps(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Total move cost in world units.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn start(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn destination(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}
