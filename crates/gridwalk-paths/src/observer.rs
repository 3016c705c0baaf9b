//! Search diagnostics: statistics, reports, and the host observer hook.

use std::time::Duration;

use gridwalk_core::{Point3, Vec3};

use crate::node::{Marker, Path};
use crate::strategy::Strategy;

/// How a session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The destination was reached and the path emitted.
    Found,
    /// The frontier emptied without reaching the destination.
    Exhausted,
    /// The host stopped the session early. Nothing was emitted.
    Cancelled,
}

/// Counters collected while a session runs.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded.
    pub expanded: usize,
    /// Frontier insertions, duplicates and priority updates included.
    pub enqueued: usize,
    /// Ticks handed back to the host.
    pub ticks: usize,
    /// Wall time from session start to completion.
    pub elapsed: Duration,
}

/// Final summary of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub outcome: Outcome,
    pub stats: SearchStats,
    /// The emitted path when `outcome` is [`Outcome::Found`].
    pub path: Option<Path>,
}

impl SearchReport {
    /// Cost of the found path.
    pub fn cost(&self) -> Option<f64> {
        self.path.as_ref().map(Path::cost)
    }
}

/// Host hook for per-node instrumentation.
///
/// Every method has a no-op default. `()` is the observer used when the host
/// does not install one.
pub trait SearchObserver {
    /// Called when a node is expanded for the first time. The returned
    /// marker, if any, is attached to the node and carried into the path.
    fn on_expand(&mut self, position: Point3, world: Vec3) -> Option<Marker> {
        let _ = (position, world);
        None
    }

    /// Called once when the session ends, however it ends.
    fn on_finish(&mut self, report: &SearchReport) {
        let _ = report;
    }
}

impl SearchObserver for () {}

impl<O: SearchObserver + ?Sized> SearchObserver for Box<O> {
    fn on_expand(&mut self, position: Point3, world: Vec3) -> Option<Marker> {
        (**self).on_expand(position, world)
    }

    fn on_finish(&mut self, report: &SearchReport) {
        (**self).on_finish(report)
    }
}
