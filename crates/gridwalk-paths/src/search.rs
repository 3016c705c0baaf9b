//! The host-facing search contract: [`PathSearch`] holds destination,
//! oracle, listeners and observer; [`PathSearch::search_path`] starts a
//! [`SearchSession`], a step function the host drives one tick at a time.
//!
//! A session never runs on its own. The host calls
//! [`tick`](SearchSession::tick) (or iterates the session) whenever it wants
//! the next expansion, which makes it easy to spread a search over frames,
//! bound it, or drop it half-way.

use std::time::Instant;

use gridwalk_core::{Lattice, MoveOracle, Point3, Vec3};

use crate::astar::AStar;
use crate::bfs::BreadthFirst;
use crate::dfs::DepthFirst;
use crate::error::SearchError;
use crate::node::Path;
use crate::observer::{Outcome, SearchObserver, SearchReport, SearchStats};
use crate::strategy::{SearchConfig, Strategy};
use crate::traits::{Step, StepContext, Traversal};

type Listener<'h> = Box<dyn FnMut(&Path) + 'h>;

/// What one tick of a session did.
#[derive(Clone, Debug, PartialEq)]
pub enum Tick {
    /// A node was expanded; more ticks follow.
    Expanded(Point3),
    /// The destination was reached. Listeners have already been notified.
    Found(Path),
    /// The frontier ran dry. No path exists within the oracle's reach.
    Exhausted,
}

/// A configured search host.
///
/// ```
/// use gridwalk_core::{OpenSpace, Point3};
/// use gridwalk_paths::{PathSearch, SearchConfig};
///
/// let mut search = PathSearch::new(SearchConfig::default());
/// search.set_oracle(OpenSpace::unbounded());
/// search.set_destination(Point3::new(2, 0, 2));
/// let report = search.search_path(Point3::ZERO, 1.0).unwrap().run();
/// assert_eq!(report.path.unwrap().steps(), 2);
/// ```
pub struct PathSearch<'h> {
    config: SearchConfig,
    destination: Option<Vec3>,
    oracle: Option<Box<dyn MoveOracle + 'h>>,
    listeners: Vec<Listener<'h>>,
    observer: Box<dyn SearchObserver + 'h>,
}

impl<'h> PathSearch<'h> {
    /// Create a host with no destination, oracle, or listeners.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            destination: None,
            oracle: None,
            listeners: Vec::new(),
            observer: Box::new(()),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Switch to another strategy for subsequent searches.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.config.strategy = strategy;
    }

    /// Set the world position the next search heads for. It is snapped to
    /// the nearest lattice point when the search starts.
    pub fn set_destination(&mut self, destination: impl Into<Vec3>) {
        self.destination = Some(destination.into());
    }

    /// The configured destination, if any.
    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    /// Install the movement-validity oracle.
    pub fn set_oracle(&mut self, oracle: impl MoveOracle + 'h) {
        self.oracle = Some(Box::new(oracle));
    }

    /// Install an instrumentation hook, replacing the previous one.
    pub fn set_observer(&mut self, observer: impl SearchObserver + 'h) {
        self.observer = Box::new(observer);
    }

    /// Register a callback fired once per successful search with the path
    /// in start → destination order.
    pub fn on_path_found(&mut self, listener: impl FnMut(&Path) + 'h) {
        self.listeners.push(Box::new(listener));
    }

    /// Start a search from `start` with the configured step distance.
    pub fn search(
        &mut self,
        start: impl Into<Vec3>,
    ) -> Result<SearchSession<'_, 'h>, SearchError> {
        let step = self.config.step_distance;
        self.search_path(start, step)
    }

    /// Start a search from `start` on a lattice with spacing
    /// `step_distance`.
    ///
    /// Fails before any node is expanded when no destination or oracle is
    /// set, when the step distance is not a positive finite number, or when
    /// start or destination cannot be snapped to the lattice.
    pub fn search_path(
        &mut self,
        start: impl Into<Vec3>,
        step_distance: f64,
    ) -> Result<SearchSession<'_, 'h>, SearchError> {
        let destination = self.destination.ok_or(SearchError::MissingDestination)?;
        let oracle = self.oracle.as_deref().ok_or(SearchError::MissingOracle)?;
        if !step_distance.is_finite() || step_distance <= 0.0 {
            return Err(SearchError::InvalidStepDistance(step_distance));
        }

        let lattice = Lattice::new(self.config.origin, step_distance);
        let start = start.into();
        let start = lattice.snap(start).ok_or(SearchError::InvalidPosition(start))?;
        let destination = lattice
            .snap(destination)
            .ok_or(SearchError::InvalidPosition(destination))?;
        let strategy = self.config.strategy;

        let traversal: Box<dyn Traversal> = match strategy {
            Strategy::DepthFirst => Box::new(DepthFirst::new(start)),
            Strategy::BreadthFirst => Box::new(BreadthFirst::new(start)),
            Strategy::AStar(variant) => {
                let heuristic = self.config.heuristic.unwrap_or(variant.default_heuristic());
                Box::new(AStar::new(variant, heuristic, start, destination, step_distance))
            }
        };

        log::debug!(
            "{strategy} search from {start} to {destination}, step {step_distance}"
        );

        Ok(SearchSession {
            strategy,
            lattice,
            destination,
            traversal,
            oracle,
            observer: &mut *self.observer,
            listeners: &mut self.listeners,
            stats: SearchStats {
                enqueued: 1,
                ..SearchStats::default()
            },
            started: Instant::now(),
            outcome: None,
            path: None,
        })
    }
}

/// A running search.
///
/// Dropping an unfinished session cancels it: the frontier and node arena
/// are released and no path is emitted.
pub struct SearchSession<'s, 'h> {
    strategy: Strategy,
    lattice: Lattice,
    destination: Point3,
    traversal: Box<dyn Traversal>,
    oracle: &'s (dyn MoveOracle + 'h),
    observer: &'s mut (dyn SearchObserver + 'h),
    listeners: &'s mut Vec<Listener<'h>>,
    stats: SearchStats,
    started: Instant,
    outcome: Option<Outcome>,
    path: Option<Path>,
}

impl SearchSession<'_, '_> {
    /// Advance by one expansion. Returns `None` once the session has
    /// finished.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.outcome.is_some() {
            return None;
        }
        self.stats.ticks += 1;

        let mut cx = StepContext {
            oracle: self.oracle,
            observer: &mut *self.observer,
            lattice: self.lattice,
            destination: self.destination,
            stats: &mut self.stats,
        };
        match self.traversal.step(&mut cx) {
            Step::Expanded(p) => Some(Tick::Expanded(p)),
            Step::Found(chain) => {
                let path = Path::from_chain(chain, &self.lattice);
                for listener in self.listeners.iter_mut() {
                    listener(&path);
                }
                self.path = Some(path.clone());
                self.finish(Outcome::Found);
                Some(Tick::Found(path))
            }
            Step::Exhausted => {
                self.finish(Outcome::Exhausted);
                Some(Tick::Exhausted)
            }
        }
    }

    /// Drive the session to completion and return its report.
    pub fn run(mut self) -> SearchReport {
        while self.tick().is_some() {}
        self.report()
    }

    /// Run at most `max_ticks` ticks. Returns the outcome if the session
    /// finished within the budget.
    pub fn run_for(&mut self, max_ticks: usize) -> Option<Outcome> {
        for _ in 0..max_ticks {
            if self.tick().is_none() {
                break;
            }
        }
        self.outcome
    }

    /// Stop the session without emitting a path.
    pub fn cancel(mut self) -> SearchReport {
        self.abandon();
        self.report()
    }

    /// Whether the session has ended.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// How the session ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The strategy this session runs.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The lattice snapped destination.
    pub fn destination(&self) -> Point3 {
        self.destination
    }

    /// Entries waiting in the frontier.
    pub fn frontier_len(&self) -> usize {
        self.traversal.frontier_len()
    }

    /// Counters so far. `elapsed` keeps growing until the session ends.
    pub fn stats(&self) -> SearchStats {
        let mut stats = self.stats;
        if self.outcome.is_none() {
            stats.elapsed = self.started.elapsed();
        }
        stats
    }

    /// Snapshot of the session state.
    pub fn report(&self) -> SearchReport {
        SearchReport {
            strategy: self.strategy,
            outcome: self.outcome.unwrap_or(Outcome::Cancelled),
            stats: self.stats(),
            path: self.path.clone(),
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.stats.elapsed = self.started.elapsed();
        let ms = self.stats.elapsed.as_secs_f64() * 1000.0;
        match outcome {
            Outcome::Found => log::info!(
                "{} search found a path: expanded {} nodes in {ms:.3} ms",
                self.strategy,
                self.stats.expanded
            ),
            Outcome::Exhausted => log::info!(
                "{} search ended without a path: expanded {} nodes in {ms:.3} ms",
                self.strategy,
                self.stats.expanded
            ),
            Outcome::Cancelled => log::debug!(
                "{} search cancelled after {} expansions",
                self.strategy,
                self.stats.expanded
            ),
        }
        let report = self.report();
        self.observer.on_finish(&report);
    }

    fn abandon(&mut self) {
        if self.outcome.is_none() {
            self.finish(Outcome::Cancelled);
        }
    }
}

impl Iterator for SearchSession<'_, '_> {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        self.tick()
    }
}

impl Drop for SearchSession<'_, '_> {
    fn drop(&mut self) {
        self.abandon();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gridwalk_core::{BlockMap, Bounds3, OpenSpace, Point3, Vec3};

    use super::*;
    use crate::node::Marker;
    use crate::strategy::AStarVariant;

    fn open_search(strategy: Strategy) -> PathSearch<'static> {
        let mut s = PathSearch::new(SearchConfig::with_strategy(strategy));
        s.set_oracle(OpenSpace::within(Bounds3::flat(-5, -5, 6, 6, 0)));
        s.set_destination(Point3::new(3, 0, 1));
        s
    }

    #[test]
    fn missing_destination_fails_fast() {
        let mut s = PathSearch::new(SearchConfig::default());
        s.set_oracle(OpenSpace::unbounded());
        assert_eq!(
            s.search_path(Vec3::ZERO, 1.0).err(),
            Some(SearchError::MissingDestination)
        );
    }

    #[test]
    fn missing_oracle_fails_fast() {
        let mut s = PathSearch::new(SearchConfig::default());
        s.set_destination(Point3::new(1, 0, 0));
        assert_eq!(s.search(Vec3::ZERO).err(), Some(SearchError::MissingOracle));
    }

    #[test]
    fn bad_step_distance_fails_fast() {
        let mut s = open_search(Strategy::BreadthFirst);
        for step in [0.0, -1.0, f64::INFINITY] {
            assert_eq!(
                s.search_path(Vec3::ZERO, step).err(),
                Some(SearchError::InvalidStepDistance(step))
            );
        }
        assert!(matches!(
            s.search_path(Vec3::ZERO, f64::NAN).err(),
            Some(SearchError::InvalidStepDistance(_))
        ));
    }

    #[test]
    fn non_finite_positions_fail_fast() {
        let mut s = open_search(Strategy::BreadthFirst);
        let bad = Vec3::new(f64::NAN, 0.0, f64::NAN);
        s.set_destination(bad);
        assert!(matches!(
            s.search_path(Vec3::new(1.0, 0.0, 1.0), 1.0).err(),
            Some(SearchError::InvalidPosition(p)) if p.x.is_nan()
        ));

        s.set_destination(Point3::new(3, 0, 1));
        let far = Vec3::new(f64::NEG_INFINITY, 0.0, 0.0);
        assert_eq!(
            s.search_path(far, 1.0).err(),
            Some(SearchError::InvalidPosition(far))
        );
    }

    #[test]
    fn out_of_range_positions_fail_fast() {
        let mut s = PathSearch::new(SearchConfig::with_strategy(Strategy::BreadthFirst));
        s.set_oracle(OpenSpace::unbounded());
        let to = Vec3::new(3e9, 0.0, 0.0);
        s.set_destination(to);
        assert_eq!(
            s.search_path(Vec3::new(3e9 - 2.0, 0.0, 0.0), 1.0).err(),
            Some(SearchError::InvalidPosition(Vec3::new(3e9 - 2.0, 0.0, 0.0)))
        );

        // Representable with a coarser step.
        let report = s.search_path(Vec3::new(3e9 - 2000.0, 0.0, 0.0), 1000.0).unwrap().run();
        assert_eq!(report.path.unwrap().steps(), 2);
    }

    #[test]
    fn listener_fires_once_with_start_first_path() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut s = open_search(Strategy::default());
        let sink = Rc::clone(&seen);
        s.on_path_found(move |p: &Path| sink.borrow_mut().push(p.clone()));

        let report = s.search_path(Point3::ZERO, 1.0).unwrap().run();
        assert_eq!(report.outcome, Outcome::Found);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].start().unwrap().position, Point3::ZERO);
        assert_eq!(seen[0].destination().unwrap().position, Point3::new(3, 0, 1));
        assert_eq!(Some(&seen[0]), report.path.as_ref());
    }

    #[test]
    fn listeners_stay_silent_on_exhaustion() {
        let mut map = BlockMap::new(Bounds3::flat(0, 0, 4, 4, 0));
        let goal = Point3::new(3, 0, 3);
        for p in goal.neighbors_8() {
            map.block(p);
        }
        for strategy in Strategy::ALL {
            let mut fired = 0;
            {
                let mut s = PathSearch::new(SearchConfig::with_strategy(strategy));
                s.set_oracle(map.clone());
                s.set_destination(goal);
                s.on_path_found(|_| fired += 1);
                let report = s.search_path(Point3::ZERO, 1.0).unwrap().run();
                assert_eq!(report.outcome, Outcome::Exhausted, "{strategy}");
            }
            assert_eq!(fired, 0, "{strategy}");
        }
    }

    #[test]
    fn one_expansion_per_tick() {
        let mut s = open_search(Strategy::BreadthFirst);
        let mut session = s.search_path(Point3::ZERO, 1.0).unwrap();
        let first = session.tick();
        assert_eq!(first, Some(Tick::Expanded(Point3::ZERO)));
        assert_eq!(session.stats().expanded, 1);
        assert_eq!(session.frontier_len(), 8);
        let rest: Vec<_> = session.by_ref().collect();
        assert!(matches!(rest.last(), Some(Tick::Found(_))));
        assert_eq!(session.tick(), None);
        assert_eq!(session.stats().ticks, rest.len() + 1);
    }

    #[test]
    fn run_for_bounds_work() {
        let mut s = open_search(Strategy::DepthFirst);
        s.set_destination(Point3::new(100, 0, 100));
        let mut session = s.search_path(Point3::ZERO, 1.0).unwrap();
        assert_eq!(session.run_for(5), None);
        assert_eq!(session.stats().expanded, 5);
        assert!(!session.is_finished());
        assert_eq!(session.run_for(10_000), Some(Outcome::Exhausted));
    }

    #[test]
    fn cancel_emits_nothing() {
        let mut fired = false;
        let mut s = open_search(Strategy::AStar(AStarVariant::Duplicates));
        s.on_path_found(|_| fired = true);
        let mut session = s.search_path(Point3::ZERO, 1.0).unwrap();
        session.tick();
        let report = session.cancel();
        assert_eq!(report.outcome, Outcome::Cancelled);
        assert!(report.path.is_none());
        drop(s);
        assert!(!fired);
    }

    #[derive(Default)]
    struct Recorder {
        expanded: Vec<Point3>,
        finished: Vec<Outcome>,
    }

    impl SearchObserver for &mut Recorder {
        fn on_expand(&mut self, position: Point3, _world: Vec3) -> Option<Marker> {
            self.expanded.push(position);
            Some(Marker(self.expanded.len() as u64))
        }

        fn on_finish(&mut self, report: &SearchReport) {
            self.finished.push(report.outcome);
        }
    }

    #[test]
    fn observer_markers_travel_with_the_path() {
        let mut rec = Recorder::default();
        {
            let mut s = open_search(Strategy::BreadthFirst);
            s.set_observer(&mut rec);
            let report = s.search_path(Point3::ZERO, 1.0).unwrap().run();
            let path = report.path.unwrap();
            assert!(path.waypoints().iter().all(|w| w.marker.is_some()));
            assert_eq!(path.start().unwrap().marker, Some(Marker(1)));
        }
        assert_eq!(rec.finished, vec![Outcome::Found]);
        assert_eq!(rec.expanded[0], Point3::ZERO);
    }

    #[test]
    fn dropped_session_reports_cancel_to_observer() {
        let mut rec = Recorder::default();
        {
            let mut s = open_search(Strategy::DepthFirst);
            s.set_observer(&mut rec);
            let mut session = s.search_path(Point3::ZERO, 1.0).unwrap();
            session.tick();
        }
        assert_eq!(rec.finished, vec![Outcome::Cancelled]);
    }

    #[test]
    fn world_positions_follow_step_and_origin() {
        let mut cfg = SearchConfig::with_strategy(Strategy::BreadthFirst);
        cfg.origin = Vec3::new(0.5, 0.0, 0.5);
        let mut s = PathSearch::new(cfg);
        s.set_oracle(OpenSpace::unbounded());
        s.set_destination(Vec3::new(4.4, 0.0, 0.6));
        let report = s.search_path(Vec3::new(0.5, 0.0, 0.5), 2.0).unwrap().run();
        let path = report.path.unwrap();
        assert_eq!(path.destination().unwrap().position, Point3::new(2, 0, 0));
        assert_eq!(path.destination().unwrap().world, Vec3::new(4.5, 0.0, 0.5));
        assert!((path.cost() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn every_strategy_reaches_the_goal() {
        let mut s = open_search(Strategy::default());
        for strategy in Strategy::ALL {
            s.set_strategy(strategy);
            assert_eq!(s.config().strategy, strategy);
            let report = s.search_path(Point3::ZERO, 1.0).unwrap().run();
            assert_eq!(report.outcome, Outcome::Found, "{strategy}");
            assert_eq!(report.strategy, strategy);
            assert!(report.stats.expanded >= 1);
        }
    }
}
