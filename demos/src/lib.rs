//! Shared helpers for the gridwalk demos: sample maps, a seeded random map
//! generator, ASCII rendering of search results, and a small stderr logger.

use std::collections::HashSet;

use gridwalk_core::{BlockMap, Bounds3, Point3};
use gridwalk_paths::Path;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A hand-drawn maze with a start and a goal.
pub const MAZE: &str = "\
S....#..........#...
.###.#.########.#.#.
.#...#.#......#...#.
.#.###.#.####.#####.
.#.....#.#..#.......
.#######.#..#######.
.........#.........G";

/// Build a `width`×`height` map with each interior cell blocked with
/// probability `density`. Start and goal sit in opposite corners and are
/// always open.
pub fn random_map(width: i32, height: i32, density: f64, seed: u64) -> BlockMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut map = BlockMap::new(Bounds3::flat(0, 0, width, height, 0));
    let start = Point3::ZERO;
    let goal = Point3::new(width - 1, 0, height - 1);
    for p in Bounds3::flat(0, 0, width, height, 0) {
        if p != start && p != goal && rng.random_bool(density) {
            map.block(p);
        }
    }
    map.with_endpoints(start, goal)
}

/// Draw `map` with `path` overlaid: `#` blocked, `*` path, `S`/`G`
/// endpoints, `,` expanded but off the path.
pub fn render(map: &BlockMap, path: Option<&Path>, expanded: &HashSet<Point3>) -> String {
    let on_path: HashSet<Point3> = path.map(|p| p.positions().collect()).unwrap_or_default();
    let bounds = map.bounds();
    let mut out = String::new();
    for z in bounds.min.z..bounds.max.z {
        for x in bounds.min.x..bounds.max.x {
            let p = Point3::new(x, bounds.min.y, z);
            let c = if Some(p) == map.start() {
                'S'
            } else if Some(p) == map.goal() {
                'G'
            } else if map.is_blocked(p) {
                '#'
            } else if on_path.contains(&p) {
                '*'
            } else if expanded.contains(&p) {
                ','
            } else {
                '.'
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Route `log` records at or above `level` to stderr.
///
/// `log::set_logger` only fails when a logger is already installed. That
/// logger is kept, so calling this again just changes the level.
pub fn init_logging(level: log::LevelFilter) {
    if let Err(err) = log::set_logger(&LOGGER) {
        log::debug!("keeping the installed logger: {err}");
    }
    log::set_max_level(level);
}
