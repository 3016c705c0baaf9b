//! Runs the path-search strategies over an ASCII maze, a few ticks per
//! "frame", and prints each result over the map.
//!
//! Run: cargo run --bin maze -- [STRATEGY] [--map FILE | --random SEED] [--budget N] [-v]

use std::collections::HashSet;
use std::process;

use gridwalk_core::{BlockMap, Point3};
use gridwalk_demos::{MAZE, init_logging, random_map, render};
use gridwalk_paths::{Outcome, PathSearch, SearchConfig, Strategy, Tick};

struct Options {
    strategies: Vec<Strategy>,
    map: BlockMap,
    budget: usize,
    verbose: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut strategies = Vec::new();
    let mut map = None;
    let mut budget = 16;
    let mut verbose = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--map" => {
                let file = args.next().ok_or("--map needs a file")?;
                let text = std::fs::read_to_string(&file).map_err(|e| format!("{file}: {e}"))?;
                map = Some(BlockMap::parse(&text).map_err(|e| format!("{file}: {e}"))?);
            }
            "--random" => {
                let seed = args
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or("--random needs a numeric seed")?;
                map = Some(random_map(40, 16, 0.28, seed));
            }
            "--budget" => {
                budget = args
                    .next()
                    .and_then(|s| s.parse().ok())
                    .filter(|&n| n > 0)
                    .ok_or("--budget needs a positive number")?;
            }
            "-v" | "--verbose" => verbose = true,
            name => strategies.push(name.parse::<Strategy>().map_err(|e| e.to_string())?),
        }
    }

    let map = match map {
        Some(m) => m,
        None => BlockMap::parse(MAZE).map_err(|e| e.to_string())?,
    };
    if strategies.is_empty() {
        strategies = Strategy::ALL.to_vec();
    }
    Ok(Options {
        strategies,
        map,
        budget,
        verbose,
    })
}

fn main() {
    let opts = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };
    init_logging(if opts.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    });

    let (Some(start), Some(goal)) = (opts.map.start(), opts.map.goal()) else {
        eprintln!("Error: map needs an S and a G cell");
        process::exit(2);
    };

    for strategy in opts.strategies {
        let mut search = PathSearch::new(SearchConfig::with_strategy(strategy));
        search.set_oracle(opts.map.clone());
        search.set_destination(goal);
        search.on_path_found(move |path| {
            println!("{strategy}: path of {} steps, cost {:.3}", path.steps(), path.cost());
        });

        let mut session = match search.search_path(start, 1.0) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        };

        let mut expanded: HashSet<Point3> = HashSet::new();
        let mut frames = 0;
        while !session.is_finished() {
            frames += 1;
            for tick in session.by_ref().take(opts.budget) {
                if let Tick::Expanded(p) = tick {
                    expanded.insert(p);
                }
            }
        }

        let report = session.report();
        if report.outcome != Outcome::Found {
            println!("{strategy}: no path");
        }
        print!("{}", render(&opts.map, report.path.as_ref(), &expanded));
        println!(
            "{strategy}: {} expanded, {} enqueued, {frames} frames, {:.3} ms\n",
            report.stats.expanded,
            report.stats.enqueued,
            report.stats.elapsed.as_secs_f64() * 1000.0
        );
    }
}
