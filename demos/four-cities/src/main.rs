//! Four Cities Example
//!
//! Runs GRASP on four cities at (0,0), (5,1), (2,7) and (3,4), printing the
//! incumbent after every iteration and the best route at the end.

use std::io;
use std::sync::Arc;

use tourforge::prelude::*;
use tourforge::GraspSolverBuilder;

const ITERATIONS: u64 = 5;

fn main() {
    println!("TourForge Four Cities Example");
    println!("=============================\n");

    tourforge::console::init();

    if let Err(err) = solve() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn solve() -> tourforge::Result<()> {
    let cities = CityRegistry::from_points([(0.0, 0.0), (5.0, 1.0), (2.0, 7.0), (3.0, 4.0)]);
    for city in &cities {
        println!("{city}");
    }
    println!();

    let config = GraspConfig::load("tourforge.toml")
        .unwrap_or_else(|_| GraspConfig::new().with_iteration_count_limit(ITERATIONS));

    let mut solver = GraspSolverBuilder::from_config(&config)?
        .with_listener(Arc::new(RouteReportListener::new(io::stdout())))
        .build();
    let result = solver.solve(&cities)?;

    println!("\n{}", format_route(&result, &cities));
    println!(
        "Improvements: {}, 2-opt moves evaluated: {}",
        result.statistics.improvement_count(),
        result.statistics.moves_evaluated
    );
    Ok(())
}
