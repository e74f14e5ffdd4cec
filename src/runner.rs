use std::error::Error;
use std::fs;
use std::time::Instant;

use dotenv::dotenv;
use tracing::{info, span, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{Method, RunConfig};
use crate::report::{
    print_solution, save_best_so_far_csv, save_pheromones_csv, save_route_csv,
    save_summary_json, RunSummary, BEST_SO_FAR_CSV, PHEROMONE_CSV, ROUTE_CSV, SUMMARY_JSON,
};
use crate::setup::init::setup;
use crate::solver::{AcoSolver, ExactSolver};

/// Initialize tracing and environment
fn init_tracing_and_env() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .init();

    dotenv().ok();
    Ok(())
}

pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env()?;

    let config = RunConfig::from_env()?;
    info!(
        "Starting TSP solver with method '{}' and input {:?}",
        config.method.as_str(),
        config.input
    );

    let instance = {
        let span = span!(Level::INFO, "setup");
        let _guard = span.enter();
        setup(&config.input, config.seed)?
    };

    fs::create_dir_all(&config.output_dir)?;
    let out = |name: &str| config.output_dir.join(name);

    let started = Instant::now();
    let summary = match config.method {
        Method::Aco => {
            let span = span!(Level::INFO, "aco", agents = config.aco.agent_count);
            let _guard = span.enter();

            let solution = AcoSolver::new(config.aco).solve_seeded(&instance, config.seed)?;
            let seconds = started.elapsed().as_secs_f64();

            save_pheromones_csv(&solution.pheromones, &out(PHEROMONE_CSV))?;
            save_best_so_far_csv(&solution.best_so_far_updates, &out(BEST_SO_FAR_CSV))?;
            save_route_csv(&solution.tour, &instance.coordinates, &out(ROUTE_CSV))?;

            RunSummary {
                method: config.method,
                node_count: instance.len(),
                length: solution.tour.length,
                route: solution.tour.one_based(),
                seconds,
                seed: Some(config.seed),
                aco: Some(config.aco),
                exact: None,
            }
        }
        Method::Exact => {
            let span = span!(Level::INFO, "exact", prune = config.exact.prune);
            let _guard = span.enter();

            let solution = ExactSolver::new(config.exact).solve(&instance)?;
            let seconds = started.elapsed().as_secs_f64();
            info!(
                "Evaluated {} permutations ({} subtrees pruned)",
                solution.evaluated, solution.pruned
            );

            save_route_csv(&solution.tour, &instance.coordinates, &out(ROUTE_CSV))?;

            RunSummary {
                method: config.method,
                node_count: instance.len(),
                length: solution.tour.length,
                route: solution.tour.one_based(),
                seconds,
                seed: None,
                aco: None,
                exact: Some(config.exact),
            }
        }
    };

    save_summary_json(&summary, &out(SUMMARY_JSON))?;
    print_solution(&summary);

    Ok(())
}
