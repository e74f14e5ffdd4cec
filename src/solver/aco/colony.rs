use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, span, trace, Level};

use crate::config::constant::DEPOT;
use crate::config::AcoConfig;
use crate::domain::solution::SearchState;
use crate::domain::types::{ProblemInstance, Tour};
use crate::error::{Error, Result};
use crate::evaluation::fitness::Cycle;
use crate::solver::aco::pheromone::PheromoneField;
use crate::solver::aco::selection::{edge_weight, select_next};

/// Outcome of an ant colony run.
#[derive(Debug, Clone)]
pub struct AcoSolution {
    pub tour: Tour,
    /// Trails as they stood after the final decay.
    pub pheromones: PheromoneField,
    /// Best length after each iteration; non-increasing.
    pub history: Vec<f64>,
    pub best_so_far_updates: Vec<(usize, f64)>,
    pub best_so_far_iteration: usize,
    pub routes_built: usize,
}

#[derive(Debug, Clone, Default)]
pub struct AcoSolver {
    config: AcoConfig,
}

impl AcoSolver {
    pub fn new(config: AcoConfig) -> Self {
        Self { config }
    }

    /// Run the colony with a `ChaCha8Rng` seeded from `seed`.
    pub fn solve_seeded(&self, instance: &ProblemInstance, seed: u64) -> Result<AcoSolution> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.solve(instance, &mut rng)
    }

    /// Each iteration sends `agent_count` ants out one after another. Every
    /// finished route is scored, compared against the best so far, and
    /// deposited immediately, so later ants in the same iteration already
    /// follow the updated trails. Trails decay once per iteration.
    pub fn solve<R: Rng + ?Sized>(
        &self,
        instance: &ProblemInstance,
        rng: &mut R,
    ) -> Result<AcoSolution> {
        let config = &self.config;
        config.validate()?;

        let n = instance.len();
        let dm = &instance.distance_matrix;
        info!(
            "Starting ant colony with {} nodes, {} agents, {} iterations",
            n, config.agent_count, config.iteration_count
        );
        debug!("Parameters: {:?}", config);

        let mut pheromones = PheromoneField::initialize(n, config.initial_pheromone);
        let mut state = SearchState::new();

        if n == 1 {
            info!("Single point, returning trivial cycle");
            return Ok(AcoSolution {
                tour: Tour::new(vec![DEPOT, DEPOT], 0.0),
                pheromones,
                history: vec![0.0],
                best_so_far_updates: vec![(0, 0.0)],
                best_so_far_iteration: 0,
                routes_built: 0,
            });
        }
        if dm.is_all_zero() {
            return Err(Error::numeric_degeneracy(format!(
                "all {} points coincide, every cycle has length zero",
                n
            )));
        }

        for iteration in 1..=config.iteration_count {
            let iter_span = span!(Level::DEBUG, "iteration", iter = iteration);
            let _iter_guard = iter_span.enter();

            for agent in 0..config.agent_count {
                let route = construct_route(instance, &pheromones, config, rng)?;
                let cycle = Cycle::from_closed(&route, n)?;
                let length = cycle.length(dm);
                trace!("Agent {} built route of length {:.6}", agent, length);

                if state.consider(&route, length, iteration) {
                    info!(
                        "New best at iteration {}: length = {:.6}",
                        iteration, length
                    );
                }

                pheromones.reinforce(&cycle, length, config.deposit_scale)?;
            }

            pheromones.decay(config.decay_factor);
            state.close_iteration();
            debug!(
                "Iteration {} done, best length {:.6}",
                iteration,
                state.best_length()
            );
        }

        let tour = state
            .best_so_far
            .ok_or_else(|| Error::numeric_degeneracy("colony finished without a route"))?;

        info!(
            "Ant colony finished: best length {:.6} found at iteration {}",
            tour.length, state.best_so_far_iteration
        );

        Ok(AcoSolution {
            tour,
            pheromones,
            history: state.history,
            best_so_far_updates: state.best_so_far_updates,
            best_so_far_iteration: state.best_so_far_iteration,
            routes_built: state.routes_built,
        })
    }
}

/// Build one ant's closed route `[0, …, 0]`.
///
/// Candidates keep their original relative order as nodes are removed, which
/// fixes the order the roulette wheel walks them in.
pub fn construct_route<R: Rng + ?Sized>(
    instance: &ProblemInstance,
    pheromones: &PheromoneField,
    config: &AcoConfig,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let n = instance.len();
    let dm = &instance.distance_matrix;

    let mut route = Vec::with_capacity(n + 1);
    route.push(DEPOT);

    let mut unvisited: Vec<usize> = (0..n).filter(|&node| node != DEPOT).collect();
    let mut weights: Vec<f64> = Vec::with_capacity(unvisited.len());
    let mut current = DEPOT;

    while !unvisited.is_empty() {
        weights.clear();
        weights.extend(unvisited.iter().map(|&candidate| {
            edge_weight(
                pheromones.get(current, candidate),
                dm.get(current, candidate),
                config.pheromone_weight,
                config.distance_weight,
            )
        }));

        let pick = select_next(&weights, rng)?;
        let next = unvisited.remove(pick);
        route.push(next);
        current = next;
    }

    route.push(DEPOT);
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> ProblemInstance {
        ProblemInstance::from_pairs(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
            .expect("valid points")
    }

    fn small_config() -> AcoConfig {
        AcoConfig::default()
            .with_agent_count(5)
            .with_iteration_count(10)
    }

    #[test]
    fn test_construct_route_is_closed_permutation() {
        let instance = unit_square();
        let pheromones = PheromoneField::initialize(4, 0.1);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let route = construct_route(&instance, &pheromones, &small_config(), &mut rng)
            .expect("route");
        assert_eq!(route.len(), 5);
        assert_eq!(route[0], 0);
        assert_eq!(route[4], 0);
        let mut inner = route[1..4].to_vec();
        inner.sort_unstable();
        assert_eq!(inner, vec![1, 2, 3]);
    }

    #[test]
    fn test_solve_square_finds_perimeter() {
        let solution = AcoSolver::new(small_config())
            .solve_seeded(&unit_square(), 42)
            .expect("should solve");

        assert!((solution.tour.length - 4.0).abs() < 1e-9);
        assert!(solution.tour.is_hamiltonian(4));
        assert_eq!(solution.routes_built, 50);
        assert_eq!(solution.history.len(), 10);
    }

    #[test]
    fn test_history_is_non_increasing() {
        let instance = ProblemInstance::from_pairs(&[
            (0.1, 0.2),
            (0.8, 0.3),
            (0.5, 0.9),
            (0.3, 0.6),
            (0.9, 0.8),
            (0.2, 0.9),
        ])
        .unwrap();
        let solution = AcoSolver::new(small_config())
            .solve_seeded(&instance, 9)
            .unwrap();

        for window in solution.history.windows(2) {
            assert!(window[1] <= window[0]);
        }
        let last = solution.best_so_far_updates.last().unwrap();
        assert_eq!(last.1, solution.tour.length);
        assert_eq!(last.0, solution.best_so_far_iteration);
    }

    #[test]
    fn test_same_seed_same_result() {
        let instance = ProblemInstance::from_pairs(&[
            (0.4, 0.1),
            (0.7, 0.7),
            (0.2, 0.5),
            (0.9, 0.2),
            (0.6, 0.4),
        ])
        .unwrap();
        let solver = AcoSolver::new(small_config());
        let a = solver.solve_seeded(&instance, 2024).unwrap();
        let b = solver.solve_seeded(&instance, 2024).unwrap();

        assert_eq!(a.tour, b.tour);
        assert_eq!(a.pheromones, b.pheromones);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_final_pheromones_positive_and_symmetric() {
        let solution = AcoSolver::new(small_config())
            .solve_seeded(&unit_square(), 5)
            .unwrap();
        assert!(solution.pheromones.is_symmetric());
        assert!(solution.pheromones.min_trail() > 0.0);
    }

    #[test]
    fn test_invalid_config_rejected_before_solving() {
        let solver = AcoSolver::new(AcoConfig::default().with_decay_factor(1.0));
        assert!(matches!(
            solver.solve_seeded(&unit_square(), 1),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_single_point_is_trivial() {
        let instance = ProblemInstance::from_pairs(&[(0.3, 0.3)]).unwrap();
        let solution = AcoSolver::new(small_config())
            .solve_seeded(&instance, 1)
            .unwrap();
        assert_eq!(solution.tour.route, vec![0, 0]);
        assert_eq!(solution.tour.length, 0.0);
    }

    #[test]
    fn test_two_points_round_trip() {
        let instance = ProblemInstance::from_pairs(&[(0.0, 0.0), (3.0, 4.0)]).unwrap();
        let solution = AcoSolver::new(small_config())
            .solve_seeded(&instance, 1)
            .unwrap();
        assert_eq!(solution.tour.route, vec![0, 1, 0]);
        assert!((solution.tour.length - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_points_rejected() {
        let instance = ProblemInstance::from_pairs(&[(0.5, 0.5), (0.5, 0.5), (0.5, 0.5)]).unwrap();
        assert!(matches!(
            AcoSolver::new(small_config()).solve_seeded(&instance, 1),
            Err(Error::NumericDegeneracy(_))
        ));
    }

    #[test]
    fn test_partially_coincident_points_still_solve() {
        let instance =
            ProblemInstance::from_pairs(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 1.0)])
                .unwrap();
        let solution = AcoSolver::new(small_config())
            .solve_seeded(&instance, 11)
            .unwrap();
        assert!(solution.tour.is_hamiltonian(4));
        assert!(solution.tour.length.is_finite());
    }

    #[test]
    fn test_tiny_instance_with_huge_weights_still_solves() {
        // each weight out of the depot is ~1e308; their raw sum overflows
        let d = 4.2e-78;
        let instance = ProblemInstance::from_pairs(&[(0.0, 0.0), (d, 0.0), (0.0, d)]).unwrap();
        let config = AcoConfig::default()
            .with_agent_count(1)
            .with_iteration_count(1);

        let solution = AcoSolver::new(config).solve_seeded(&instance, 5).unwrap();
        assert!(solution.tour.is_hamiltonian(3));
        assert!(solution.tour.length > 0.0 && solution.tour.length.is_finite());
    }
}
