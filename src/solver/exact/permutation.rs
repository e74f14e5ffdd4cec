use tracing::{debug, info, warn};

use crate::config::constant::{DEPOT, EXACT_PRACTICAL_LIMIT};
use crate::config::ExactConfig;
use crate::distance::matrix::DistanceMatrix;
use crate::domain::types::{ProblemInstance, Tour};
use crate::evaluation::fitness::{dist_between, Cycle};
use crate::error::Result;

/// Outcome of an exhaustive search.
#[derive(Debug, Clone)]
pub struct ExactSolution {
    pub tour: Tour,
    /// Complete permutations whose cycle length was compared.
    pub evaluated: u64,
    /// Subtrees skipped by prefix pruning.
    pub pruned: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ExactSolver {
    config: ExactConfig,
}

impl ExactSolver {
    pub fn new(config: ExactConfig) -> Self {
        Self { config }
    }

    /// Shortest Hamiltonian cycle through every point, anchored at the depot.
    ///
    /// Enumerates all `(n-1)!` orderings of the non-depot nodes by in-place
    /// swapping. Only a strictly shorter cycle replaces the best, so among
    /// equal cycles the first enumerated wins.
    pub fn solve(&self, instance: &ProblemInstance) -> Result<ExactSolution> {
        let n = instance.len();
        let dm = &instance.distance_matrix;
        info!(
            "Starting exhaustive search over {} nodes (pruning: {})",
            n, self.config.prune
        );
        if n > EXACT_PRACTICAL_LIMIT {
            warn!(
                "Exhaustive search over {} nodes enumerates {}! permutations",
                n,
                n - 1
            );
        }

        match n {
            1 => {
                return Ok(ExactSolution {
                    tour: Tour::new(vec![DEPOT, DEPOT], 0.0),
                    evaluated: 1,
                    pruned: 0,
                })
            }
            2 => {
                let length = 2.0 * dist_between(DEPOT, 1, dm);
                return Ok(ExactSolution {
                    tour: Tour::new(vec![DEPOT, 1, DEPOT], length),
                    evaluated: 1,
                    pruned: 0,
                });
            }
            _ => {}
        }

        let mut nodes: Vec<usize> = (0..n).filter(|&node| node != DEPOT).collect();
        let mut search = Enumeration {
            dm,
            prune: self.config.prune,
            best: nodes.clone(),
            best_length: f64::INFINITY,
            evaluated: 0,
            pruned: 0,
        };
        search.permute(&mut nodes, 0, 0.0);

        debug!(
            "Evaluated {} permutations, pruned {} subtrees",
            search.evaluated, search.pruned
        );

        let mut route = Vec::with_capacity(n + 1);
        route.push(DEPOT);
        route.extend_from_slice(&search.best);
        route.push(DEPOT);

        info!("Exhaustive search finished: best length {:.6}", search.best_length);

        Ok(ExactSolution {
            tour: Tour::new(route, search.best_length),
            evaluated: search.evaluated,
            pruned: search.pruned,
        })
    }
}

/// Recursion state shared by every level of the permutation tree.
struct Enumeration<'a> {
    dm: &'a DistanceMatrix,
    prune: bool,
    best: Vec<usize>,
    best_length: f64,
    evaluated: u64,
    pruned: u64,
}

impl Enumeration<'_> {
    /// Positions `..k` of `arr` are fixed and `prefix_length` covers the walk
    /// from the depot through them. Every swap is undone before returning, so
    /// `arr` is restored for the caller's next branch.
    fn permute(&mut self, arr: &mut [usize], k: usize, prefix_length: f64) {
        if k == arr.len() {
            let length = if self.prune {
                prefix_length + dist_between(arr[k - 1], DEPOT, self.dm)
            } else {
                Cycle::trusted(arr).length(self.dm)
            };
            self.evaluated += 1;
            if length < self.best_length {
                self.best.copy_from_slice(arr);
                self.best_length = length;
            }
            return;
        }

        for i in k..arr.len() {
            arr.swap(k, i);

            let from = if k == 0 { DEPOT } else { arr[k - 1] };
            let extended = prefix_length + dist_between(from, arr[k], self.dm);
            if self.prune && extended >= self.best_length {
                self.pruned += 1;
            } else {
                self.permute(arr, k + 1, extended);
            }

            arr.swap(k, i);
        }
    }
}
