use tracing::trace;

use crate::error::{Error, Result};
use crate::evaluation::fitness::Cycle;

/// Trail strength per edge. Both directions of an edge are always updated
/// together, so the matrix stays symmetric; decay floors at
/// `f64::MIN_POSITIVE`, so every entry stays strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneField {
    trails: Vec<Vec<f64>>,
}

impl PheromoneField {
    /// Every edge starts at `initial_pheromone`.
    pub fn initialize(n: usize, initial_pheromone: f64) -> Self {
        Self {
            trails: vec![vec![initial_pheromone; n]; n],
        }
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.trails[from][to]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.trails
    }

    /// Evaporation: multiply every trail by `decay_factor`.
    pub fn decay(&mut self, decay_factor: f64) {
        for trail in self.trails.iter_mut().flatten() {
            *trail = (*trail * decay_factor).max(f64::MIN_POSITIVE);
        }
        trace!("Pheromones decayed by {}", decay_factor);
    }

    /// Deposit `deposit_scale / length` on both directions of every edge of
    /// `cycle`, the closing edge included. A length that is not finite and
    /// strictly positive, or a cycle visiting nodes outside the field, is
    /// rejected and the field is left untouched.
    pub fn reinforce(&mut self, cycle: &Cycle, length: f64, deposit_scale: f64) -> Result<()> {
        let n = self.trails.len();
        if n == 0 || cycle.interior().iter().any(|&node| node >= n) {
            return Err(Error::invalid_input(format!(
                "cycle {:?} does not fit a field over {} nodes",
                cycle.interior(),
                n
            )));
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(Error::numeric_degeneracy(format!(
                "cannot reinforce a route of length {}",
                length
            )));
        }

        let delta = deposit_scale / length;
        for (from, to) in cycle.edges() {
            self.trails[from][to] += delta;
            self.trails[to][from] += delta;
        }
        Ok(())
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.trails.len();
        (0..n).all(|i| (0..n).all(|j| self.trails[i][j] == self.trails[j][i]))
    }

    pub fn min_trail(&self) -> f64 {
        self.trails
            .iter()
            .flatten()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }
}
