use crate::domain::types::Tour;

/// Running best-so-far bookkeeping for an iterative search.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub best_so_far: Option<Tour>,
    pub best_so_far_iteration: usize,
    pub best_so_far_updates: Vec<(usize, f64)>,
    /// Best length after each completed iteration.
    pub history: Vec<f64>,
    pub routes_built: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            best_so_far: None,
            best_so_far_iteration: 0,
            best_so_far_updates: vec![],
            history: vec![],
            routes_built: 0,
        }
    }

    pub fn best_length(&self) -> f64 {
        self.best_so_far
            .as_ref()
            .map_or(f64::INFINITY, |tour| tour.length)
    }

    /// Record a finished route. Only a strictly shorter route replaces the best,
    /// so ties keep the one found first.
    pub fn consider(&mut self, route: &[usize], length: f64, iteration: usize) -> bool {
        self.routes_built += 1;
        if length < self.best_length() {
            self.best_so_far = Some(Tour::new(route.to_vec(), length));
            self.best_so_far_iteration = iteration;
            self.best_so_far_updates.push((iteration, length));
            true
        } else {
            false
        }
    }

    pub fn close_iteration(&mut self) {
        self.history.push(self.best_length());
    }
}
