use tracing::{debug, trace};

use crate::domain::types::CoordinateSet;

/// Symmetric all-pairs Euclidean distances with a zero diagonal.
/// Built once from a coordinate set and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    pub fn from_coordinates(coordinates: &CoordinateSet) -> Self {
        let points = coordinates.points();
        let n = points.len();
        debug!("Creating distance matrix for {} points", n);

        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                rows[i][j] = d;
                rows[j][i] = d;
            }
        }

        for row in &rows {
            trace!("{:?}", row);
        }

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.rows[from][to]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// True when every pair of points coincides.
    pub fn is_all_zero(&self) -> bool {
        self.rows.iter().flatten().all(|&d| d == 0.0)
    }
}
