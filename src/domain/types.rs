use serde::Serialize;

use crate::config::constant::DEPOT;
use crate::distance::matrix::DistanceMatrix;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Ordered, immutable list of points. A point is identified by its index.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSet {
    points: Vec<Point>,
}

impl CoordinateSet {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::invalid_input("coordinate set needs at least one point"));
        }
        if let Some((index, point)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(Error::invalid_input(format!(
                "point {} has non-finite coordinates ({}, {})",
                index, point.x, point.y
            )));
        }
        Ok(Self { points })
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        Self::new(pairs.iter().copied().map(Point::from).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }
}

/// Coordinates plus the distances derived from them, built once per solve.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub coordinates: CoordinateSet,
    pub distance_matrix: DistanceMatrix,
}

impl ProblemInstance {
    pub fn new(coordinates: CoordinateSet) -> Self {
        let distance_matrix = DistanceMatrix::from_coordinates(&coordinates);
        Self {
            coordinates,
            distance_matrix,
        }
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        Ok(Self::new(CoordinateSet::from_pairs(pairs)?))
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// A closed cycle: `route` starts and ends at the depot, `length` includes the closing edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    pub route: Vec<usize>,
    pub length: f64,
}

impl Tour {
    pub fn new(route: Vec<usize>, length: f64) -> Self {
        Self { route, length }
    }

    /// The route without its trailing return to the depot.
    pub fn open(&self) -> &[usize] {
        match self.route.split_last() {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => &self.route,
        }
    }

    /// True if the route is depot-anchored and visits every node of `0..n` exactly once.
    pub fn is_hamiltonian(&self, n: usize) -> bool {
        if self.route.first() != Some(&DEPOT) || self.route.last() != Some(&DEPOT) {
            return false;
        }
        let open = self.open();
        if open.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &node in open {
            if node >= n || seen[node] {
                return false;
            }
            seen[node] = true;
        }
        true
    }

    /// Node labels as printed for people, counting from 1.
    pub fn one_based(&self) -> Vec<usize> {
        self.route.iter().map(|node| node + 1).collect()
    }
}
