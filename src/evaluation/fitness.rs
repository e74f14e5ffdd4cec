//! Closed-cycle length evaluation.
//!
//! A [`Cycle`] stores its canonical form: the non-depot nodes in visit order.
//! The depot is implied at both ends, so `[2, 1, 3]` means `0 → 2 → 1 → 3 → 0`.
//! Routes written with explicit depot anchors (`[0, 2, 1, 3, 0]`) are adapted
//! with [`Cycle::from_closed`]; both shapes measure the same cycle.

use std::iter::once;

use itertools::Itertools;

use crate::config::constant::DEPOT;
use crate::distance::matrix::DistanceMatrix;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle<'a> {
    interior: &'a [usize],
}

impl<'a> Cycle<'a> {
    /// Adapt a route listing only the nodes visited between leaving and
    /// re-entering the depot.
    pub fn from_interior(nodes: &'a [usize], node_count: usize) -> Result<Self> {
        check_nodes(nodes, node_count)?;
        Ok(Self { interior: nodes })
    }

    /// Adapt a route that lists the depot explicitly at both ends.
    pub fn from_closed(route: &'a [usize], node_count: usize) -> Result<Self> {
        match route {
            [first, interior @ .., last] if *first == DEPOT && *last == DEPOT => {
                check_nodes(interior, node_count)?;
                Ok(Self { interior })
            }
            _ => Err(Error::invalid_input(format!(
                "closed route must start and end at node {}, got {:?}",
                DEPOT, route
            ))),
        }
    }

    /// Skips validation; callers own the index invariants.
    pub(crate) fn trusted(interior: &'a [usize]) -> Self {
        Self { interior }
    }

    pub fn interior(&self) -> &'a [usize] {
        self.interior
    }

    /// Node sequence including both depot anchors.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + 'a {
        once(DEPOT)
            .chain(self.interior.iter().copied())
            .chain(once(DEPOT))
    }

    /// Consecutive edges of the cycle, the closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.nodes().tuple_windows()
    }

    pub fn length(&self, dm: &DistanceMatrix) -> f64 {
        self.edges().map(|(from, to)| dist_between(from, to, dm)).sum()
    }
}

fn check_nodes(nodes: &[usize], node_count: usize) -> Result<()> {
    for &node in nodes {
        if node >= node_count {
            return Err(Error::invalid_input(format!(
                "node {} is out of range for {} points",
                node, node_count
            )));
        }
        if node == DEPOT {
            return Err(Error::invalid_input(format!(
                "node {} may only appear as the cycle anchor",
                DEPOT
            )));
        }
    }
    Ok(())
}

/// Length of a route given with explicit depot anchors, e.g. `[0, 3, 1, 2, 0]`.
pub fn find_distance_closed(route: &[usize], dm: &DistanceMatrix) -> Result<f64> {
    Ok(Cycle::from_closed(route, dm.len())?.length(dm))
}

/// Length of a route given without the depot, e.g. `[3, 1, 2]`.
pub fn find_distance_interior(nodes: &[usize], dm: &DistanceMatrix) -> Result<f64> {
    Ok(Cycle::from_interior(nodes, dm.len())?.length(dm))
}

pub fn dist_between(from_loc: usize, to_loc: usize, dm: &DistanceMatrix) -> f64 {
    dm.get(from_loc, to_loc)
}
