//! Traveling Salesman solver for 2-D points.
//!
//! Two strategies share one [`ProblemInstance`]: an exhaustive permutation
//! search that is optimal but factorial, and an ant colony search that
//! scales further without an optimality guarantee. Every cycle starts and
//! ends at node 0.

pub mod config;
pub mod distance;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod setup;
pub mod solver;

pub use config::{AcoConfig, ExactConfig, Method, RunConfig};
pub use distance::DistanceMatrix;
pub use domain::{CoordinateSet, Point, ProblemInstance, SearchState, Tour};
pub use error::{Error, Result};
pub use evaluation::{find_distance_closed, find_distance_interior, Cycle};
pub use solver::aco::PheromoneField;
pub use solver::{AcoSolution, AcoSolver, ExactSolution, ExactSolver};
