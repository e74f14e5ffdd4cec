//! Solving strategies.
//!
//! - ACO (Ant Colony Optimization), stochastic, scales to larger instances
//! - Exact, exhaustive permutation search, optimal but factorial

pub mod aco;
pub mod exact;

pub use aco::{AcoSolution, AcoSolver};
pub use exact::{ExactSolution, ExactSolver};
