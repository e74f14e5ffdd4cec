pub mod permutation;

pub use permutation::*;
