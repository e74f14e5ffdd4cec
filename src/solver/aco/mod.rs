pub mod colony;
pub mod pheromone;
pub mod selection;

pub use colony::*;
pub use pheromone::*;
pub use selection::*;
