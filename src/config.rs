use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

pub mod constant {
    pub const AGENT_COUNT: usize = 50;
    pub const ITERATION_COUNT: usize = 100;
    pub const INITIAL_PHEROMONE: f64 = 0.1;
    pub const DEPOSIT_SCALE: f64 = 0.0001;
    pub const DECAY_FACTOR: f64 = 0.9;
    pub const PHEROMONE_WEIGHT: f64 = 1.5;
    pub const DISTANCE_WEIGHT: f64 = 4.0;
    pub const SEED: u64 = 12345;
    pub const INPUT_PATH: &str = "points.txt";
    pub const OUTPUT_DIR: &str = ".";
    /// Index of the depot every cycle starts and ends at.
    pub const DEPOT: usize = 0;
    /// Above this many points exhaustive search stops being practical.
    pub const EXACT_PRACTICAL_LIMIT: usize = 12;
}

/// Parameters of one ant colony run. Never mutated while solving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcoConfig {
    /// Routes constructed per iteration
    pub agent_count: usize,
    /// Number of iterations
    pub iteration_count: usize,
    /// Pheromone level every edge starts with (τ₀)
    pub initial_pheromone: f64,
    /// Deposit numerator, each edge of a route gains `Q / length` (Q)
    pub deposit_scale: f64,
    /// Multiplier applied to every trail after each iteration (ρ)
    pub decay_factor: f64,
    /// Pheromone exponent (α)
    pub pheromone_weight: f64,
    /// Distance exponent (β)
    pub distance_weight: f64,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            agent_count: constant::AGENT_COUNT,
            iteration_count: constant::ITERATION_COUNT,
            initial_pheromone: constant::INITIAL_PHEROMONE,
            deposit_scale: constant::DEPOSIT_SCALE,
            decay_factor: constant::DECAY_FACTOR,
            pheromone_weight: constant::PHEROMONE_WEIGHT,
            distance_weight: constant::DISTANCE_WEIGHT,
        }
    }
}

impl AcoConfig {
    #[must_use]
    pub fn with_agent_count(mut self, agent_count: usize) -> Self {
        self.agent_count = agent_count;
        self
    }

    #[must_use]
    pub fn with_iteration_count(mut self, iteration_count: usize) -> Self {
        self.iteration_count = iteration_count;
        self
    }

    #[must_use]
    pub fn with_initial_pheromone(mut self, initial_pheromone: f64) -> Self {
        self.initial_pheromone = initial_pheromone;
        self
    }

    #[must_use]
    pub fn with_deposit_scale(mut self, deposit_scale: f64) -> Self {
        self.deposit_scale = deposit_scale;
        self
    }

    #[must_use]
    pub fn with_decay_factor(mut self, decay_factor: f64) -> Self {
        self.decay_factor = decay_factor;
        self
    }

    #[must_use]
    pub fn with_pheromone_weight(mut self, pheromone_weight: f64) -> Self {
        self.pheromone_weight = pheromone_weight;
        self
    }

    #[must_use]
    pub fn with_distance_weight(mut self, distance_weight: f64) -> Self {
        self.distance_weight = distance_weight;
        self
    }

    /// Reject configurations the search cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.agent_count == 0 {
            return Err(Error::invalid_configuration("agent_count must be positive"));
        }
        if self.iteration_count == 0 {
            return Err(Error::invalid_configuration(
                "iteration_count must be positive",
            ));
        }
        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return Err(Error::invalid_configuration(format!(
                "initial_pheromone must be finite and positive, got {}",
                self.initial_pheromone
            )));
        }
        if !(self.deposit_scale.is_finite() && self.deposit_scale > 0.0) {
            return Err(Error::invalid_configuration(format!(
                "deposit_scale must be finite and positive, got {}",
                self.deposit_scale
            )));
        }
        if !(self.decay_factor > 0.0 && self.decay_factor < 1.0) {
            return Err(Error::invalid_configuration(format!(
                "decay_factor must lie strictly between 0 and 1, got {}",
                self.decay_factor
            )));
        }
        for (name, weight) in [
            ("pheromone_weight", self.pheromone_weight),
            ("distance_weight", self.distance_weight),
        ] {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(Error::invalid_configuration(format!(
                    "{} must be finite and non-negative, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExactConfig {
    /// Skip a subtree once its prefix is already no shorter than the best cycle.
    pub prune: bool,
}

impl ExactConfig {
    #[must_use]
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Aco,
    Exact,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aco => "aco",
            Self::Exact => "exact",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Aco => "Ant Colony Method",
            Self::Exact => "Brute-Force Method",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "aco" | "ant" | "antcolony" => Ok(Self::Aco),
            "exact" | "brute" | "bruteforce" => Ok(Self::Exact),
            other => Err(Error::invalid_configuration(format!(
                "unknown method '{}', expected 'aco' or 'exact'",
                other
            ))),
        }
    }
}

/// Where the coordinates come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    File(PathBuf),
    Random(usize),
}

/// Everything the binary needs for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub method: Method,
    pub input: InputSource,
    pub seed: u64,
    pub aco: AcoConfig,
    pub exact: ExactConfig,
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            method: Method::Aco,
            input: InputSource::File(PathBuf::from(constant::INPUT_PATH)),
            seed: constant::SEED,
            aco: AcoConfig::default(),
            exact: ExactConfig::default(),
            output_dir: PathBuf::from(constant::OUTPUT_DIR),
        }
    }
}

impl RunConfig {
    /// Build from `TSP_*` environment variables, falling back to the constants.
    /// Call `dotenv().ok()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let method = match env::var("TSP_METHOD") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.method,
        };

        let input = match env_parse::<usize>("TSP_RANDOM_POINTS")? {
            Some(count) => InputSource::Random(count),
            None => env::var("TSP_INPUT")
                .map(|p| InputSource::File(PathBuf::from(p)))
                .unwrap_or(defaults.input),
        };

        let d = defaults.aco;
        let aco = AcoConfig {
            agent_count: env_parse("TSP_AGENTS")?.unwrap_or(d.agent_count),
            iteration_count: env_parse("TSP_ITERATIONS")?.unwrap_or(d.iteration_count),
            initial_pheromone: env_parse("TSP_INITIAL_PHEROMONE")?
                .unwrap_or(d.initial_pheromone),
            deposit_scale: env_parse("TSP_DEPOSIT_SCALE")?.unwrap_or(d.deposit_scale),
            decay_factor: env_parse("TSP_DECAY_FACTOR")?.unwrap_or(d.decay_factor),
            pheromone_weight: env_parse("TSP_ALPHA")?.unwrap_or(d.pheromone_weight),
            distance_weight: env_parse("TSP_BETA")?.unwrap_or(d.distance_weight),
        };

        Ok(Self {
            method,
            input,
            seed: env_parse("TSP_SEED")?.unwrap_or(defaults.seed),
            aco,
            exact: ExactConfig {
                prune: env_parse("TSP_EXACT_PRUNING")?.unwrap_or(defaults.exact.prune),
            },
            output_dir: env::var("TSP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        })
    }
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            Error::invalid_configuration(format!("{} has unparseable value '{}'", key, raw))
        }),
        Err(_) => Ok(None),
    }
}
