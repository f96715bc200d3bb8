//! Configuration of a percolation run.
//!
//! The configuration is read from JSON, every field is optional and takes its default
//! value when absent.
//! ```
//! # use newman_ziff::{config::SimulationConfig, percolation::FindStrategy};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SimulationConfig::from_json_str(r#"{ "linear_dimension": 64 }"#)?;
//! assert_eq!(config.linear_dimension(), 64);
//! assert_eq!(config.seed(), 0);
//! assert_eq!(config.find_strategy(), FindStrategy::PathHalving);
//! # Ok(())
//! # }
//! ```

use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LatticeInitializationError, RngSeedError};
use crate::lattice::SquareLattice;
use crate::percolation::FindStrategy;
use crate::rng::AdditiveRng;

/// Environment variable naming the configuration file read by the binary.
pub const CONFIG_ENV_VAR: &str = "NEWMAN_ZIFF_CONFIG";

/// Default linear dimension `L` of the lattice.
pub const DEFAULT_LINEAR_DIMENSION: usize = 128;

/// Parameters of a run on the `L x L` square lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of sites along each side, `L`.
    #[serde(default = "default_linear_dimension")]
    linear_dimension: usize,
    /// Seed of the generator, 0 for a seed taken from the clock.
    #[serde(default)]
    seed: u64,
    /// Path shortening used by the union-find.
    #[serde(default)]
    find_strategy: FindStrategy,
}

const fn default_linear_dimension() -> usize {
    DEFAULT_LINEAR_DIMENSION
}

impl SimulationConfig {
    /// Create a configuration, checking the linear dimension.
    ///
    /// # Errors
    /// Returns [`ConfigError::Lattice`] if `linear_dimension` does not make a valid lattice.
    pub fn new(
        linear_dimension: usize,
        seed: u64,
        find_strategy: FindStrategy,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            linear_dimension,
            seed,
            find_strategy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON string.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed JSON or unknown fields and
    /// [`ConfigError::Lattice`] if the configuration is not valid.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from a reader.
    ///
    /// # Errors
    /// See [`SimulationConfig::from_json_str`], read errors are reported as [`ConfigError::Parse`].
    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration file at `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be opened,
    /// see [`SimulationConfig::from_reader`] for the other errors.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read the file named by the environment variable [`CONFIG_ENV_VAR`],
    /// or the default configuration if the variable is not set.
    ///
    /// # Errors
    /// See [`SimulationConfig::from_path`].
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Check that the configuration describes a valid lattice.
    ///
    /// # Errors
    /// Returns the [`LatticeInitializationError`] of the lattice creation.
    pub fn validate(&self) -> Result<(), LatticeInitializationError> {
        self.lattice().map(|_| ())
    }

    /// The square lattice of the run.
    ///
    /// # Errors
    /// Returns an error if the linear dimension is 0 or too large.
    pub fn lattice(&self) -> Result<SquareLattice, LatticeInitializationError> {
        SquareLattice::new(self.linear_dimension)
    }

    /// Seed the generator of the run, see [`AdditiveRng::new`].
    ///
    /// # Errors
    /// Returns [`RngSeedError::ClockUnavailable`] if the seed is 0 and the clock cannot be read.
    pub fn rng(&self) -> Result<AdditiveRng, RngSeedError> {
        AdditiveRng::new(self.seed)
    }

    getter_copy!(
        const,
        /// Linear dimension `L` of the lattice.
        linear_dimension,
        usize
    );

    getter_copy!(
        const,
        /// Seed of the generator, 0 means a seed taken from the clock.
        seed,
        u64
    );

    getter_copy!(
        const,
        /// Strategy of [`crate::percolation::Forest::find`].
        find_strategy,
        FindStrategy
    );
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            linear_dimension: DEFAULT_LINEAR_DIMENSION,
            seed: 0,
            find_strategy: FindStrategy::default(),
        }
    }
}

impl Display for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L = {}, seed = {}, find = {}",
            self.linear_dimension, self.seed, self.find_strategy
        )
    }
}
