//! Configuration types for controlling factory behavior.

use crate::error::{FactoryError, FactoryResult};

/// Seed used by [`crate::ObjectFactory::new`] so that runs are
/// reproducible out of the box. Pass your own seed through
/// [`FactoryConfig::with_seed`] to vary it.
pub const DEFAULT_SEED: u64 = 0xfab_0b1ec7;

/// Default maximum resolution depth before a request fails with
/// [`FactoryError::RecursionLimit`].
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Configuration for an [`crate::ObjectFactory`] instance
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryConfig {
    /// Seed for the factory's random source
    pub seed: u64,
    /// Maximum recursive resolution depth
    pub max_depth: usize,
    /// Half-open length range for default-synthesized strings
    pub string_length: (usize, usize),
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_depth: DEFAULT_MAX_DEPTH,
            string_length: (0, 16),
        }
    }
}

impl FactoryConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the maximum resolution depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the half-open length range for default-synthesized strings
    pub fn with_string_length(mut self, min: usize, max: usize) -> Self {
        self.string_length = (min, max);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> FactoryResult<()> {
        if self.max_depth == 0 {
            return Err(FactoryError::config_error(
                "max_depth must be > 0",
                Some("max_depth"),
            ));
        }
        let (min, max) = self.string_length;
        if min >= max {
            return Err(FactoryError::config_error(
                format!("string length range {}..{} is empty", min, max),
                Some("string_length"),
            ));
        }
        Ok(())
    }
}
