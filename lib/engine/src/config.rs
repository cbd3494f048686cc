use crate::error::ConfigError;
use serde::Deserialize;

/// The number of triples per page if not configured otherwise.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// The number of sub-patterns that are sampled to estimate the size of a binding-restricted
/// fragment if not configured otherwise.
pub const DEFAULT_ESTIMATION_SAMPLE_SIZE: usize = 10;

/// Holds the configuration of a [FragmentEngine](crate::FragmentEngine).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FragmentEngineConfig {
    /// The number of triples in a page of a fragment.
    pub page_size: u64,
    /// How many distinct sub-patterns of a binding-restricted fragment are searched to extrapolate
    /// its total size.
    pub estimation_sample_size: usize,
    /// The number of fragments that are cached. Zero disables caching.
    pub cache_capacity: usize,
}

impl FragmentEngineConfig {
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_estimation_sample_size(mut self, estimation_sample_size: usize) -> Self {
        self.estimation_sample_size = estimation_sample_size;
        self
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Checks whether the configuration can be used by an engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.estimation_sample_size == 0 {
            return Err(ConfigError::ZeroSampleSize);
        }
        Ok(())
    }
}

impl Default for FragmentEngineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            estimation_sample_size: DEFAULT_ESTIMATION_SAMPLE_SIZE,
            cache_capacity: 0,
        }
    }
}
