//! MapConfig: sizing and growth policy of a `ChainedMap`.

use thiserror::Error;

/// Bucket count of a fresh map.
pub const DEFAULT_INITIAL_BUCKETS: usize = 16;

/// Largest `size / bucket_count` tolerated after an `add`.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Multiplier applied to the bucket count on each growth step.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Smallest accepted max load factor. Below this, growth would ask for
/// bucket arrays far larger than the pairs they hold.
pub const MIN_MAX_LOAD_FACTOR: f64 = 0.01;

/// Largest bucket array a map will allocate. Every chain is a `Vec` header,
/// so this is the most headers that fit in `isize::MAX` bytes.
pub const MAX_BUCKETS: usize = isize::MAX as usize / core::mem::size_of::<Vec<()>>();

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial bucket count must be at least 1")]
    ZeroBuckets,
    #[error("initial bucket count must be at most {max}, got {0}", max = MAX_BUCKETS)]
    TooManyBuckets(usize),
    #[error("max load factor must be finite and at least {min}, got {0}", min = MIN_MAX_LOAD_FACTOR)]
    InvalidLoadFactor(f64),
    #[error("growth factor must be at least 2, got {0}")]
    GrowthFactorTooSmall(usize),
}

/// Builder-style configuration. Capacity only ever grows; there is no
/// shrink threshold.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    pub initial_buckets: usize,
    pub max_load_factor: f64,
    pub growth_factor: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_INITIAL_BUCKETS,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_buckets(mut self, buckets: usize) -> Self {
        self.initial_buckets = buckets;
        self
    }

    pub fn with_max_load_factor(mut self, lf: f64) -> Self {
        self.max_load_factor = lf;
        self
    }

    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_buckets == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        if self.initial_buckets > MAX_BUCKETS {
            return Err(ConfigError::TooManyBuckets(self.initial_buckets));
        }
        // NaN fails the comparison as well.
        if !(self.max_load_factor.is_finite() && self.max_load_factor >= MIN_MAX_LOAD_FACTOR) {
            return Err(ConfigError::InvalidLoadFactor(self.max_load_factor));
        }
        if self.growth_factor < 2 {
            return Err(ConfigError::GrowthFactorTooSmall(self.growth_factor));
        }
        Ok(())
    }

    /// Whether `len` pairs over `buckets` chains is above the load bound.
    #[inline]
    pub(crate) fn is_overloaded(&self, len: usize, buckets: usize) -> bool {
        len as f64 > self.max_load_factor * buckets as f64
    }

    /// Smallest bucket count reachable from `buckets` by growth steps that
    /// keeps `len` pairs within the load bound, capped at [`MAX_BUCKETS`].
    pub(crate) fn grown_bucket_count(&self, len: usize, buckets: usize) -> usize {
        let mut n = buckets.clamp(1, MAX_BUCKETS);
        while self.is_overloaded(len, n) && n < MAX_BUCKETS {
            n = n.saturating_mul(self.growth_factor).min(MAX_BUCKETS);
        }
        n
    }
}
