//! Configuration for the projection index.

use serde::{Deserialize, Serialize};

use crate::error::{CosmapError, Result};

/// Dimension used when none is given.
pub const DEFAULT_DIMENSION: usize = 160;

/// Absolute projection difference under which two vectors are the same key.
pub const DEFAULT_TOLERANCE: f32 = 0.1;

/// Binary narrowing stops once the window holds this many entries or fewer.
pub const DEFAULT_LINEAR_SCAN_THRESHOLD: usize = 10;

/// Settings of a [`ProjectionIndex`](crate::index::ProjectionIndex).
///
/// ```
/// use cosmap::index::config::ProjectionIndexConfig;
///
/// let config = ProjectionIndexConfig::from_json(r#"{ "dimension": 4 }"#).unwrap();
/// assert_eq!(config.dimension, 4);
/// assert_eq!(config.tolerance, 0.1);
/// assert_eq!(config.linear_scan_threshold, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionIndexConfig {
    /// Length every stored and queried vector must have.
    pub dimension: usize,

    /// Match threshold on the projection scalar.
    pub tolerance: f32,

    /// Window size at which search switches to a linear scan.
    pub linear_scan_threshold: usize,
}

impl Default for ProjectionIndexConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            tolerance: DEFAULT_TOLERANCE,
            linear_scan_threshold: DEFAULT_LINEAR_SCAN_THRESHOLD,
        }
    }
}

impl ProjectionIndexConfig {
    /// Create a configuration for the given dimension with default tuning.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Default::default()
        }
    }

    /// Set the match tolerance.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the linear scan threshold.
    pub fn with_linear_scan_threshold(mut self, threshold: usize) -> Self {
        self.linear_scan_threshold = threshold;
        self
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(CosmapError::invalid_config("dimension must be positive"));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(CosmapError::invalid_config(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        if self.linear_scan_threshold == 0 {
            return Err(CosmapError::invalid_config(
                "linear_scan_threshold must be at least 1",
            ));
        }
        Ok(())
    }
}
