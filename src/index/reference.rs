//! The fixed reference direction every vector is projected onto.

use crate::error::{CosmapError, Result};
use crate::util::simd_wide::dot_product_simd;

/// A unit vector whose components all equal `1/sqrt(dimension)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDirection {
    components: Vec<f32>,
}

impl ReferenceDirection {
    /// Build the reference direction for `dimension`-length vectors.
    pub fn new(dimension: usize) -> Self {
        let component = 1.0 / (dimension as f32).sqrt();
        Self {
            components: vec![component; dimension],
        }
    }

    /// Number of components.
    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.components
    }

    /// Project `vector` onto this direction.
    ///
    /// Fails with [`CosmapError::InvalidArgument`] when the length differs
    /// from [`dimension`](Self::dimension) or the projection is not finite.
    pub fn project(&self, vector: &[f32]) -> Result<f32> {
        let projection = dot_product_simd(&self.components, vector)?;
        if !projection.is_finite() {
            return Err(CosmapError::invalid_argument(format!(
                "Vector projection is not finite: {projection}"
            )));
        }
        Ok(projection)
    }
}
