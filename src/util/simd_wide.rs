//! SIMD numeric kernels built on the `wide` crate.

use wide::f32x8;

use crate::error::{CosmapError, Result};

/// Lane width of `f32x8`; shorter inputs take the scalar path.
const LANES: usize = 8;

/// SIMD-accelerated dot product calculation.
///
/// Both slices must have the same length; a mismatch is reported as
/// [`CosmapError::InvalidArgument`] instead of silently truncating, with
/// `a`'s length as the expected one.
pub fn dot_product_simd(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(CosmapError::dimension_mismatch(a.len(), b.len()));
    }

    if a.len() < LANES {
        return Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum());
    }

    let mut dot_vec = f32x8::splat(0.0);

    // Process 8 values at a time
    let chunks_a = a.chunks_exact(LANES);
    let chunks_b = b.chunks_exact(LANES);
    let remainder_a = chunks_a.remainder();
    let remainder_b = chunks_b.remainder();

    for (chunk_a, chunk_b) in chunks_a.zip(chunks_b) {
        let vec_a = f32x8::new(lanes(chunk_a));
        let vec_b = f32x8::new(lanes(chunk_b));
        dot_vec = dot_vec + vec_a * vec_b;
    }

    // Sum all lanes
    let mut total = dot_vec.to_array().iter().sum::<f32>();

    // Add remainder
    total += remainder_a
        .iter()
        .zip(remainder_b.iter())
        .map(|(x, y)| x * y)
        .sum::<f32>();

    Ok(total)
}

#[inline]
fn lanes(chunk: &[f32]) -> [f32; LANES] {
    let mut out = [0.0; LANES];
    out.copy_from_slice(chunk);
    out
}
