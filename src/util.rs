//! Shared utility modules used across cosmap components.

pub mod simd_wide;
