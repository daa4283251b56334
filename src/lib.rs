//! # cosmap
//!
//! An associative container mapping embedding vectors to values by
//! approximate similarity.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Projection onto a fixed unit direction as a one-dimensional key
//! - Binary-search-then-scan lookup with an absolute tolerance
//! - Identity handles for removing exactly one stored entry
//! - Optional observer for overwritten values

pub mod error;
pub mod index;
pub mod util;

pub mod prelude {
    pub use crate::error::{CosmapError, Result};
    pub use crate::index::ProjectionIndex;
    pub use crate::index::config::ProjectionIndexConfig;
    pub use crate::index::entry::{EntryId, MapEntry};
    pub use crate::index::observer::{LogOverwrites, OverwriteObserver};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
