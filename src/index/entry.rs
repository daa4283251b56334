//! Stored entries and their identity handles.

use std::fmt;

/// Stable identity of a stored entry.
///
/// Ids are never reused within one index, so two entries with equal vectors
/// and values are still told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub(crate) u64);

impl EntryId {
    /// The raw id value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A stored (vector, projection, value) triple.
#[derive(Debug, Clone)]
pub struct MapEntry<T> {
    id: EntryId,
    vector: Vec<f32>,
    projection: f32,
    /// The payload; the only part of an entry that may change after insertion.
    pub value: T,
}

impl<T> MapEntry<T> {
    pub(crate) fn new(id: EntryId, vector: Vec<f32>, projection: f32, value: T) -> Self {
        Self {
            id,
            vector,
            projection,
            value,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// The vector as it was when the entry was inserted.
    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    /// Projection computed at insertion time.
    pub fn projection(&self) -> f32 {
        self.projection
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consume the entry, returning its vector and value.
    pub fn into_parts(self) -> (Vec<f32>, T) {
        (self.vector, self.value)
    }
}
