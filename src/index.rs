//! Approximate-similarity map keyed by a one-dimensional projection.
//!
//! Every vector is projected onto a fixed unit direction whose components are
//! all `1/sqrt(dimension)`. Two vectors are treated as the same key when their
//! projections differ by less than the configured tolerance (`0.1` by
//! default). Entries are kept ordered by projection, so lookups narrow the
//! candidate window with a binary search and finish with a short linear scan.
//!
//! This is a heuristic, single-axis index: very different vectors can share a
//! projection, and the first qualifying entry is returned rather than the
//! closest one.
//!
//! Vectors whose projection is not finite (NaN or infinite components, or
//! overflow) are rejected with `InvalidArgument`, as are vectors of the wrong
//! length.
//!
//! # Examples
//!
//! ```
//! use cosmap::index::ProjectionIndex;
//!
//! # fn main() -> cosmap::error::Result<()> {
//! let mut index = ProjectionIndex::new(4);
//!
//! assert!(!index.push(&[1.0, 0.0, 0.0, 0.0], "a")?);
//! // Same projection (0.5), so the stored value is replaced.
//! assert!(index.push(&[0.0, 1.0, 0.0, 0.0], "b")?);
//! assert_eq!(index.len(), 1);
//!
//! let entry = index.search(&[0.0, 0.0, 1.0, 0.0])?.unwrap();
//! assert_eq!(*entry.value(), "b");
//!
//! let id = entry.id();
//! assert!(index.remove(id));
//! assert!(index.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod entry;
pub mod observer;
pub mod reference;

use std::fmt;

use crate::error::Result;
use crate::index::config::{DEFAULT_DIMENSION, ProjectionIndexConfig};
use crate::index::entry::{EntryId, MapEntry};
use crate::index::observer::OverwriteObserver;
use crate::index::reference::ReferenceDirection;

/// Value of both projection bounds while the index is empty.
const EMPTY_BOUND: f32 = 0.0;

/// A map from vectors to values, matched by projection onto a reference direction.
pub struct ProjectionIndex<T> {
    config: ProjectionIndexConfig,
    reference: ReferenceDirection,
    /// Sorted by projection ascending; equal projections keep insertion order.
    entries: Vec<MapEntry<T>>,
    min_projection: f32,
    max_projection: f32,
    next_id: u64,
    observer: Option<Box<dyn OverwriteObserver<T> + Send>>,
}

impl<T> fmt::Debug for ProjectionIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectionIndex")
            .field("config", &self.config)
            .field("len", &self.entries.len())
            .field("min_projection", &self.min_projection)
            .field("max_projection", &self.max_projection)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl<T> Default for ProjectionIndex<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl<T> ProjectionIndex<T> {
    /// Create an empty index for vectors of length `dimension`.
    pub fn new(dimension: usize) -> Self {
        Self::from_parts(ProjectionIndexConfig::new(dimension))
    }

    /// Create an empty index from a validated configuration.
    pub fn with_config(config: ProjectionIndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: ProjectionIndexConfig) -> Self {
        let reference = ReferenceDirection::new(config.dimension);
        Self {
            config,
            reference,
            entries: Vec::new(),
            min_projection: EMPTY_BOUND,
            max_projection: EMPTY_BOUND,
            next_id: 0,
            observer: None,
        }
    }

    /// Attach an observer that sees every value replaced by [`push`](Self::push).
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: OverwriteObserver<T> + Send + 'static,
    {
        self.set_observer(observer);
        self
    }

    /// Replace the overwrite observer.
    pub fn set_observer<O>(&mut self, observer: O)
    where
        O: OverwriteObserver<T> + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Detach the overwrite observer, if any.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn config(&self) -> &ProjectionIndexConfig {
        &self.config
    }

    /// Length every vector passed to this index must have.
    pub fn dimension(&self) -> usize {
        self.reference.dimension()
    }

    pub fn reference_direction(&self) -> &[f32] {
        self.reference.as_slice()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Smallest stored projection, or `0.0` when empty.
    pub fn min_projection(&self) -> f32 {
        self.min_projection
    }

    /// Largest stored projection, or `0.0` when empty.
    pub fn max_projection(&self) -> f32 {
        self.max_projection
    }

    /// `(min, max)` projection bounds, `None` when the index is empty.
    pub fn bounds(&self) -> Option<(f32, f32)> {
        if self.entries.is_empty() {
            None
        } else {
            Some((self.min_projection, self.max_projection))
        }
    }

    /// Project `vector` onto the reference direction.
    pub fn projection(&self, vector: &[f32]) -> Result<f32> {
        self.reference.project(vector)
    }

    /// Insert `value` under `vector`, or overwrite the value of a matching entry.
    ///
    /// Returns `true` when an existing value was overwritten. The matched
    /// entry keeps its original vector and projection.
    pub fn push(&mut self, vector: &[f32], value: T) -> Result<bool> {
        let projection = self.reference.project(vector)?;

        if self.entries.is_empty() {
            self.min_projection = projection;
            self.max_projection = projection;
            let id = self.insert(vector, projection, value);
            log::trace!("inserted first entry {id} at projection {projection}");
            return Ok(false);
        }

        // Outside the observed range nothing can be within tolerance.
        if projection < self.min_projection || projection > self.max_projection {
            let id = self.insert(vector, projection, value);
            self.widen_bounds(projection);
            log::trace!("inserted entry {id} outside bounds at projection {projection}");
            return Ok(false);
        }

        if let Some(position) = self.find(projection) {
            let entry = &mut self.entries[position];
            if let Some(observer) = self.observer.as_mut() {
                observer.on_overwrite(entry.id(), &entry.value);
            }
            entry.value = value;
            log::trace!(
                "overwrote entry {} (projection {}) for projection {projection}",
                entry.id(),
                entry.projection()
            );
            return Ok(true);
        }

        let id = self.insert(vector, projection, value);
        self.widen_bounds(projection);
        log::trace!("inserted entry {id} into gap at projection {projection}");
        Ok(false)
    }

    /// Find an entry whose projection is within tolerance of `vector`'s.
    ///
    /// While the candidate window holds more than
    /// [`linear_scan_threshold`](ProjectionIndexConfig::linear_scan_threshold)
    /// entries, the midpoint is checked and returned as soon as it qualifies,
    /// even if a closer entry exists. Smaller windows are scanned in
    /// ascending projection order.
    pub fn search(&self, vector: &[f32]) -> Result<Option<&MapEntry<T>>> {
        let projection = self.reference.project(vector)?;
        Ok(self.find(projection).map(|position| &self.entries[position]))
    }

    /// Like [`search`](Self::search), but allows changing the matched value.
    pub fn search_mut(&mut self, vector: &[f32]) -> Result<Option<&mut MapEntry<T>>> {
        let projection = self.reference.project(vector)?;
        match self.find(projection) {
            Some(position) => Ok(Some(&mut self.entries[position])),
            None => Ok(None),
        }
    }

    /// Remove the entry with the given identity.
    ///
    /// Returns `false` if no such entry is stored.
    pub fn remove(&mut self, id: EntryId) -> bool {
        self.take(id).is_some()
    }

    /// Remove the entry with the given identity and hand it back.
    pub fn take(&mut self, id: EntryId) -> Option<MapEntry<T>> {
        if self.entries.is_empty() {
            return None;
        }

        let position = self.position_of(id)?;
        let entry = self.entries.remove(position);
        self.refresh_bounds();
        log::debug!(
            "removed entry {id} at projection {}, {} remaining",
            entry.projection(),
            self.entries.len()
        );
        Some(entry)
    }

    /// Drop every entry and reset the bounds.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.refresh_bounds();
    }

    pub fn get(&self, id: EntryId) -> Option<&MapEntry<T>> {
        self.position_of(id).map(|position| &self.entries[position])
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut MapEntry<T>> {
        let position = self.position_of(id)?;
        Some(&mut self.entries[position])
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.position_of(id).is_some()
    }

    /// Iterate over entries in ascending projection order.
    pub fn iter(&self) -> impl Iterator<Item = &MapEntry<T>> {
        self.entries.iter()
    }

    fn find(&self, projection: f32) -> Option<usize> {
        if self.entries.is_empty()
            || projection < self.min_projection
            || projection > self.max_projection
        {
            return None;
        }

        let tolerance = self.config.tolerance;
        let within = |entry: &MapEntry<T>| (entry.projection() - projection).abs() < tolerance;

        let mut low = 0;
        let mut high = self.entries.len();
        while high - low > self.config.linear_scan_threshold {
            let mid = (low + high) / 2;
            let entry = &self.entries[mid];

            if within(entry) {
                return Some(mid);
            }

            if projection > entry.projection() {
                low = mid;
            } else {
                high = mid;
            }
        }

        (low..high).find(|&position| within(&self.entries[position]))
    }

    fn insert(&mut self, vector: &[f32], projection: f32, value: T) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;

        // After any equal projections, matching a stable re-sort.
        let position = self
            .entries
            .partition_point(|entry| entry.projection().total_cmp(&projection).is_le());
        self.entries.insert(
            position,
            MapEntry::new(id, vector.to_vec(), projection, value),
        );
        id
    }

    fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    fn widen_bounds(&mut self, projection: f32) {
        self.min_projection = self.min_projection.min(projection);
        self.max_projection = self.max_projection.max(projection);
    }

    fn refresh_bounds(&mut self) {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => {
                self.min_projection = first.projection();
                self.max_projection = last.projection();
            }
            _ => {
                self.min_projection = EMPTY_BOUND;
                self.max_projection = EMPTY_BOUND;
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a ProjectionIndex<T> {
    type Item = &'a MapEntry<T>;
    type IntoIter = std::slice::Iter<'a, MapEntry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
