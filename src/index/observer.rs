//! Hooks fired when `push` overwrites an existing value.

use std::fmt::Debug;

use crate::index::entry::EntryId;

/// Receives the previous value of an entry right before it is overwritten.
pub trait OverwriteObserver<T> {
    fn on_overwrite(&mut self, id: EntryId, previous: &T);
}

impl<T, F> OverwriteObserver<T> for F
where
    F: FnMut(EntryId, &T),
{
    fn on_overwrite(&mut self, id: EntryId, previous: &T) {
        self(id, previous)
    }
}

/// Observer that reports replaced values through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOverwrites;

impl<T: Debug> OverwriteObserver<T> for LogOverwrites {
    fn on_overwrite(&mut self, id: EntryId, previous: &T) {
        log::debug!("overwriting entry {id}, previous value: {previous:?}");
    }
}
