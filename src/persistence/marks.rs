//! Per-card marked cells

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::keys::StorageKeys;
use super::{KeyValueStore, delete_or_log, read_or_absent, write_or_log};
use crate::card::GridShape;

/// Flattened positions of marked cells on one card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkSet {
    positions: BTreeSet<usize>,
}

impl MarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership; returns true if the cell is now marked
    pub fn toggle(&mut self, position: usize) -> bool {
        if self.positions.remove(&position) {
            false
        } else {
            self.positions.insert(position);
            true
        }
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }

    /// Parse a stored payload. `null` reads as empty; anything malformed or
    /// off the grid is rejected as a whole.
    pub fn from_json(json: &str, shape: GridShape) -> Option<Self> {
        let positions: Option<BTreeSet<usize>> = serde_json::from_str(json).ok()?;
        let marks = Self {
            positions: positions.unwrap_or_default(),
        };
        let on_grid = marks.iter().all(|p| shape.contains(p));
        on_grid.then_some(marks)
    }

    pub fn to_json(&self) -> String {
        // A set of integers always serializes
        serde_json::to_string(&self.positions).unwrap_or_else(|_| "[]".to_string())
    }
}

impl FromIterator<usize> for MarkSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Loads and saves mark sets for the cards of one catalog scope
#[derive(Debug, Clone)]
pub struct MarkStore {
    keys: StorageKeys,
    shape: GridShape,
}

impl MarkStore {
    pub fn new(keys: StorageKeys, shape: GridShape) -> Self {
        Self { keys, shape }
    }

    /// Never fails: missing, unreadable or corrupt data all load as empty
    pub fn load<S: KeyValueStore + ?Sized>(&self, store: &S, index: usize) -> MarkSet {
        let key = self.keys.marks_key(index);
        let Some(json) = read_or_absent(store, &key) else {
            return MarkSet::new();
        };
        MarkSet::from_json(&json, self.shape).unwrap_or_else(|| {
            log::warn!("Discarding corrupt marks under '{}'", key);
            MarkSet::new()
        })
    }

    /// Fire-and-forget; returns whether the write stuck
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S, index: usize, marks: &MarkSet) -> bool {
        write_or_log(store, &self.keys.marks_key(index), &marks.to_json())
    }

    pub fn clear<S: KeyValueStore + ?Sized>(&self, store: &mut S, index: usize) -> bool {
        delete_or_log(store, &self.keys.marks_key(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::pool::PoolDescriptor;

    const SHAPE: GridShape = GridShape::new(4, 3);

    fn mark_store() -> MarkStore {
        let keys = StorageKeys::new("song-bingo", SHAPE, 30, PoolDescriptor::Songs(12));
        MarkStore::new(keys, SHAPE)
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let mut marks: MarkSet = [1, 5].into_iter().collect();
        let before = marks.clone();
        assert!(marks.toggle(3));
        assert!(!marks.toggle(3));
        assert_eq!(marks, before);
        assert!(!marks.toggle(5));
        assert!(marks.toggle(5));
        assert_eq!(marks, before);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let marks_store = mark_store();
        let marks: MarkSet = [0, 11, 4].into_iter().collect();

        assert!(marks_store.save(&mut store, 2, &marks));
        assert_eq!(
            store.get("song-bingo-marks-4x3-songs12-card2").unwrap(),
            Some("[0,4,11]".to_string())
        );
        assert_eq!(marks_store.load(&store, 2), marks);
        assert!(marks_store.load(&store, 3).is_empty());
    }

    #[test]
    fn test_clear_only_touches_one_card() {
        let mut store = MemoryStore::new();
        let marks_store = mark_store();
        let marks: MarkSet = [1].into_iter().collect();
        marks_store.save(&mut store, 0, &marks);
        marks_store.save(&mut store, 1, &marks);

        marks_store.clear(&mut store, 0);
        assert!(marks_store.load(&store, 0).is_empty());
        assert_eq!(marks_store.load(&store, 1), marks);
    }

    #[test]
    fn test_save_after_clear_of_empty_set_loads_empty() {
        let mut store = MemoryStore::new();
        let marks_store = mark_store();
        let mut marks: MarkSet = [2, 3].into_iter().collect();
        marks_store.save(&mut store, 0, &marks);
        marks_store.clear(&mut store, 0);
        marks.clear();
        marks_store.save(&mut store, 0, &marks);
        assert!(marks_store.load(&store, 0).is_empty());
    }

    #[test]
    fn test_corrupt_payloads_load_empty() {
        let mut store = MemoryStore::new();
        let marks_store = mark_store();
        let key = "song-bingo-marks-4x3-songs12-card0";

        for payload in ["{oops", "null", "[\"a\"]", "[-1]", "[12]", "{\"a\":1}"] {
            store.set(key, payload).unwrap();
            assert!(marks_store.load(&store, 0).is_empty(), "payload {}", payload);
        }
    }

    #[test]
    fn test_unreadable_store_loads_empty() {
        let mut store = MemoryStore::new();
        let marks_store = mark_store();
        marks_store.save(&mut store, 0, &[1].into_iter().collect());
        store.set_unreadable(true);
        assert!(marks_store.load(&store, 0).is_empty());
    }

    #[test]
    fn test_failed_save_is_swallowed() {
        let mut store = MemoryStore::with_quota(4);
        let marks_store = mark_store();
        let marks: MarkSet = [1, 2].into_iter().collect();
        assert!(!marks_store.save(&mut store, 0, &marks));
        assert!(marks_store.load(&store, 0).is_empty());
    }
}
