//! Storage key derivation

use crate::card::GridShape;
use crate::pool::PoolDescriptor;

/// Builds every key a session reads or writes.
///
/// The lock and seed keys depend only on grid shape and catalog size. Mark keys
/// also carry the pool descriptor, so marks never leak across pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
    shape: GridShape,
    card_count: usize,
    descriptor: PoolDescriptor,
}

impl StorageKeys {
    pub fn new(
        prefix: impl Into<String>,
        shape: GridShape,
        card_count: usize,
        descriptor: PoolDescriptor,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            shape,
            card_count,
            descriptor,
        }
    }

    fn scope(&self) -> String {
        format!("{}-cards{}", self.shape.key_component(), self.card_count)
    }

    /// Pinned card index (locked policy)
    pub fn lock_key(&self) -> String {
        format!("{}-lock-{}", self.prefix, self.scope())
    }

    /// Catalog generation seed
    pub fn seed_key(&self) -> String {
        format!("{}-seed-{}", self.prefix, self.scope())
    }

    pub fn marks_key(&self, index: usize) -> String {
        format!(
            "{}-marks-{}-{}-card{}",
            self.prefix,
            self.shape.key_component(),
            self.descriptor.key_component(),
            index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats() {
        let keys = StorageKeys::new(
            "song-bingo",
            GridShape::new(4, 3),
            30,
            PoolDescriptor::Songs(40),
        );
        assert_eq!(keys.lock_key(), "song-bingo-lock-4x3-cards30");
        assert_eq!(keys.seed_key(), "song-bingo-seed-4x3-cards30");
        assert_eq!(keys.marks_key(7), "song-bingo-marks-4x3-songs40-card7");
    }

    #[test]
    fn test_lock_key_ignores_pool_content() {
        let shape = GridShape::new(5, 5);
        let a = StorageKeys::new("bingo", shape, 50, PoolDescriptor::MaxValue(75));
        let b = StorageKeys::new("bingo", shape, 50, PoolDescriptor::MaxValue(90));
        assert_eq!(a.lock_key(), b.lock_key());
        assert_ne!(a.marks_key(0), b.marks_key(0));
    }
}
