//! Item pool
//!
//! The source collection cards are drawn from: song titles or the numbers `1..=max`.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Number(u32),
    Text(String),
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Number(n) => write!(f, "{}", n),
            Item::Text(s) => f.write_str(s),
        }
    }
}

/// Identifies what a pool was built from, so persisted marks for one pool
/// are never applied to an incompatible one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolDescriptor {
    /// Text pool with this many songs
    Songs(usize),
    /// Number pool `1..=max`
    MaxValue(u32),
}

impl PoolDescriptor {
    pub fn key_component(&self) -> String {
        match self {
            PoolDescriptor::Songs(n) => format!("songs{}", n),
            PoolDescriptor::MaxValue(max) => format!("max{}", max),
        }
    }
}

/// Distinct items available to the generator
#[derive(Debug, Clone)]
pub struct ItemPool {
    items: Vec<Item>,
    descriptor: PoolDescriptor,
}

impl ItemPool {
    /// Build a song pool. Blank labels and repeats are dropped (first one wins).
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut skipped = 0usize;
        let mut items = Vec::new();

        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() || !seen.insert(label.to_string()) {
                skipped += 1;
                continue;
            }
            items.push(Item::Text(label.to_string()));
        }

        if skipped > 0 {
            log::warn!("Skipped {} blank or duplicate pool entries", skipped);
        }

        let descriptor = PoolDescriptor::Songs(items.len());
        Self { items, descriptor }
    }

    /// Build a number pool `1..=max`
    pub fn numbers(max: u32) -> Self {
        Self {
            items: (1..=max).map(Item::Number).collect(),
            descriptor: PoolDescriptor::MaxValue(max),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn descriptor(&self) -> PoolDescriptor {
        self.descriptor
    }
}
