//! Immutable catalog of generated cards

use std::collections::HashSet;
use std::ops::Index;

use super::grid::{Card, GridShape};

/// Cards for one session, indexable `0..len()`
#[derive(Debug, Clone)]
pub struct Catalog {
    shape: GridShape,
    cards: Vec<Card>,
}

impl Catalog {
    pub(crate) fn new(shape: GridShape, cards: Vec<Card>) -> Self {
        Self { shape, cards }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// No two cards share the same flattened arrangement
    pub fn is_unique(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.cards.len());
        self.cards.iter().all(|card| seen.insert(card.flatten()))
    }
}

impl Index<usize> for Catalog {
    type Output = Card;

    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}
