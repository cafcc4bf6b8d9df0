//! Session selector
//!
//! Decides which catalog index is active:
//! - `Locked`: one random card per storage scope, pinned until `new=1`
//! - `Paged`: taken from `?card=`, then moved with prev/next/random

pub mod request;

pub use request::CardRequest;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageKeys, read_or_absent, write_or_log};

/// How the active card is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    #[default]
    Locked,
    Paged,
}

impl SelectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionPolicy::Locked => "locked",
            SelectionPolicy::Paged => "paged",
        }
    }
}

/// A navigation request from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Prev,
    Random,
    To(usize),
}

impl Navigation {
    /// Index after this move. Out-of-range targets leave `current` unchanged.
    pub fn apply<R: Rng + ?Sized>(self, current: usize, count: usize, rng: &mut R) -> usize {
        if count == 0 {
            return current;
        }
        match self {
            Navigation::Next => (current + 1) % count,
            Navigation::Prev => (current + count - 1) % count,
            Navigation::Random => rng.random_range(0..count),
            Navigation::To(target) if target < count => target,
            Navigation::To(_) => current,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Selector {
    policy: SelectionPolicy,
    count: usize,
    lock_key: String,
}

impl Selector {
    pub fn new(policy: SelectionPolicy, count: usize, keys: &StorageKeys) -> Self {
        Self {
            policy,
            count,
            lock_key: keys.lock_key(),
        }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Pick the active index and rewrite `request` to name it explicitly
    pub fn resolve<S, R>(&self, request: &mut CardRequest, store: &mut S, rng: &mut R) -> usize
    where
        S: KeyValueStore + ?Sized,
        R: Rng + ?Sized,
    {
        let index = match self.policy {
            SelectionPolicy::Paged => request.card_index(self.count).unwrap_or(0),
            SelectionPolicy::Locked => self.resolve_locked(request.force_new(), store, rng),
        };
        request.pin(index);
        index
    }

    fn stored_lock<S: KeyValueStore + ?Sized>(&self, store: &S) -> Option<usize> {
        let raw = read_or_absent(store, &self.lock_key)?;
        let index = raw.trim().parse::<usize>().ok().filter(|&i| i < self.count);
        if index.is_none() {
            log::warn!("Ignoring invalid pinned card '{}'", raw);
        }
        index
    }

    fn resolve_locked<S, R>(&self, force_new: bool, store: &mut S, rng: &mut R) -> usize
    where
        S: KeyValueStore + ?Sized,
        R: Rng + ?Sized,
    {
        if !force_new {
            if let Some(index) = self.stored_lock(store) {
                log::info!("Using pinned card {}", index);
                return index;
            }
        }

        let index = rng.random_range(0..self.count);
        write_or_log(store, &self.lock_key, &index.to_string());
        log::info!(
            "Pinned card {} of {}{}",
            index,
            self.count,
            if force_new { " (forced)" } else { "" }
        );
        index
    }

    /// Move the active card. Locked sessions never move.
    pub fn navigate<R: Rng + ?Sized>(
        &self,
        current: usize,
        navigation: Navigation,
        request: &mut CardRequest,
        rng: &mut R,
    ) -> usize {
        let index = match self.policy {
            SelectionPolicy::Locked => {
                log::debug!("Ignoring {:?} on a locked card", navigation);
                current
            }
            SelectionPolicy::Paged => navigation.apply(current, self.count, rng),
        };
        request.pin(index);
        index
    }
}
