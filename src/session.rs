//! Bingo session
//!
//! Owns everything one page view needs: the catalog, the active index, its
//! marks and the backing store. The presentation layer calls the `on_*`
//! handlers and re-renders from `cells()`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::card::{Card, Catalog, generate_with_budget};
use crate::error::BingoError;
use crate::persistence::{
    KeyValueStore, MarkSet, MarkStore, StorageKeys, read_or_absent, write_or_log,
};
use crate::pool::ItemPool;
use crate::selector::{CardRequest, Navigation, SelectionPolicy, Selector};
use crate::settings::BingoConfig;
use crate::share::{SharePayload, ShareOutcome, ShareTarget, share_with_fallback};

/// One rendered cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub position: usize,
    pub label: String,
    pub marked: bool,
}

pub struct BingoSession<S: KeyValueStore> {
    config: BingoConfig,
    catalog: Catalog,
    selector: Selector,
    mark_store: MarkStore,
    store: S,
    request: CardRequest,
    index: usize,
    marks: MarkSet,
    rng: Pcg32,
}

impl<S: KeyValueStore> BingoSession<S> {
    /// Generate the catalog, resolve the active card and load its marks.
    ///
    /// `seed` drives every random choice made by this session.
    pub fn open(
        config: BingoConfig,
        pool: &ItemPool,
        mut store: S,
        mut request: CardRequest,
        seed: u64,
    ) -> Result<Self, BingoError> {
        config.validate()?;
        let shape = config.shape();
        let keys = StorageKeys::new(
            config.key_prefix.clone(),
            shape,
            config.card_count,
            pool.descriptor(),
        );
        let mut rng = Pcg32::seed_from_u64(seed);

        let catalog = if config.stable_catalog {
            let seed_key = keys.seed_key();
            let stored = read_or_absent(&store, &seed_key)
                .and_then(|raw| raw.trim().parse::<u64>().ok());
            let catalog_seed = stored.unwrap_or_else(|| rng.random());
            let catalog = generate_with_budget(
                pool,
                shape,
                config.card_count,
                config.retry_budget,
                &mut Pcg32::seed_from_u64(catalog_seed),
            )?;
            if stored.is_none() {
                write_or_log(&mut store, &seed_key, &catalog_seed.to_string());
            }
            catalog
        } else {
            generate_with_budget(pool, shape, config.card_count, config.retry_budget, &mut rng)?
        };

        let selector = Selector::new(config.policy, config.card_count, &keys);
        let index = selector.resolve(&mut request, &mut store, &mut rng);
        let mark_store = MarkStore::new(keys, shape);
        let marks = mark_store.load(&store, index);

        log::info!(
            "Session open: {} card {} of {} ({} marked)",
            config.policy.as_str(),
            index,
            config.card_count,
            marks.len()
        );

        Ok(Self {
            config,
            catalog,
            selector,
            mark_store,
            store,
            request,
            index,
            marks,
            rng,
        })
    }

    pub fn config(&self) -> &BingoConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn card(&self) -> &Card {
        &self.catalog[self.index]
    }

    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    /// Outbound request; always names the active card
    pub fn request(&self) -> &CardRequest {
        &self.request
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Heading shown above the board
    pub fn label(&self) -> String {
        match self.selector.policy() {
            SelectionPolicy::Locked => "Your card".to_string(),
            SelectionPolicy::Paged => {
                format!("Card {} of {}", self.index + 1, self.catalog.len())
            }
        }
    }

    pub fn cells(&self) -> Vec<CellView> {
        self.card()
            .cells()
            .enumerate()
            .map(|(position, item)| CellView {
                position,
                label: item.to_string(),
                marked: self.marks.contains(position),
            })
            .collect()
    }

    /// Flip a cell and persist. Returns the new state, or `None` for a
    /// position off the card.
    pub fn on_cell_toggle(&mut self, position: usize) -> Option<bool> {
        if !self.config.shape().contains(position) {
            log::debug!("Ignoring toggle of cell {}", position);
            return None;
        }
        let marked = self.marks.toggle(position);
        self.mark_store.save(&mut self.store, self.index, &self.marks);
        Some(marked)
    }

    /// Clear every mark on the active card
    pub fn on_reset(&mut self) {
        self.marks.clear();
        self.mark_store.clear(&mut self.store, self.index);
        log::info!("Cleared marks on card {}", self.index);
    }

    /// Move to another card (paged only). Returns the active index.
    pub fn on_navigate(&mut self, navigation: Navigation) -> usize {
        let index = self
            .selector
            .navigate(self.index, navigation, &mut self.request, &mut self.rng);
        if index != self.index {
            log::debug!("Card {} -> {}", self.index, index);
            self.index = index;
            self.marks = self.mark_store.load(&self.store, index);
        }
        index
    }

    /// Title and link for the active card, `base_url` being origin + path
    pub fn share_payload(&self, base_url: &str) -> SharePayload {
        SharePayload {
            title: self.config.title.clone(),
            url: self.request.url_for(base_url),
        }
    }

    pub fn on_share<T: ShareTarget + ?Sized>(
        &self,
        target: &mut T,
        base_url: &str,
    ) -> ShareOutcome {
        share_with_fallback(target, &self.share_payload(base_url))
    }
}
