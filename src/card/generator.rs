//! Unique card generator
//!
//! Each candidate is a partial Fisher-Yates draw from the pool followed by a
//! full layout shuffle, then split row-major. Candidates whose flattened
//! arrangement was already produced are rejected.

use std::collections::HashSet;

use rand::Rng;

use super::catalog::Catalog;
use super::grid::{Card, GridShape};
use crate::error::BingoError;
use crate::pool::{Item, ItemPool};

/// Rejected candidates allowed before giving up
pub const DEFAULT_RETRY_BUDGET: usize = 100_000;

/// Draw `k` distinct items uniformly without replacement
fn sample_unique<'a, R: Rng + ?Sized>(items: &'a [Item], k: usize, rng: &mut R) -> Vec<&'a Item> {
    let mut picks: Vec<&Item> = items.iter().collect();
    for i in 0..k {
        let j = i + rng.random_range(0..picks.len() - i);
        picks.swap(i, j);
    }
    picks.truncate(k);
    picks
}

/// Fisher-Yates shuffle in place
fn shuffle<T, R: Rng + ?Sized>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

fn check_pool(pool: &ItemPool, shape: GridShape) -> Result<(), BingoError> {
    shape.validate()?;
    if pool.len() < shape.cells() {
        return Err(BingoError::InsufficientPool {
            needed: shape.cells(),
            available: pool.len(),
        });
    }
    Ok(())
}

/// Requires `pool.len() >= shape.cells()`
fn draw_card<R: Rng + ?Sized>(pool: &ItemPool, shape: GridShape, rng: &mut R) -> Card {
    let mut picks = sample_unique(pool.items(), shape.cells(), rng);
    shuffle(&mut picks, rng);
    Card::from_flat(picks.into_iter().cloned().collect(), shape.cols)
}

/// Build one random card
pub fn make_card<R: Rng + ?Sized>(
    pool: &ItemPool,
    shape: GridShape,
    rng: &mut R,
) -> Result<Card, BingoError> {
    check_pool(pool, shape)?;
    Ok(draw_card(pool, shape, rng))
}

/// Generate `count` pairwise-distinct cards with the default retry budget
pub fn generate<R: Rng + ?Sized>(
    pool: &ItemPool,
    shape: GridShape,
    count: usize,
    rng: &mut R,
) -> Result<Catalog, BingoError> {
    generate_with_budget(pool, shape, count, DEFAULT_RETRY_BUDGET, rng)
}

/// Generate `count` pairwise-distinct cards, failing once more than
/// `retry_budget` duplicate candidates have been rejected
pub fn generate_with_budget<R: Rng + ?Sized>(
    pool: &ItemPool,
    shape: GridShape,
    count: usize,
    retry_budget: usize,
    rng: &mut R,
) -> Result<Catalog, BingoError> {
    check_pool(pool, shape)?;
    if count == 0 {
        return Err(BingoError::InvalidConfig(
            "card count must be at least 1".to_string(),
        ));
    }

    let mut seen: HashSet<Vec<Item>> = HashSet::with_capacity(count);
    let mut cards = Vec::with_capacity(count);
    let mut rejected = 0usize;

    while cards.len() < count {
        let card = draw_card(pool, shape, rng);
        if seen.insert(card.flatten()) {
            cards.push(card);
            continue;
        }

        rejected += 1;
        if rejected > retry_budget {
            log::error!(
                "Gave up after {} duplicate candidates ({} of {} cards)",
                rejected,
                cards.len(),
                count
            );
            return Err(BingoError::GenerationExhausted {
                produced: cards.len(),
                requested: count,
                attempts: rejected,
            });
        }
    }

    if rejected > 0 {
        log::debug!("Rejected {} duplicate cards", rejected);
    }
    log::info!(
        "Generated {} unique {} cards from {} items",
        count,
        shape.key_component(),
        pool.len()
    );

    Ok(Catalog::new(shape, cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn song_pool(n: usize) -> ItemPool {
        ItemPool::from_labels((0..n).map(|i| format!("Song {}", i)))
    }

    fn assert_well_formed(catalog: &Catalog, shape: GridShape, count: usize) {
        assert_eq!(catalog.len(), count);
        assert!(catalog.is_unique());
        for card in catalog.iter() {
            assert_eq!(card.shape(), shape);
            assert!(card.rows().iter().all(|row| row.len() == shape.cols));
            let distinct: HashSet<&Item> = card.cells().collect();
            assert_eq!(distinct.len(), shape.cells());
        }
    }

    #[test]
    fn test_single_card_uses_whole_pool() {
        let pool = song_pool(12);
        let mut rng = Pcg32::seed_from_u64(1);
        let catalog = generate(&pool, GridShape::new(4, 3), 1, &mut rng).unwrap();

        assert_well_formed(&catalog, GridShape::new(4, 3), 1);
        let mut flat = catalog.get(0).unwrap().flatten();
        flat.sort();
        let mut expected = pool.items().to_vec();
        expected.sort();
        assert_eq!(flat, expected);
    }

    #[test]
    fn test_many_permutations_of_exact_pool() {
        let pool = song_pool(12);
        let mut rng = Pcg32::seed_from_u64(7);
        let catalog = generate(&pool, GridShape::new(4, 3), 500, &mut rng).unwrap();

        assert_well_formed(&catalog, GridShape::new(4, 3), 500);
        let mut expected = pool.items().to_vec();
        expected.sort();
        for card in catalog.iter() {
            let mut flat = card.flatten();
            flat.sort();
            assert_eq!(flat, expected);
        }
    }

    #[test]
    fn test_insufficient_pool() {
        let pool = song_pool(11);
        let mut rng = Pcg32::seed_from_u64(1);
        let err = generate(&pool, GridShape::new(4, 3), 30, &mut rng).unwrap_err();
        assert_eq!(
            err,
            BingoError::InsufficientPool {
                needed: 12,
                available: 11
            }
        );
    }

    #[test]
    fn test_single_card_checks_pool() {
        let mut rng = Pcg32::seed_from_u64(1);
        let err = make_card(&ItemPool::numbers(3), GridShape::new(2, 2), &mut rng).unwrap_err();
        assert_eq!(
            err,
            BingoError::InsufficientPool {
                needed: 4,
                available: 3
            }
        );

        let card = make_card(&ItemPool::numbers(4), GridShape::new(2, 2), &mut rng).unwrap();
        assert_eq!(card.shape(), GridShape::new(2, 2));
    }

    #[test]
    fn test_oversized_grid_is_config_error() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(
            generate(&ItemPool::numbers(10), GridShape::new(usize::MAX, 2), 1, &mut rng),
            Err(BingoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_sized_requests_rejected() {
        let pool = song_pool(12);
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(
            generate(&pool, GridShape::new(4, 3), 0, &mut rng),
            Err(BingoError::InvalidConfig(_))
        ));
        assert!(matches!(
            generate(&pool, GridShape::new(0, 3), 5, &mut rng),
            Err(BingoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_degenerate_pool_exhausts_budget() {
        // A 1x1 card over a single item has exactly one arrangement
        let pool = song_pool(1);
        let mut rng = Pcg32::seed_from_u64(3);
        let err = generate_with_budget(&pool, GridShape::new(1, 1), 2, 50, &mut rng).unwrap_err();
        assert_eq!(
            err,
            BingoError::GenerationExhausted {
                produced: 1,
                requested: 2,
                attempts: 51
            }
        );
    }

    #[test]
    fn test_every_arrangement_reachable_within_budget() {
        // 2x1 over two items: exactly two arrangements exist
        let pool = ItemPool::numbers(2);
        let mut rng = Pcg32::seed_from_u64(11);
        let catalog = generate(&pool, GridShape::new(2, 1), 2, &mut rng).unwrap();
        assert_well_formed(&catalog, GridShape::new(2, 1), 2);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let pool = ItemPool::numbers(75);
        let shape = GridShape::new(5, 5);
        let a = generate(&pool, shape, 20, &mut Pcg32::seed_from_u64(99)).unwrap();
        let b = generate(&pool, shape, 20, &mut Pcg32::seed_from_u64(99)).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x, y);
        }
    }

    proptest! {
        #[test]
        fn generated_catalogs_are_unique_and_well_formed(
            seed in any::<u64>(),
            rows in 1usize..5,
            cols in 1usize..5,
            extra in 0usize..10,
            count in 1usize..40,
        ) {
            let shape = GridShape::new(rows, cols);
            // Keep the pool large enough that `count` arrangements always exist
            let pool = ItemPool::numbers((shape.cells() + extra + 40) as u32);
            let mut rng = Pcg32::seed_from_u64(seed);
            let catalog = generate(&pool, shape, count, &mut rng).unwrap();

            prop_assert_eq!(catalog.len(), count);
            prop_assert!(catalog.is_unique());
            for card in catalog.iter() {
                prop_assert_eq!(card.shape(), shape);
                let distinct: HashSet<&Item> = card.cells().collect();
                prop_assert_eq!(distinct.len(), shape.cells());
            }
        }
    }
}
