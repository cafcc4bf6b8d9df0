//! Card generation
//!
//! Everything here is pure: randomness comes in through an injected `Rng`,
//! so a seeded generator always reproduces the same catalog.

pub mod catalog;
pub mod generator;
pub mod grid;

pub use catalog::Catalog;
pub use generator::{DEFAULT_RETRY_BUDGET, generate, generate_with_budget, make_card};
pub use grid::{Card, GridShape};
