//! Error taxonomy
//!
//! Generation errors are fatal and stop the session from opening.
//! Persistence and share errors are absorbed by their callers and only logged.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BingoError {
    /// Pool has fewer items than a card has cells
    #[error("You need at least {needed} items in the pool (got {available}).")]
    InsufficientPool { needed: usize, available: usize },

    /// Uniqueness retry budget ran out before enough cards existed
    #[error(
        "Could only generate {produced} of {requested} unique cards after {attempts} rejected candidates"
    )]
    GenerationExhausted {
        produced: usize,
        requested: usize,
        attempts: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Could not read '{key}': {reason}")]
    PersistenceRead { key: String, reason: String },

    #[error("Could not write '{key}': {reason}")]
    PersistenceWrite { key: String, reason: String },

    #[error("Share failed: {0}")]
    ShareCapability(String),
}

impl BingoError {
    /// True for errors that must block rendering
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BingoError::InsufficientPool { .. }
                | BingoError::GenerationExhausted { .. }
                | BingoError::InvalidConfig(_)
        )
    }
}

impl From<serde_json::Error> for BingoError {
    fn from(err: serde_json::Error) -> Self {
        BingoError::InvalidConfig(err.to_string())
    }
}
