//! Bingo configuration
//!
//! Loaded from an optional JSON blob (`window.BINGO_CONFIG` on the web);
//! missing fields fall back to the song-bingo defaults.

use serde::{Deserialize, Serialize};

use crate::card::{DEFAULT_RETRY_BUDGET, GridShape};
use crate::error::BingoError;
use crate::pool::ItemPool;
use crate::selector::SelectionPolicy;

/// Built-in app variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// One random song card per browser
    #[default]
    SongLocked,
    /// Song cards browsable with prev/next
    SongPaged,
    /// Classic number bingo
    Numbers,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::SongLocked => "song-locked",
            Variant::SongPaged => "song-paged",
            Variant::Numbers => "numbers",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "song-locked" | "locked" | "songs" => Some(Variant::SongLocked),
            "song-paged" | "paged" => Some(Variant::SongPaged),
            "numbers" | "number" => Some(Variant::Numbers),
            _ => None,
        }
    }
}

/// Where card items come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PoolSource {
    /// Song titles supplied by the page
    #[default]
    Songs,
    /// The numbers `1..=max`
    Numbers { max: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BingoConfig {
    /// Share title
    pub title: String,
    /// Prefix for every storage key
    pub key_prefix: String,
    pub rows: usize,
    pub cols: usize,
    /// Cards in the catalog
    pub card_count: usize,
    pub policy: SelectionPolicy,
    pub pool: PoolSource,
    /// Persist a catalog seed so a pinned index keeps showing the same card
    pub stable_catalog: bool,
    /// Duplicate candidates tolerated before generation gives up
    pub retry_budget: usize,
}

impl Default for BingoConfig {
    fn default() -> Self {
        Self {
            title: "Song Bingo Card".to_string(),
            key_prefix: "song-bingo".to_string(),
            rows: 4,
            cols: 3,
            card_count: 30,
            policy: SelectionPolicy::Locked,
            pool: PoolSource::Songs,
            stable_catalog: true,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }
}

impl BingoConfig {
    /// Preset for a variant
    pub fn from_variant(variant: Variant) -> Self {
        let base = Self::default();
        match variant {
            Variant::SongLocked => base,
            Variant::SongPaged => Self {
                policy: SelectionPolicy::Paged,
                ..base
            },
            Variant::Numbers => Self {
                title: "Bingo Card".to_string(),
                key_prefix: "number-bingo".to_string(),
                rows: 5,
                cols: 5,
                card_count: 50,
                policy: SelectionPolicy::Paged,
                pool: PoolSource::Numbers { max: 75 },
                ..base
            },
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, BingoError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn shape(&self) -> GridShape {
        GridShape::new(self.rows, self.cols)
    }

    pub fn validate(&self) -> Result<(), BingoError> {
        self.shape().validate()?;
        if self.card_count == 0 {
            return Err(BingoError::InvalidConfig(
                "card_count must be at least 1".to_string(),
            ));
        }
        if self.key_prefix.trim().is_empty() {
            return Err(BingoError::InvalidConfig(
                "key_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the item pool. Song labels are ignored for number pools.
    pub fn build_pool<I, S>(&self, songs: I) -> ItemPool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.pool {
            PoolSource::Songs => ItemPool::from_labels(songs),
            PoolSource::Numbers { max } => ItemPool::numbers(max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::PoolDescriptor;

    #[test]
    fn test_defaults_match_song_bingo() {
        let config = BingoConfig::default();
        assert_eq!(config.shape(), GridShape::new(4, 3));
        assert_eq!(config.card_count, 30);
        assert_eq!(config.policy, SelectionPolicy::Locked);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = BingoConfig::from_json(r#"{"policy":"paged","card_count":12}"#).unwrap();
        assert_eq!(config.policy, SelectionPolicy::Paged);
        assert_eq!(config.card_count, 12);
        assert_eq!(config.rows, 4);
        assert_eq!(config.key_prefix, "song-bingo");
    }

    #[test]
    fn test_number_pool_json() {
        let config =
            BingoConfig::from_json(r#"{"rows":5,"cols":5,"pool":{"numbers":{"max":90}}}"#).unwrap();
        let pool = config.build_pool(Vec::<String>::new());
        assert_eq!(pool.descriptor(), PoolDescriptor::MaxValue(90));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            BingoConfig::from_json("{rows: 4"),
            Err(BingoError::InvalidConfig(_))
        ));
        assert!(matches!(
            BingoConfig::from_json(r#"{"card_count":0}"#),
            Err(BingoError::InvalidConfig(_))
        ));
        assert!(matches!(
            BingoConfig::from_json(r#"{"cols":0}"#),
            Err(BingoError::InvalidConfig(_))
        ));
        assert!(matches!(
            BingoConfig::from_json(r#"{"rows":18446744073709551615,"cols":2}"#),
            Err(BingoError::InvalidConfig(_))
        ));
        assert!(matches!(
            BingoConfig::from_json(r#"{"policy":"Paged"}"#),
            Err(BingoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_variant_presets() {
        assert_eq!(Variant::from_str("PAGED"), Some(Variant::SongPaged));
        assert_eq!(Variant::from_str("bogus"), None);
        assert_eq!(Variant::Numbers.as_str(), "numbers");

        let numbers = BingoConfig::from_variant(Variant::Numbers);
        assert_eq!(numbers.shape().cells(), 25);
        assert_eq!(numbers.pool, PoolSource::Numbers { max: 75 });
        assert_eq!(
            BingoConfig::from_variant(Variant::SongPaged).policy,
            SelectionPolicy::Paged
        );
    }
}
