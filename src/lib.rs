//! Song Bingo - unique bingo cards pinned per browser
//!
//! Core modules:
//! - `pool`: Items cards are drawn from (songs or numbers)
//! - `card`: Unique card generation and the session catalog
//! - `selector`: Which card is active (locked or paged) and the URL it lives at
//! - `persistence`: Key-value stores, storage keys and per-card marks
//! - `session`: The context object the UI drives
//! - `share`: Share action with manual-copy fallback
//! - `platform`: Browser bindings
//! - `settings`: Configuration and variant presets

pub mod card;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod pool;
pub mod selector;
pub mod session;
pub mod settings;
pub mod share;

pub use card::{Card, Catalog, GridShape};
pub use error::BingoError;
pub use persistence::{KeyValueStore, MarkSet, MemoryStore};
pub use pool::{Item, ItemPool};
pub use selector::{CardRequest, Navigation, SelectionPolicy};
pub use session::{BingoSession, CellView};
pub use settings::{BingoConfig, Variant};
pub use share::{SharePayload, ShareOutcome};

/// Escape text for insertion into HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Rock" & 'Roll'</b>"#),
            "&lt;b&gt;&quot;Rock&quot; &amp; &#39;Roll&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Hey Jude"), "Hey Jude");
    }
}
