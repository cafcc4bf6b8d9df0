//! Platform abstraction layer
//!
//! Browser bindings for:
//! - Storage (LocalStorage)
//! - Page URL (query in, `history.replaceState` out)
//! - Page-supplied song list and config

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebStore;
