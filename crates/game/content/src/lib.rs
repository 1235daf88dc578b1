//! Data-driven content and loaders.
//!
//! This crate houses the shipped roster, maps and scenarios, and reads them
//! from RON/TOML files:
//! - Game configuration (TOML)
//! - Actor templates (RON)
//! - Map layouts as glyph rows plus gate links (RON)
//! - Scenarios: actor, ground and gate placement (RON)
//!
//! Content is consumed through the read-only oracles of `vale-core` and never
//! appears in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

/// Directory holding the content shipped with this crate.
pub const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorLoader, ConfigLoader, ContentFactory, GameContent, LoadResult, MapData, MapLoader,
    ScenarioLoader,
};
