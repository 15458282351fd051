//! Data-driven battle content and its loaders.
//!
//! Reads the files a battle is assembled from:
//! - Unit catalog (RON)
//! - Battle roster (RON)
//! - Terrain height field (RON, optional)
//! - Grid layout (TOML)
//! - Battle tunables (TOML)
//!
//! All loaders deserialize battle-core types directly through its `serde`
//! feature.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BattleConfigLoader, ContentFactory, GridConfigLoader, LoadResult, RosterLoader, TerrainLoader,
    TerrainSpec, UnitLoader,
};
