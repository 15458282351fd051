//! Interfaces to collaborators that live outside the battle core.
//!
//! The unit catalog, terrain sampling and visual spawning belong to the host.
//! The core only reads the catalog and the terrain, and only notifies the
//! spawner; none of them can mutate battle state.
mod catalog;
mod spawner;
mod terrain;

pub use catalog::{UnitBank, UnitCatalog};
pub use spawner::{NoopSpawner, TracingSpawner, UnitSpawner};
pub use terrain::{FlatTerrain, HeightMap, TerrainSampler};
