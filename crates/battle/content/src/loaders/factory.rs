//! Content factory for loading a whole battle from a data directory.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, BattleSetup, GridConfig, HeightMap, UnitBank};

use crate::loaders::{
    BattleConfigLoader, GridConfigLoader, LoadResult, RosterLoader, TerrainLoader, UnitLoader,
};

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml    # BattleConfig (optional)
/// ├── grid.toml      # GridConfig (optional)
/// ├── units.ron      # unit catalog
/// ├── roster.ron     # BattleSetup (optional)
/// └── terrain.ron    # optional height field
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle tunables from `config.toml`, or defaults if it is absent.
    pub fn load_battle_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        BattleConfigLoader::load(&path)
    }

    /// Load grid layout from `grid.toml`, or defaults if it is absent.
    pub fn load_grid_config(&self) -> LoadResult<GridConfig> {
        let path = self.data_dir.join("grid.toml");
        if !path.exists() {
            return Ok(GridConfig::default());
        }
        GridConfigLoader::load(&path)
    }

    /// Load the unit catalog from `units.ron`.
    pub fn load_units(&self) -> LoadResult<UnitBank> {
        UnitLoader::load(&self.data_dir.join("units.ron"))
    }

    /// Load both rosters from `roster.ron`, or the default setup if the file
    /// does not exist.
    pub fn load_roster(&self) -> LoadResult<BattleSetup> {
        let path = self.data_dir.join("roster.ron");
        if !path.exists() {
            return Ok(BattleSetup::default());
        }
        RosterLoader::load(&path)
    }

    /// Load the height field from `terrain.ron`, if present.
    pub fn load_terrain(&self) -> LoadResult<Option<HeightMap>> {
        let path = self.data_dir.join("terrain.ron");
        if !path.exists() {
            return Ok(None);
        }
        TerrainLoader::load(&path).map(Some)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
