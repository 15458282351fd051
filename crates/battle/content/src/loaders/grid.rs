//! Grid layout loader.

use std::path::Path;

use battle_core::GridConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for grid layout parameters from TOML files.
pub struct GridConfigLoader;

impl GridConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GridConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GridConfig> {
        let config: GridConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse grid config TOML: {}", e))?;

        if config.cell_size == 0 {
            anyhow::bail!("grid cell_size must be greater than zero");
        }

        Ok(config)
    }
}
