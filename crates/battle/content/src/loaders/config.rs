//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle tunables from TOML files.
pub struct BattleConfigLoader;

impl BattleConfigLoader {
    /// Load a [`BattleConfig`] from a TOML file.
    ///
    /// Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse battle config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{CellCoord, Side};

    #[test]
    fn partial_file_keeps_defaults() {
        let config = BattleConfigLoader::parse("move_ticks = 5\nfirst_turn = \"Ai\"\n").unwrap();

        assert_eq!(config.move_ticks, 5);
        assert_eq!(config.first_turn, Side::Ai);
        assert_eq!(config.placeholder_destination, CellCoord::new(16, 6));
    }

    #[test]
    fn rejects_unknown_side() {
        assert!(BattleConfigLoader::parse("first_turn = \"Nobody\"").is_err());
    }
}
