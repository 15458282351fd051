//! Battle roster loader.

use std::path::Path;

use battle_core::BattleSetup;

use crate::loaders::{LoadResult, read_file};

/// Loader for both armies' rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<BattleSetup> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleSetup> {
        let setup: BattleSetup = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        Ok(setup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::UnitType;

    #[test]
    fn parses_both_armies() {
        let setup = RosterLoader::parse(
            r#"(
                player: (name: "Player: ", units: [TestUnit, SpaceFighter]),
                ai: (name: "AI: ", units: [TestUnit]),
            )"#,
        )
        .unwrap();

        assert_eq!(setup.player.units, vec![UnitType::TestUnit, UnitType::SpaceFighter]);
        assert_eq!(setup.ai.name, "AI: ");
    }
}
