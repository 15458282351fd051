//! Unit catalog loader.

use std::path::Path;

use battle_core::{StatBlock, UnitBank};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Unit catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitCatalogFile {
    pub units: Vec<StatBlock>,
}

/// Loader for the unit catalog from RON files.
pub struct UnitLoader;

impl UnitLoader {
    /// Load the catalog from a RON file into a [`UnitBank`].
    pub fn load(path: &Path) -> LoadResult<UnitBank> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<UnitBank> {
        let catalog: UnitCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse unit catalog RON: {}", e))?;

        Ok(UnitBank::new(catalog.units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{AttackKind, MoveKind, UnitCatalog, UnitType};

    #[test]
    fn omitted_profiles_use_defaults() {
        let bank = UnitLoader::parse(
            r#"(
                units: [
                    (unit_type: TestUnit),
                    (
                        unit_type: SpaceFighter,
                        condition: (max_health: 40.0, damage_reduction: 2.0),
                        movement: (kind: Air, speed: 3.0, range: 6.0, cost: 1.0),
                        attack: (kind: Ranged, range: 4.0, damage: 8.0, cost: 2.0),
                    ),
                ],
            )"#,
        )
        .unwrap();

        let basic = bank.fetch_unit_template(UnitType::TestUnit).unwrap();
        assert_eq!(basic.condition.max_health, 1.0);
        assert_eq!(basic.attack.kind, AttackKind::Melee);

        let fighter = bank.fetch_unit_template(UnitType::SpaceFighter).unwrap();
        assert_eq!(fighter.movement.kind, MoveKind::Air);
        assert_eq!(fighter.attack.damage, 8.0);
    }

    #[test]
    fn unknown_unit_type_is_a_parse_error() {
        assert!(UnitLoader::parse("(units: [(unit_type: Dragon)])").is_err());
    }
}
