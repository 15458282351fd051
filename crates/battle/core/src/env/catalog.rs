use crate::state::{StatBlock, UnitType};

/// Read-only lookup of unit stats by type.
pub trait UnitCatalog: Send + Sync {
    /// Returns the stat block registered for `unit_type`, if any.
    fn fetch_unit_template(&self, unit_type: UnitType) -> Option<StatBlock>;

    fn contains(&self, unit_type: UnitType) -> bool {
        self.fetch_unit_template(unit_type).is_some()
    }
}

/// In-memory catalog backed by a list of stat blocks.
///
/// Lookup is linear; when a type is listed twice the first entry wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnitBank {
    units: Vec<StatBlock>,
}

impl UnitBank {
    pub fn new(units: Vec<StatBlock>) -> Self {
        Self { units }
    }

    pub fn push(&mut self, stats: StatBlock) {
        self.units.push(stats);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatBlock> {
        self.units.iter()
    }
}

impl From<Vec<StatBlock>> for UnitBank {
    fn from(units: Vec<StatBlock>) -> Self {
        Self::new(units)
    }
}

impl UnitCatalog for UnitBank {
    fn fetch_unit_template(&self, unit_type: UnitType) -> Option<StatBlock> {
        self.units
            .iter()
            .find(|stats| stats.unit_type == unit_type)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConditionProfile;

    #[test]
    fn first_matching_entry_wins() {
        let tough = StatBlock::new(UnitType::TestUnit).with_condition(ConditionProfile {
            max_health: 50.0,
            damage_reduction: 0.0,
        });
        let bank = UnitBank::new(vec![tough, StatBlock::new(UnitType::TestUnit)]);

        let fetched = bank.fetch_unit_template(UnitType::TestUnit);
        assert_eq!(fetched.map(|s| s.condition.max_health), Some(50.0));
        assert!(!bank.contains(UnitType::SpaceFighter));
    }
}
