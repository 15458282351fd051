//! Units and the stat blocks they are built from.

use super::{CellCoord, UnitId, UnitRef};

/// Catalog key for a kind of unit.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitType {
    TestUnit,
    SpaceFighter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackKind {
    #[default]
    Melee,
    Ranged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    #[default]
    Ground,
    Air,
    Water,
}

/// How a unit attacks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attack {
    pub kind: AttackKind,
    pub range: f32,
    pub damage: f32,
    pub cost: f32,
}

impl Default for Attack {
    fn default() -> Self {
        Self {
            kind: AttackKind::Melee,
            range: 1.0,
            damage: 1.0,
            cost: 1.0,
        }
    }
}

/// How a unit moves.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Movement {
    pub kind: MoveKind,
    pub speed: f32,
    pub range: f32,
    pub cost: f32,
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            kind: MoveKind::Ground,
            speed: 1.0,
            range: 1.0,
            cost: 1.0,
        }
    }
}

/// Static durability profile; the runtime half lives in [`Condition`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConditionProfile {
    pub max_health: f32,
    /// Flat amount subtracted from every hit.
    pub damage_reduction: f32,
}

impl Default for ConditionProfile {
    fn default() -> Self {
        Self {
            max_health: 1.0,
            damage_reduction: 1.0,
        }
    }
}

/// Catalog entry describing a unit kind.
///
/// Missing profile fields fall back to the catalog defaults (all 1, melee,
/// ground) when deserialized.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub unit_type: UnitType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: ConditionProfile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub movement: Movement,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: Attack,
}

impl StatBlock {
    /// Creates a stat block with default profiles.
    pub fn new(unit_type: UnitType) -> Self {
        Self {
            unit_type,
            condition: ConditionProfile::default(),
            movement: Movement::default(),
            attack: Attack::default(),
        }
    }

    pub fn with_condition(mut self, condition: ConditionProfile) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_movement(mut self, movement: Movement) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_attack(mut self, attack: Attack) -> Self {
        self.attack = attack;
        self
    }
}

/// Mutable health state of a unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Condition {
    pub health: f32,
    pub alive: bool,
}

impl Condition {
    /// A fresh, living unit at full health.
    pub fn full(profile: &ConditionProfile) -> Self {
        Self {
            health: profile.max_health,
            alive: true,
        }
    }
}

/// A unit on the battlefield.
///
/// Stats are fixed at creation. The occupied cell is only changed through
/// [`Grid::assign`](super::Grid::assign) so that the cell's occupant and the
/// unit's cell always agree.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    id: UnitId,
    stats: StatBlock,
    condition: Condition,
    cell: Option<CellCoord>,
    target: Option<UnitRef>,
}

impl Unit {
    /// Creates a living, unplaced unit from its catalog stats.
    pub fn new(id: UnitId, stats: StatBlock) -> Self {
        Self {
            id,
            condition: Condition::full(&stats.condition),
            stats,
            cell: None,
            target: None,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn unit_type(&self) -> UnitType {
        self.stats.unit_type
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn movement(&self) -> &Movement {
        &self.stats.movement
    }

    pub fn attack(&self) -> &Attack {
        &self.stats.attack
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn health(&self) -> f32 {
        self.condition.health
    }

    pub fn is_alive(&self) -> bool {
        self.condition.alive
    }

    pub fn cell(&self) -> Option<CellCoord> {
        self.cell
    }

    pub fn target(&self) -> Option<UnitRef> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<UnitRef>) {
        self.target = target;
    }

    /// Applies a hit, reduced by the unit's flat damage reduction.
    ///
    /// Returns the health actually removed. Dead units take no damage; a unit
    /// whose health reaches zero is marked dead.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if !self.condition.alive {
            return 0.0;
        }

        let reduced = (amount - self.stats.condition.damage_reduction).max(0.0);
        let dealt = reduced.min(self.condition.health);
        self.condition.health -= dealt;

        if self.condition.health <= 0.0 {
            self.condition.health = 0.0;
            self.condition.alive = false;
        }

        dealt
    }

    /// Marks the unit dead regardless of health.
    pub fn kill(&mut self) {
        self.condition.health = 0.0;
        self.condition.alive = false;
    }

    pub(crate) fn set_cell(&mut self, cell: Option<CellCoord>) {
        self.cell = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sturdy() -> StatBlock {
        StatBlock::new(UnitType::TestUnit).with_condition(ConditionProfile {
            max_health: 10.0,
            damage_reduction: 2.0,
        })
    }

    #[test]
    fn new_unit_starts_alive_at_full_health_and_unplaced() {
        let unit = Unit::new(UnitId(3), sturdy());

        assert!(unit.is_alive());
        assert_eq!(unit.health(), 10.0);
        assert_eq!(unit.cell(), None);
        assert_eq!(unit.target(), None);
        assert_eq!(unit.id(), UnitId(3));
    }

    #[test]
    fn damage_is_reduced_and_kills_at_zero() {
        let mut unit = Unit::new(UnitId(0), sturdy());

        assert_eq!(unit.apply_damage(5.0), 3.0);
        assert_eq!(unit.health(), 7.0);
        assert_eq!(unit.apply_damage(1.0), 0.0, "hit below reduction is absorbed");

        assert_eq!(unit.apply_damage(50.0), 7.0);
        assert!(!unit.is_alive());
        assert_eq!(unit.apply_damage(50.0), 0.0, "dead units take no damage");
    }

    #[test]
    fn kill_marks_unit_dead() {
        let mut unit = Unit::new(UnitId(0), sturdy());
        unit.kill();
        assert!(!unit.is_alive());
        assert_eq!(unit.health(), 0.0);
    }

    #[test]
    fn unit_type_parses_snake_case() {
        assert_eq!("space_fighter".parse::<UnitType>().ok(), Some(UnitType::SpaceFighter));
        assert_eq!(UnitType::TestUnit.to_string(), "test_unit");
    }
}
