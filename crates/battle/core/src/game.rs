//! Host-owned game state machine.
//!
//! The host keeps one [`GameStateMachine`] and forwards its frame and physics
//! callbacks to it. Menu states ignore ticks; the battle state drives turn
//! arbitration.

use crate::army::{ArmyError, ArmyManager};
use crate::battle::{BattleOutcome, BattleState, BattleStatus};
use crate::config::{BattleConfig, GridConfig};
use crate::env::{TerrainSampler, UnitCatalog, UnitSpawner};
use crate::error::{BattleErrorKind, ErrorSeverity};
use crate::state::{Grid, GridError, Side, UnitType};

/// Unit types one side brings to a battle, in registration order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmyRoster {
    /// Prefix for the army's unit labels.
    pub name: String,
    pub units: Vec<UnitType>,
}

impl ArmyRoster {
    pub fn new(name: impl Into<String>, units: Vec<UnitType>) -> Self {
        Self {
            name: name.into(),
            units,
        }
    }
}

/// Both sides' rosters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSetup {
    pub player: ArmyRoster,
    pub ai: ArmyRoster,
}

impl BattleSetup {
    pub fn roster(&self, side: Side) -> &ArmyRoster {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }
}

impl Default for BattleSetup {
    /// One test unit per side.
    fn default() -> Self {
        Self {
            player: ArmyRoster::new("Player: ", vec![UnitType::TestUnit]),
            ai: ArmyRoster::new("AI: ", vec![UnitType::TestUnit]),
        }
    }
}

/// Errors that prevent a battle from being set up at all.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("cannot build grid: {0}")]
    Grid(#[from] GridError),
}

impl BattleErrorKind for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Grid(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Grid(inner) => inner.error_code(),
        }
    }
}

/// A roster entry that did not make it into its army.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedUnit {
    pub side: Side,
    pub unit_type: UnitType,
    pub reason: ArmyError,
}

/// Summary of a [`GameStateMachine::load_battle`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub player_units: usize,
    pub ai_units: usize,
    pub skipped: Vec<SkippedUnit>,
    /// Set when the battle was decided during setup.
    pub decided: Option<BattleOutcome>,
}

pub enum GameState {
    StartMenu,
    UnitSelection,
    Battle(Box<BattleState>),
}

impl GameState {
    pub fn kind(&self) -> GameStateKind {
        match self {
            GameState::StartMenu => GameStateKind::StartMenu,
            GameState::UnitSelection => GameStateKind::UnitSelection,
            GameState::Battle(_) => GameStateKind::Battle,
        }
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::Battle(battle) => f.debug_tuple("Battle").field(battle).finish(),
            other => f.write_str(other.kind().as_ref()),
        }
    }
}

/// Discriminant of [`GameState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum GameStateKind {
    StartMenu,
    UnitSelection,
    Battle,
}

#[derive(Debug)]
pub struct GameStateMachine {
    state: GameState,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self {
            state: GameState::StartMenu,
        }
    }

    pub fn current(&self) -> GameStateKind {
        self.state.kind()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn battle(&self) -> Option<&BattleState> {
        match &self.state {
            GameState::Battle(battle) => Some(&**battle),
            _ => None,
        }
    }

    pub fn battle_mut(&mut self) -> Option<&mut BattleState> {
        match &mut self.state {
            GameState::Battle(battle) => Some(&mut **battle),
            _ => None,
        }
    }

    pub fn open_unit_selection(&mut self) {
        self.transition(GameState::UnitSelection);
    }

    pub fn return_to_menu(&mut self) {
        self.transition(GameState::StartMenu);
    }

    fn transition(&mut self, next: GameState) {
        tracing::debug!(from = %self.state.kind(), to = %next.kind(), "game state change");
        self.state = next;
    }

    /// Builds the grid and both armies, then enters the battle state.
    ///
    /// Roster entries that cannot be added (unknown type, no free cell) are
    /// skipped and listed in the report. Only a grid that cannot be built is
    /// an error; the current state is kept in that case.
    pub fn load_battle(
        &mut self,
        setup: &BattleSetup,
        grid_config: &GridConfig,
        terrain: &dyn TerrainSampler,
        catalog: &dyn UnitCatalog,
        config: BattleConfig,
        spawner: &mut dyn UnitSpawner,
    ) -> Result<LoadReport, BattleError> {
        let mut grid = Grid::build(grid_config, terrain)?;
        let mut report = LoadReport::default();

        let player = assemble(Side::Player, setup, catalog, &mut grid, &mut report);
        let ai = assemble(Side::Ai, setup, catalog, &mut grid, &mut report);
        report.player_units = player.len();
        report.ai_units = ai.len();

        let battle = BattleState::new(grid, player, ai, config, spawner);
        report.decided = battle.outcome();
        tracing::info!(
            player_units = report.player_units,
            ai_units = report.ai_units,
            skipped = report.skipped.len(),
            "battle loaded"
        );

        self.transition(GameState::Battle(Box::new(battle)));
        Ok(report)
    }

    /// Per-frame tick. Returns the battle status while a battle is loaded.
    pub fn update(&mut self) -> Option<BattleStatus> {
        match &mut self.state {
            GameState::Battle(battle) => Some(battle.update()),
            GameState::StartMenu | GameState::UnitSelection => None,
        }
    }

    /// Physics-rate tick.
    pub fn fixed_update(&mut self) {
        if let GameState::Battle(battle) = &mut self.state {
            battle.fixed_update();
        }
    }
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

fn assemble(
    side: Side,
    setup: &BattleSetup,
    catalog: &dyn UnitCatalog,
    grid: &mut Grid,
    report: &mut LoadReport,
) -> ArmyManager {
    let roster = setup.roster(side);
    let mut army = ArmyManager::new(roster.name.clone(), side);
    let start = grid.start_for(side);

    for &unit_type in &roster.units {
        let added = match grid.nearest_free_cell(start) {
            Some(spawn) => army.add_unit(catalog, grid, unit_type, spawn),
            None => Err(ArmyError::Placement(GridError::NoFreeCell)),
        };
        if let Err(reason) = added {
            tracing::warn!(%side, %unit_type, %reason, "skipping roster entry");
            report.skipped.push(SkippedUnit {
                side,
                unit_type,
                reason,
            });
        }
    }

    army
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FlatTerrain, NoopSpawner, UnitBank};
    use crate::state::{CellCoord, StatBlock};

    fn catalog() -> UnitBank {
        UnitBank::new(vec![StatBlock::new(UnitType::TestUnit)])
    }

    fn terrain() -> FlatTerrain {
        FlatTerrain::new(1000.0, 0.0)
    }

    #[test]
    fn starts_in_menu_and_ignores_ticks() {
        let mut machine = GameStateMachine::new();
        assert_eq!(machine.current(), GameStateKind::StartMenu);
        assert_eq!(machine.update(), None);

        machine.open_unit_selection();
        assert_eq!(machine.current(), GameStateKind::UnitSelection);
        machine.fixed_update();
        assert_eq!(machine.update(), None);
    }

    #[test]
    fn default_setup_places_one_unit_per_side_on_start_cells() {
        let mut machine = GameStateMachine::new();
        let grid_config = GridConfig::new();

        let report = machine
            .load_battle(
                &BattleSetup::default(),
                &grid_config,
                &terrain(),
                &catalog(),
                BattleConfig::default(),
                &mut NoopSpawner,
            )
            .expect("battle loads");

        assert_eq!(report.player_units, 1);
        assert_eq!(report.ai_units, 1);
        assert!(report.skipped.is_empty());
        assert_eq!(report.decided, None);
        assert_eq!(machine.current(), GameStateKind::Battle);

        let battle = machine.battle().expect("in battle");
        let player_unit = battle.army(Side::Player).controllers()[0].unit();
        assert_eq!(player_unit.cell(), Some(grid_config.player_start));
        assert_eq!(machine.update(), Some(BattleStatus::Ongoing));
    }

    #[test]
    fn unknown_types_are_skipped_and_extras_surround_start() {
        let setup = BattleSetup {
            player: ArmyRoster::new(
                "Player: ",
                vec![UnitType::TestUnit, UnitType::SpaceFighter, UnitType::TestUnit],
            ),
            ai: ArmyRoster::new("AI: ", vec![UnitType::TestUnit]),
        };
        let grid_config = GridConfig::new().with_starts(CellCoord::new(5, 5), CellCoord::new(30, 30));
        let mut machine = GameStateMachine::new();

        let report = machine
            .load_battle(
                &setup,
                &grid_config,
                &terrain(),
                &catalog(),
                BattleConfig::default(),
                &mut NoopSpawner,
            )
            .expect("battle loads");

        assert_eq!(report.player_units, 2);
        assert_eq!(
            report.skipped,
            vec![SkippedUnit {
                side: Side::Player,
                unit_type: UnitType::SpaceFighter,
                reason: ArmyError::UnknownUnitType(UnitType::SpaceFighter),
            }]
        );

        let battle = machine.battle().expect("in battle");
        let cells: Vec<_> = battle
            .army(Side::Player)
            .controllers()
            .iter()
            .map(|c| c.unit().cell())
            .collect();
        assert_eq!(cells, vec![Some(CellCoord::new(5, 5)), Some(CellCoord::new(4, 4))]);
    }

    #[test]
    fn unbuildable_grid_keeps_current_state() {
        let mut machine = GameStateMachine::new();
        let result = machine.load_battle(
            &BattleSetup::default(),
            &GridConfig::new(),
            &FlatTerrain::new(100.0, 0.0),
            &catalog(),
            BattleConfig::default(),
            &mut NoopSpawner,
        );

        assert_eq!(result, Err(BattleError::Grid(GridError::NoCells)));
        assert_eq!(machine.current(), GameStateKind::StartMenu);
    }
}
