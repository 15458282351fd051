//! One side's roster of controllers and its turn order.
//!
//! An [`ArmyManager`] runs a *round*: every living controller takes exactly
//! one turn, in registration order. Controllers that are dead when their turn
//! comes up are skipped, including ones that died during the round.

use std::fmt;
use std::sync::Arc;

use crate::behavior::{BehaviorChooser, ControllerKind};
use crate::config::BattleConfig;
use crate::controller::Controller;
use crate::env::{UnitCatalog, UnitSpawner};
use crate::error::{BattleErrorKind, ErrorSeverity};
use crate::state::{CellCoord, Grid, GridError, Side, Unit, UnitId, UnitType};

/// Errors from assembling an army.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArmyError {
    #[error("unit type {0} is not in the catalog")]
    UnknownUnitType(UnitType),

    #[error("cannot place unit: {0}")]
    Placement(#[from] GridError),
}

impl BattleErrorKind for ArmyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownUnitType(_) => "ARMY_UNKNOWN_UNIT_TYPE",
            Self::Placement(_) => "ARMY_PLACEMENT",
        }
    }
}

/// Errors from starting or advancing an army's round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("{side} army has no controllers")]
    EmptyArmy { side: Side },

    #[error("{side} army has no living controller")]
    NoAliveController { side: Side },

    #[error("{side} army was updated without an active controller")]
    TurnNotStarted { side: Side },
}

impl TurnError {
    pub fn side(&self) -> Side {
        match self {
            Self::EmptyArmy { side }
            | Self::NoAliveController { side }
            | Self::TurnNotStarted { side } => *side,
        }
    }

    /// Returns `true` if the army simply has nobody left to act.
    pub fn is_defeat(&self) -> bool {
        matches!(self, Self::EmptyArmy { .. } | Self::NoAliveController { .. })
    }
}

impl BattleErrorKind for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyArmy { .. } | Self::NoAliveController { .. } => ErrorSeverity::Terminal,
            Self::TurnNotStarted { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyArmy { .. } => "TURN_EMPTY_ARMY",
            Self::NoAliveController { .. } => "TURN_NO_ALIVE_CONTROLLER",
            Self::TurnNotStarted { .. } => "TURN_NOT_STARTED",
        }
    }
}

/// Result of one [`ArmyManager::update`] tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundStatus {
    /// A controller is still active.
    Ongoing,
    /// Every living controller has had its turn; nothing is active.
    Complete,
}

impl RoundStatus {
    pub fn is_complete(self) -> bool {
        matches!(self, RoundStatus::Complete)
    }
}

pub struct ArmyManager {
    name: String,
    side: Side,
    controllers: Vec<Controller>,
    active: Option<usize>,
    chooser: Arc<dyn BehaviorChooser>,
    turns_completed: u32,
    rounds_completed: u32,
    ticks: u64,
}

impl ArmyManager {
    /// Creates an empty army using the built-in chooser for `side`.
    pub fn new(name: impl Into<String>, side: Side) -> Self {
        let kind = match side {
            Side::Player => ControllerKind::Player,
            Side::Ai => ControllerKind::Ai,
        };
        Self::with_chooser(name, side, Arc::new(kind))
    }

    /// Creates an empty army whose controllers open every turn with `chooser`.
    pub fn with_chooser(
        name: impl Into<String>,
        side: Side,
        chooser: Arc<dyn BehaviorChooser>,
    ) -> Self {
        Self {
            name: name.into(),
            side,
            controllers: Vec::new(),
            active: None,
            chooser,
            turns_completed: 0,
            rounds_completed: 0,
            ticks: 0,
        }
    }

    /// Registers a unit of `unit_type` standing on `spawn`.
    ///
    /// The new unit's id is the number of controllers registered before it. On
    /// error the army and the grid are left untouched.
    pub fn add_unit(
        &mut self,
        catalog: &dyn UnitCatalog,
        grid: &mut Grid,
        unit_type: UnitType,
        spawn: CellCoord,
    ) -> Result<UnitId, ArmyError> {
        let chooser = Arc::clone(&self.chooser);
        self.add_unit_with(catalog, grid, unit_type, spawn, chooser)
    }

    /// Same as [`add_unit`](Self::add_unit), with a chooser for this unit only.
    pub fn add_unit_with(
        &mut self,
        catalog: &dyn UnitCatalog,
        grid: &mut Grid,
        unit_type: UnitType,
        spawn: CellCoord,
        chooser: Arc<dyn BehaviorChooser>,
    ) -> Result<UnitId, ArmyError> {
        let Some(stats) = catalog.fetch_unit_template(unit_type) else {
            tracing::warn!(army = %self.name, %unit_type, "unit type not found in catalog");
            return Err(ArmyError::UnknownUnitType(unit_type));
        };

        let id = UnitId(self.controllers.len() as u32);
        let mut unit = Unit::new(id, stats);
        if let Err(error) = grid.assign(&mut unit, self.side, spawn) {
            tracing::warn!(army = %self.name, %unit_type, %error, "cannot place unit");
            return Err(error.into());
        }

        tracing::debug!(army = %self.name, unit = %id, %unit_type, cell = %spawn, "unit added");
        self.controllers.push(Controller::new(unit, self.side, chooser));
        Ok(id)
    }

    /// Starts a round with the first living controller in registration order.
    pub fn start_turn(&mut self) -> Result<UnitId, TurnError> {
        self.active = None;
        if self.controllers.is_empty() {
            return Err(TurnError::EmptyArmy { side: self.side });
        }

        let first = self
            .next_alive_from(0)
            .ok_or(TurnError::NoAliveController { side: self.side })?;
        self.active = Some(first);
        self.turns_completed = 0;

        let id = self.controllers[first].id();
        tracing::debug!(army = %self.name, unit = %id, "round started");
        Ok(id)
    }

    /// Delivers one tick to the active controller.
    ///
    /// When that controller finishes its turn, the next living controller
    /// after it becomes active; if there is none the round is complete.
    pub fn update(&mut self, grid: &mut Grid, config: &BattleConfig) -> Result<RoundStatus, TurnError> {
        let not_started = TurnError::TurnNotStarted { side: self.side };
        let index = self.active.ok_or(not_started)?;
        let controller = self.controllers.get_mut(index).ok_or(not_started)?;
        self.ticks += 1;

        if controller.is_alive() {
            if !controller.update(grid, config) {
                return Ok(RoundStatus::Ongoing);
            }
            self.turns_completed += 1;
        } else {
            tracing::debug!(army = %self.name, unit = %controller.id(), "active unit died, skipping");
            controller.abandon_turn();
        }

        match self.next_alive_from(index + 1) {
            Some(next) => {
                self.active = Some(next);
                Ok(RoundStatus::Ongoing)
            }
            None => {
                self.active = None;
                self.rounds_completed += 1;
                tracing::debug!(
                    army = %self.name,
                    turns = self.turns_completed,
                    "round complete"
                );
                Ok(RoundStatus::Complete)
            }
        }
    }

    fn next_alive_from(&self, start: usize) -> Option<usize> {
        self.controllers
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, controller)| controller.is_alive())
            .map(|(index, _)| index)
    }

    /// Announces every placed unit to `spawner`.
    pub fn instance_units(&self, grid: &Grid, spawner: &mut dyn UnitSpawner) {
        for controller in &self.controllers {
            let unit = controller.unit();
            let Some(cell) = unit.cell().and_then(|coord| grid.cell(coord)) else {
                continue;
            };
            let label = format!("{}{} {}", self.name, unit.id().0, unit.unit_type());
            spawner.spawn(&label, self.side, unit, cell);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.controllers.iter().filter(|c| c.is_alive()).count()
    }

    pub fn has_alive(&self) -> bool {
        self.controllers.iter().any(Controller::is_alive)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_controller(&self) -> Option<&Controller> {
        self.active.and_then(|index| self.controllers.get(index))
    }

    pub fn controller(&self, id: UnitId) -> Option<&Controller> {
        self.controllers.get(id.index())
    }

    pub fn controller_mut(&mut self, id: UnitId) -> Option<&mut Controller> {
        self.controllers.get_mut(id.index())
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    /// Controller turns finished in the current (or last) round.
    pub fn turns_completed(&self) -> u32 {
        self.turns_completed
    }

    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    /// Ticks delivered through [`update`](Self::update).
    pub fn ticks_received(&self) -> u64 {
        self.ticks
    }
}

impl fmt::Debug for ArmyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArmyManager")
            .field("name", &self.name)
            .field("side", &self.side)
            .field("controllers", &self.controllers)
            .field("active", &self.active)
            .field("chooser", &self.chooser.name())
            .field("turns_completed", &self.turns_completed)
            .field("ticks", &self.ticks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{UnitBehavior, chooser_fn};
    use crate::env::UnitBank;
    use crate::state::StatBlock;
    use behavior_chain::builder;

    fn catalog() -> UnitBank {
        UnitBank::new(vec![StatBlock::new(UnitType::TestUnit)])
    }

    fn grid() -> Grid {
        Grid::open(10, CellCoord::new(0, 0), CellCoord::new(9, 9)).expect("valid")
    }

    /// Army of `n` units whose turns last one tick.
    fn instant_army(grid: &mut Grid, n: u32) -> ArmyManager {
        let chooser = chooser_fn("instant", |_: &Unit, _: &Grid, _: &BattleConfig| -> UnitBehavior {
            builder::wait(1)
        });
        let mut army = ArmyManager::with_chooser("Test: ", Side::Player, Arc::new(chooser));
        for col in 0..n {
            army.add_unit(&catalog(), grid, UnitType::TestUnit, CellCoord::new(0, col))
                .expect("unit added");
        }
        army
    }

    #[test]
    fn ids_follow_registration_order() {
        let mut grid = grid();
        let army = instant_army(&mut grid, 3);

        let ids: Vec<UnitId> = army.controllers().iter().map(Controller::id).collect();
        assert_eq!(ids, vec![UnitId(0), UnitId(1), UnitId(2)]);
    }

    #[test]
    fn unknown_unit_type_leaves_army_untouched() {
        let mut grid = grid();
        let mut army = ArmyManager::new("AI: ", Side::Ai);

        let result = army.add_unit(&catalog(), &mut grid, UnitType::SpaceFighter, CellCoord::new(1, 1));

        assert_eq!(result, Err(ArmyError::UnknownUnitType(UnitType::SpaceFighter)));
        assert!(army.is_empty());
        assert!(grid.is_free(CellCoord::new(1, 1)));
    }

    #[test]
    fn blocked_spawn_leaves_army_untouched() {
        let mut grid = grid();
        let mut army = instant_army(&mut grid, 1);

        let result = army.add_unit(&catalog(), &mut grid, UnitType::TestUnit, CellCoord::new(0, 0));

        assert!(matches!(result, Err(ArmyError::Placement(GridError::CellOccupied { .. }))));
        assert_eq!(army.len(), 1);
    }

    #[test]
    fn three_instant_controllers_complete_in_three_ticks() {
        let mut grid = grid();
        let config = BattleConfig::default();
        let mut army = instant_army(&mut grid, 3);

        assert_eq!(army.start_turn(), Ok(UnitId(0)));
        assert_eq!(army.update(&mut grid, &config), Ok(RoundStatus::Ongoing));
        assert_eq!(army.active_index(), Some(1));
        assert_eq!(army.update(&mut grid, &config), Ok(RoundStatus::Ongoing));
        assert_eq!(army.active_index(), Some(2));
        assert_eq!(army.update(&mut grid, &config), Ok(RoundStatus::Complete));
        assert_eq!(army.active_index(), None);
        assert_eq!(army.turns_completed(), 3);
    }

    #[test]
    fn start_turn_skips_dead_first_controller() {
        let mut grid = grid();
        let mut army = instant_army(&mut grid, 2);
        army.controller_mut(UnitId(0)).expect("exists").unit_mut().kill();

        assert_eq!(army.start_turn(), Ok(UnitId(1)));
    }

    #[test]
    fn start_turn_reports_empty_and_dead_armies() {
        let mut grid = grid();
        let mut empty = ArmyManager::new("AI: ", Side::Ai);
        assert_eq!(empty.start_turn(), Err(TurnError::EmptyArmy { side: Side::Ai }));

        let mut army = instant_army(&mut grid, 2);
        for id in [UnitId(0), UnitId(1)] {
            army.controller_mut(id).expect("exists").unit_mut().kill();
        }
        assert_eq!(
            army.start_turn(),
            Err(TurnError::NoAliveController { side: Side::Player })
        );
        assert_eq!(army.active_index(), None);
    }

    #[test]
    fn update_without_start_is_an_error_not_a_panic() {
        let mut grid = grid();
        let config = BattleConfig::default();
        let mut army = instant_army(&mut grid, 1);

        let err = army.update(&mut grid, &config);
        assert_eq!(err, Err(TurnError::TurnNotStarted { side: Side::Player }));
        assert_eq!(err.map_err(|e| e.severity()), Err(ErrorSeverity::Internal));
    }

    #[test]
    fn controller_killed_mid_round_is_skipped() {
        let mut grid = grid();
        let config = BattleConfig::default();
        let mut army = instant_army(&mut grid, 3);
        army.start_turn().expect("alive army");

        army.update(&mut grid, &config).expect("started");
        army.controller_mut(UnitId(2)).expect("exists").unit_mut().kill();

        assert_eq!(army.update(&mut grid, &config), Ok(RoundStatus::Complete));
        assert_eq!(army.turns_completed(), 2);
    }

    #[test]
    fn dead_active_controller_is_passed_over() {
        let mut grid = grid();
        let config = BattleConfig::default();
        let mut army = instant_army(&mut grid, 3);
        army.start_turn().expect("alive army");
        army.update(&mut grid, &config).expect("started");
        army.controller_mut(UnitId(1)).expect("exists").unit_mut().kill();

        assert_eq!(army.update(&mut grid, &config), Ok(RoundStatus::Ongoing));
        assert_eq!(army.active_index(), Some(2));
        assert_eq!(army.controller(UnitId(1)).map(Controller::steps), Some(0));
    }

    #[test]
    fn instance_units_labels_with_army_name() {
        struct Recorder(Vec<String>);
        impl UnitSpawner for Recorder {
            fn spawn(&mut self, label: &str, _: Side, _: &Unit, _: &crate::state::Cell) {
                self.0.push(label.to_string());
            }
        }

        let mut grid = grid();
        let army = instant_army(&mut grid, 2);
        let mut recorder = Recorder(Vec::new());
        army.instance_units(&grid, &mut recorder);

        assert_eq!(recorder.0, vec!["Test: 0 test_unit", "Test: 1 test_unit"]);
    }
}
