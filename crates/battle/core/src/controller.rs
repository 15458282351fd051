//! Per-unit turn driver.
//!
//! A [`Controller`] owns one unit and the behavior chain that drives it. Each
//! call to [`Controller::update`] performs exactly one behavior step and
//! reports whether that step ended the unit's turn.

use std::fmt;
use std::sync::Arc;

use behavior_chain::{Chain, ChainState};

use crate::behavior::{BehaviorChooser, UnitBehavior, UnitContext, UnitTurn};
use crate::config::BattleConfig;
use crate::state::{Grid, Side, Unit, UnitId, UnitRef};

pub struct Controller {
    unit: Unit,
    side: Side,
    chooser: Arc<dyn BehaviorChooser>,
    chain: Chain<UnitTurn>,
}

impl Controller {
    pub fn new(unit: Unit, side: Side, chooser: Arc<dyn BehaviorChooser>) -> Self {
        Self {
            unit,
            side,
            chooser,
            chain: Chain::new(),
        }
    }

    pub fn id(&self) -> UnitId {
        self.unit.id()
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn handle(&self) -> UnitRef {
        UnitRef::new(self.side, self.unit.id())
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn unit_mut(&mut self) -> &mut Unit {
        &mut self.unit
    }

    pub fn is_alive(&self) -> bool {
        self.unit.is_alive()
    }

    pub fn chooser_name(&self) -> &'static str {
        self.chooser.name()
    }

    /// Returns `true` if a behavior is pending from an earlier tick.
    pub fn has_turn_in_progress(&self) -> bool {
        self.chain.is_in_progress()
    }

    pub fn chain_state(&self) -> &ChainState<UnitTurn> {
        self.chain.state()
    }

    /// Total behavior steps this controller has performed.
    pub fn steps(&self) -> u64 {
        self.chain.steps()
    }

    /// Drops any pending behavior; the next update starts a fresh turn.
    pub fn abandon_turn(&mut self) {
        self.chain.reset();
    }

    /// Performs one behavior step using the controller's own chooser.
    ///
    /// Returns `true` when the step ended this unit's turn.
    pub fn update(&mut self, grid: &mut Grid, config: &BattleConfig) -> bool {
        let chooser = Arc::clone(&self.chooser);
        self.update_with(grid, config, |unit, grid, config| {
            chooser.choose(unit, grid, config)
        })
    }

    /// Performs one behavior step, using `factory` if a fresh turn starts.
    pub fn update_with<F>(&mut self, grid: &mut Grid, config: &BattleConfig, factory: F) -> bool
    where
        F: FnOnce(&Unit, &Grid, &BattleConfig) -> UnitBehavior,
    {
        let Self {
            unit, side, chain, ..
        } = self;
        let fresh = chain.is_idle();
        let mut ctx = UnitContext::new(*side, unit, grid, config);

        let finished = chain.advance(&mut ctx, |ctx: &UnitContext<'_>| {
            factory(&*ctx.unit, &*ctx.grid, ctx.config)
        });

        tracing::trace!(
            side = %self.side,
            unit = %self.unit.id(),
            fresh,
            state = self.chain.state().as_str(),
            finished,
            "controller step"
        );
        if finished {
            tracing::debug!(side = %self.side, unit = %self.unit.id(), "unit turn finished");
        }

        finished
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("unit", &self.unit)
            .field("side", &self.side)
            .field("chooser", &self.chooser.name())
            .field("chain", &self.chain)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{ControllerKind, Move, chooser_fn};
    use crate::state::{CellCoord, StatBlock, UnitType};
    use behavior_chain::{Behavior, Step, builder};

    fn grid() -> Grid {
        Grid::open(20, CellCoord::new(0, 0), CellCoord::new(19, 19)).expect("valid")
    }

    fn controller(kind: ControllerKind) -> Controller {
        let unit = Unit::new(UnitId(0), StatBlock::new(UnitType::TestUnit));
        Controller::new(unit, Side::Ai, Arc::new(kind))
    }

    /// Ends its turn by handing off to a wait, which runs on the next turn.
    struct Yield;

    impl Behavior<UnitTurn> for Yield {
        fn perform(&mut self, _ctx: &mut UnitContext<'_>) -> Step<UnitTurn> {
            Step::transition_and_end_turn(builder::wait(1))
        }
    }

    #[test]
    fn default_turn_is_choice_then_three_move_ticks() {
        let mut grid = grid();
        let config = BattleConfig::default();
        let mut ctrl = controller(ControllerKind::Ai);

        let results: Vec<bool> = (0..4).map(|_| ctrl.update(&mut grid, &config)).collect();

        assert_eq!(results, vec![false, false, false, true]);
        assert!(!ctrl.has_turn_in_progress());
        assert_eq!(ctrl.unit().cell(), Some(config.placeholder_destination));
        assert_eq!(ctrl.steps(), 4);
    }

    #[test]
    fn factory_is_only_consulted_when_idle() {
        let mut grid = grid();
        let config = BattleConfig::default();
        let mut ctrl = controller(ControllerKind::Ai);
        let mut calls = 0;

        for _ in 0..4 {
            ctrl.update_with(&mut grid, &config, |_, _, _| {
                calls += 1;
                Box::new(Move::new(CellCoord::new(5, 5), 2))
            });
        }

        // Two moves of two ticks each.
        assert_eq!(calls, 2);
    }

    #[test]
    fn ending_turn_mid_chain_keeps_next_behavior_pending() {
        let mut grid = grid();
        let config = BattleConfig::default();
        let chooser = chooser_fn("yield", |_: &Unit, _: &Grid, _: &BattleConfig| {
            Box::new(Yield) as UnitBehavior
        });
        let unit = Unit::new(UnitId(0), StatBlock::new(UnitType::TestUnit));
        let mut ctrl = Controller::new(unit, Side::Player, Arc::new(chooser));

        assert!(ctrl.update(&mut grid, &config));
        assert!(ctrl.has_turn_in_progress());
        assert!(matches!(ctrl.chain_state(), ChainState::InProgress(b) if b.name() == "Wait"));

        assert!(ctrl.update(&mut grid, &config));
        assert!(!ctrl.has_turn_in_progress());
    }
}
