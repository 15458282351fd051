//! Unit-level behaviors run by controllers.
//!
//! A controller's chain is built from these: a chooser picks the first
//! behavior of a turn, and every behavior performs one step per tick against
//! a [`UnitContext`] borrowed for that tick only.
mod chooser;
mod movement;

use behavior_chain::{BoxedBehavior, Context, Step};

use crate::config::BattleConfig;
use crate::state::{Grid, Side, Unit};

pub use chooser::{AiChooser, BehaviorChooser, ControllerKind, FnChooser, PlayerChooser, chooser_fn};
pub use movement::Move;

/// Context family for unit behaviors.
#[derive(Clone, Copy, Debug)]
pub struct UnitTurn;

impl Context for UnitTurn {
    type Ref<'a> = UnitContext<'a>;
}

/// Everything a unit behavior may touch during one tick.
#[derive(Debug)]
pub struct UnitContext<'a> {
    pub side: Side,
    pub unit: &'a mut Unit,
    pub grid: &'a mut Grid,
    pub config: &'a BattleConfig,
}

impl<'a> UnitContext<'a> {
    pub fn new(side: Side, unit: &'a mut Unit, grid: &'a mut Grid, config: &'a BattleConfig) -> Self {
        Self {
            side,
            unit,
            grid,
            config,
        }
    }
}

/// Boxed behavior stored in a controller's chain.
pub type UnitBehavior = BoxedBehavior<UnitTurn>;

/// Outcome of one unit behavior step.
pub type UnitStep = Step<UnitTurn>;
