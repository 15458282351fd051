//! Behavior choosers: the factories that open a controller's turn.

use std::fmt;

use behavior_chain::{Behavior, Step};

use crate::config::BattleConfig;
use crate::state::{Grid, Unit};

use super::{Move, UnitBehavior, UnitContext, UnitStep, UnitTurn};

/// Produces the first behavior of a fresh turn for a unit.
///
/// Controllers call this whenever their chain is idle. Injected at army
/// assembly, so hosts can swap in their own decision logic.
pub trait BehaviorChooser: Send + Sync {
    fn choose(&self, unit: &Unit, grid: &Grid, config: &BattleConfig) -> UnitBehavior;

    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Decision step for computer-controlled units.
///
/// Hands off to a [`Move`] toward the configured destination without ending
/// the turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct AiChooser;

impl Behavior<UnitTurn> for AiChooser {
    fn perform(&mut self, ctx: &mut UnitContext<'_>) -> UnitStep {
        let destination = ctx.config.placeholder_destination;
        tracing::trace!(unit = %ctx.unit.id(), to = %destination, "ai chose move");
        Step::transition(Box::new(Move::from_config(destination, ctx.config)))
    }

    fn name(&self) -> &'static str {
        "AiChooser"
    }
}

/// Decision step for player-controlled units.
///
/// There is no input layer in the core; it picks the same move the AI does.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerChooser;

impl Behavior<UnitTurn> for PlayerChooser {
    fn perform(&mut self, ctx: &mut UnitContext<'_>) -> UnitStep {
        let destination = ctx.config.placeholder_destination;
        tracing::trace!(unit = %ctx.unit.id(), to = %destination, "player chose move");
        Step::transition(Box::new(Move::from_config(destination, ctx.config)))
    }

    fn name(&self) -> &'static str {
        "PlayerChooser"
    }
}

/// Built-in choosers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ControllerKind {
    Player,
    Ai,
}

impl BehaviorChooser for ControllerKind {
    fn choose(&self, _unit: &Unit, _grid: &Grid, _config: &BattleConfig) -> UnitBehavior {
        match self {
            ControllerKind::Player => Box::new(PlayerChooser),
            ControllerKind::Ai => Box::new(AiChooser),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ControllerKind::Player => "PlayerChooser",
            ControllerKind::Ai => "AiChooser",
        }
    }
}

/// Chooser backed by a closure.
pub struct FnChooser<F> {
    name: &'static str,
    f: F,
}

impl<F> FnChooser<F>
where
    F: Fn(&Unit, &Grid, &BattleConfig) -> UnitBehavior + Send + Sync,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> BehaviorChooser for FnChooser<F>
where
    F: Fn(&Unit, &Grid, &BattleConfig) -> UnitBehavior + Send + Sync,
{
    fn choose(&self, unit: &Unit, grid: &Grid, config: &BattleConfig) -> UnitBehavior {
        (self.f)(unit, grid, config)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl<F> fmt::Debug for FnChooser<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnChooser").field("name", &self.name).finish()
    }
}

/// Wraps a closure as a [`BehaviorChooser`].
pub fn chooser_fn<F>(name: &'static str, f: F) -> FnChooser<F>
where
    F: Fn(&Unit, &Grid, &BattleConfig) -> UnitBehavior + Send + Sync,
{
    FnChooser::new(name, f)
}
