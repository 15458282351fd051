//! Turn arbitration and behavior execution for tactical battles.
//!
//! `battle-core` decides, tick by tick, which side acts, which unit within
//! that side acts, and which unit-level behavior runs next. A host calls
//! [`BattleState::update`] (usually through [`GameStateMachine`]) once per
//! frame; the call flows down through [`ArmyManager`] and [`Controller`] to a
//! single behavior step, and completion flows back up.
//!
//! Collaborators that live outside the core (unit catalog, terrain sampling,
//! visual spawning) are consumed through the traits in [`env`].
pub mod army;
pub mod battle;
pub mod behavior;
pub mod config;
pub mod controller;
pub mod env;
pub mod error;
pub mod game;
pub mod state;

pub use army::{ArmyError, ArmyManager, RoundStatus, TurnError};
pub use battle::{BattleOutcome, BattleState, BattleStatus};
pub use behavior::{
    AiChooser, BehaviorChooser, ControllerKind, FnChooser, Move, PlayerChooser, UnitBehavior,
    UnitContext, UnitStep, UnitTurn, chooser_fn,
};
pub use config::{BattleConfig, GridConfig};
pub use controller::Controller;
pub use env::{
    FlatTerrain, HeightMap, NoopSpawner, TerrainSampler, TracingSpawner, UnitBank, UnitCatalog,
    UnitSpawner,
};
pub use error::{BattleErrorKind, ErrorSeverity};
pub use game::{
    ArmyRoster, BattleError, BattleSetup, GameState, GameStateKind, GameStateMachine, LoadReport,
    SkippedUnit,
};
pub use state::{
    Attack, AttackKind, Cell, CellCoord, Condition, ConditionProfile, Grid, GridError, MoveKind,
    Movement, Side, StatBlock, Unit, UnitId, UnitRef, UnitType, WorldPosition,
};
