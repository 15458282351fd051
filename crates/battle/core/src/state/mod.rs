//! Battle data model: units, cells and the grid they stand on.
//!
//! Units are owned by their controllers; cells only hold a [`UnitRef`] handle
//! to their occupant. [`Grid::assign`] is the single operation that changes
//! occupancy and keeps both sides of that link consistent.
mod common;
mod error;
mod grid;
mod unit;

pub use common::{CellCoord, Side, UnitId, UnitRef, WorldPosition};
pub use error::GridError;
pub use grid::{Cell, Grid};
pub use unit::{
    Attack, AttackKind, Condition, ConditionProfile, MoveKind, Movement, StatBlock, Unit, UnitType,
};
