use crate::error::{BattleErrorKind, ErrorSeverity};

use super::{CellCoord, Side, UnitRef};

/// Errors raised while building the grid or changing cell occupancy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell size must be greater than zero")]
    ZeroCellSize,

    #[error("terrain leaves no room for a single cell inside the margins")]
    NoCells,

    #[error("cell {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds { coord: CellCoord, rows: u32, cols: u32 },

    #[error("{side} start cell {coord} is outside the grid")]
    StartOutOfBounds { side: Side, coord: CellCoord },

    #[error("cell {0} is disabled")]
    CellDisabled(CellCoord),

    #[error("cell {coord} is occupied by {occupant}")]
    CellOccupied { coord: CellCoord, occupant: UnitRef },

    #[error("no free cell left on the grid")]
    NoFreeCell,
}

impl BattleErrorKind for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ZeroCellSize | Self::NoCells | Self::StartOutOfBounds { .. } => {
                ErrorSeverity::Terminal
            }
            Self::OutOfBounds { .. }
            | Self::CellDisabled(_)
            | Self::CellOccupied { .. }
            | Self::NoFreeCell => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroCellSize => "GRID_ZERO_CELL_SIZE",
            Self::NoCells => "GRID_NO_CELLS",
            Self::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
            Self::StartOutOfBounds { .. } => "GRID_START_OUT_OF_BOUNDS",
            Self::CellDisabled(_) => "GRID_CELL_DISABLED",
            Self::CellOccupied { .. } => "GRID_CELL_OCCUPIED",
            Self::NoFreeCell => "GRID_NO_FREE_CELL",
        }
    }
}
