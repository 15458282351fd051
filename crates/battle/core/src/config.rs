use crate::state::{CellCoord, Side};

/// Battle-wide tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Number of ticks a [`Move`](crate::Move) takes, including the tick that
    /// relocates the unit.
    pub move_ticks: u32,
    /// Destination handed out by the built-in choosers.
    pub placeholder_destination: CellCoord,
    /// Side that opens the battle.
    pub first_turn: Side,
    /// Upper bound on host ticks. The core never reads it; hosts use it to
    /// stop a battle that does not converge.
    pub max_ticks: Option<u64>,
}

impl BattleConfig {
    pub const DEFAULT_MOVE_TICKS: u32 = 3;
    pub const DEFAULT_PLACEHOLDER_DESTINATION: CellCoord = CellCoord::new(16, 6);
    pub const DEFAULT_MAX_TICKS: u64 = 10_000;

    pub fn new() -> Self {
        Self {
            move_ticks: Self::DEFAULT_MOVE_TICKS,
            placeholder_destination: Self::DEFAULT_PLACEHOLDER_DESTINATION,
            first_turn: Side::Player,
            max_ticks: Some(Self::DEFAULT_MAX_TICKS),
        }
    }

    pub fn with_move_ticks(mut self, move_ticks: u32) -> Self {
        self.move_ticks = move_ticks;
        self
    }

    pub fn with_first_turn(mut self, first_turn: Side) -> Self {
        self.first_turn = first_turn;
        self
    }

    pub fn with_placeholder_destination(mut self, destination: CellCoord) -> Self {
        self.placeholder_destination = destination;
        self
    }

    /// Move duration with the lower bound applied.
    #[inline]
    pub fn effective_move_ticks(&self) -> u32 {
        self.move_ticks.max(1)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Layout parameters for building a [`Grid`](crate::Grid) over a terrain.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Edge length of one square cell in world units.
    pub cell_size: u32,
    /// Empty border kept on each side of the terrain.
    pub terrain_margins: u32,
    /// Vertical offset of a cell above the sampled terrain height.
    pub cell_height_above_terrain: f32,
    /// Cells whose terrain height is at or above this value are disabled.
    pub max_grid_height: f32,
    pub player_start: CellCoord,
    pub ai_start: CellCoord,
}

impl GridConfig {
    pub const DEFAULT_CELL_SIZE: u32 = 20;
    pub const DEFAULT_TERRAIN_MARGINS: u32 = 100;
    pub const DEFAULT_CELL_HEIGHT_ABOVE_TERRAIN: f32 = 10.0;
    pub const DEFAULT_MAX_GRID_HEIGHT: f32 = 500.0;
    pub const DEFAULT_PLAYER_START: CellCoord = CellCoord::new(2, 2);
    pub const DEFAULT_AI_START: CellCoord = CellCoord::new(30, 30);

    pub fn new() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
            terrain_margins: Self::DEFAULT_TERRAIN_MARGINS,
            cell_height_above_terrain: Self::DEFAULT_CELL_HEIGHT_ABOVE_TERRAIN,
            max_grid_height: Self::DEFAULT_MAX_GRID_HEIGHT,
            player_start: Self::DEFAULT_PLAYER_START,
            ai_start: Self::DEFAULT_AI_START,
        }
    }

    pub fn with_starts(mut self, player_start: CellCoord, ai_start: CellCoord) -> Self {
        self.player_start = player_start;
        self.ai_start = ai_start;
        self
    }

    /// Number of rows (and columns) that fit on a terrain of `terrain_size`.
    ///
    /// Returns 0 when the margins leave no room.
    pub fn rows_for(&self, terrain_size: f32) -> u32 {
        if self.cell_size == 0 {
            return 0;
        }
        let usable = terrain_size - 2.0 * self.terrain_margins as f32;
        if usable <= 0.0 {
            return 0;
        }
        (usable / self.cell_size as f32).floor() as u32
    }

    pub fn start_for(&self, side: Side) -> CellCoord {
        match side {
            Side::Player => self.player_start,
            Side::Ai => self.ai_start,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_terrain_minus_margins() {
        let config = GridConfig::new();
        assert_eq!(config.rows_for(1000.0), 40);
        assert_eq!(config.rows_for(219.0), 0);
        assert_eq!(config.rows_for(239.9), 1);
        assert_eq!(config.rows_for(100.0), 0);
    }

    #[test]
    fn move_ticks_never_drop_below_one() {
        assert_eq!(BattleConfig::new().with_move_ticks(0).effective_move_ticks(), 1);
        assert_eq!(BattleConfig::default().effective_move_ticks(), 3);
    }
}
