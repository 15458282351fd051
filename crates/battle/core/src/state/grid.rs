//! Square cell grid laid over the battle terrain.

use crate::config::GridConfig;
use crate::env::TerrainSampler;

use super::{CellCoord, GridError, Side, Unit, UnitRef, WorldPosition};

/// One square of the battlefield.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    coord: CellCoord,
    enabled: bool,
    position: WorldPosition,
    occupant: Option<UnitRef>,
}

impl Cell {
    pub fn new(coord: CellCoord, enabled: bool, position: WorldPosition) -> Self {
        Self {
            coord,
            enabled,
            position,
            occupant: None,
        }
    }

    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn position(&self) -> WorldPosition {
        self.position
    }

    pub fn occupant(&self) -> Option<UnitRef> {
        self.occupant
    }

    /// Enabled and unoccupied.
    pub fn is_free(&self) -> bool {
        self.enabled && self.occupant.is_none()
    }
}

/// `rows × rows` matrix of cells plus the two armies' start cells.
///
/// Cells are stored row-major. Occupancy is only changed through
/// [`Grid::assign`] and [`Grid::vacate`], which update the cell and the unit
/// together.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<Cell>,
    player_start: CellCoord,
    ai_start: CellCoord,
}

impl Grid {
    /// Lays a grid over `terrain`.
    ///
    /// Cell `(r, c)` sits at `x = r·cell_size + margin`, `z = c·cell_size +
    /// margin`, hovering `cell_height_above_terrain` over the sampled height.
    /// Cells whose terrain reaches `max_grid_height` are disabled.
    pub fn build(config: &GridConfig, terrain: &dyn TerrainSampler) -> Result<Self, GridError> {
        if config.cell_size == 0 {
            return Err(GridError::ZeroCellSize);
        }

        let rows = config.rows_for(terrain.size());
        if rows == 0 {
            return Err(GridError::NoCells);
        }

        let cell_size = config.cell_size as f32;
        let margin = config.terrain_margins as f32;
        let mut cells = Vec::with_capacity((rows as usize) * (rows as usize));

        for row in 0..rows {
            for col in 0..rows {
                let x = row as f32 * cell_size + margin;
                let z = col as f32 * cell_size + margin;
                let height = terrain.height_at(x, z);
                let position = WorldPosition::new(x, height + config.cell_height_above_terrain, z);
                let enabled = height < config.max_grid_height;
                cells.push(Cell::new(CellCoord::new(row, col), enabled, position));
            }
        }

        let grid = Self {
            rows,
            cols: rows,
            cells,
            player_start: config.player_start,
            ai_start: config.ai_start,
        };
        grid.check_starts()?;

        tracing::debug!(rows, enabled = grid.enabled_count(), "built grid");
        Ok(grid)
    }

    /// An all-enabled flat grid with unit spacing.
    pub fn open(rows: u32, player_start: CellCoord, ai_start: CellCoord) -> Result<Self, GridError> {
        if rows == 0 {
            return Err(GridError::NoCells);
        }

        let cells = (0..rows)
            .flat_map(|row| (0..rows).map(move |col| (row, col)))
            .map(|(row, col)| {
                Cell::new(
                    CellCoord::new(row, col),
                    true,
                    WorldPosition::new(row as f32, 0.0, col as f32),
                )
            })
            .collect();

        let grid = Self {
            rows,
            cols: rows,
            cells,
            player_start,
            ai_start,
        };
        grid.check_starts()?;
        Ok(grid)
    }

    fn check_starts(&self) -> Result<(), GridError> {
        for side in [Side::Player, Side::Ai] {
            let coord = self.start_for(side);
            if !self.contains(coord) {
                return Err(GridError::StartOutOfBounds { side, coord });
            }
        }
        Ok(())
    }

    /// `(rows, cols)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.row as usize * self.cols as usize + coord.col as usize)
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.index(coord).and_then(|idx| self.cells.get(idx))
    }

    pub fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        self.index(coord).and_then(|idx| self.cells.get_mut(idx))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn enabled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.enabled).count()
    }

    pub fn player_start(&self) -> CellCoord {
        self.player_start
    }

    pub fn ai_start(&self) -> CellCoord {
        self.ai_start
    }

    pub fn start_for(&self, side: Side) -> CellCoord {
        match side {
            Side::Player => self.player_start,
            Side::Ai => self.ai_start,
        }
    }

    pub fn is_free(&self, coord: CellCoord) -> bool {
        self.cell(coord).is_some_and(Cell::is_free)
    }

    /// Enables or disables a cell. Occupants of a disabled cell stay put.
    pub fn set_enabled(&mut self, coord: CellCoord, enabled: bool) -> Result<(), GridError> {
        let (rows, cols) = self.dimensions();
        let cell = self
            .cell_mut(coord)
            .ok_or(GridError::OutOfBounds { coord, rows, cols })?;
        cell.enabled = enabled;
        Ok(())
    }

    /// Moves `unit` of `side` onto `coord`.
    ///
    /// The unit's previous cell is vacated, and the new cell's occupant and
    /// the unit's cell are set together. On error nothing changes. Assigning a
    /// unit to the cell it already holds is a no-op.
    pub fn assign(&mut self, unit: &mut Unit, side: Side, coord: CellCoord) -> Result<(), GridError> {
        let handle = UnitRef::new(side, unit.id());
        let (rows, cols) = self.dimensions();
        let target = self
            .cell(coord)
            .ok_or(GridError::OutOfBounds { coord, rows, cols })?;

        if !target.enabled {
            return Err(GridError::CellDisabled(coord));
        }
        match target.occupant {
            Some(occupant) if occupant == handle => return Ok(()),
            Some(occupant) => return Err(GridError::CellOccupied { coord, occupant }),
            None => {}
        }

        self.release(unit.cell(), handle);
        if let Some(cell) = self.cell_mut(coord) {
            cell.occupant = Some(handle);
        }
        unit.set_cell(Some(coord));
        Ok(())
    }

    /// Takes `unit` off the grid.
    pub fn vacate(&mut self, unit: &mut Unit, side: Side) {
        self.release(unit.cell(), UnitRef::new(side, unit.id()));
        unit.set_cell(None);
    }

    fn release(&mut self, coord: Option<CellCoord>, handle: UnitRef) {
        if let Some(cell) = coord.and_then(|coord| self.cell_mut(coord)) {
            if cell.occupant == Some(handle) {
                cell.occupant = None;
            }
        }
    }

    /// Closest free cell to `from`, searching outward in Chebyshev rings.
    ///
    /// Within a ring, candidates are visited in row-major order.
    pub fn nearest_free_cell(&self, from: CellCoord) -> Option<CellCoord> {
        let max_ring = i64::from(self.rows.max(self.cols)) + i64::from(from.row.max(from.col));
        let (row0, col0) = (i64::from(from.row), i64::from(from.col));

        for ring in 0..=max_ring {
            for row in (row0 - ring)..=(row0 + ring) {
                for col in (col0 - ring)..=(col0 + ring) {
                    let on_ring = (row - row0).abs() == ring || (col - col0).abs() == ring;
                    if !on_ring || row < 0 || col < 0 {
                        continue;
                    }
                    let (Ok(row), Ok(col)) = (u32::try_from(row), u32::try_from(col)) else {
                        continue;
                    };
                    let coord = CellCoord::new(row, col);
                    if self.is_free(coord) {
                        return Some(coord);
                    }
                }
            }
        }
        None
    }
}
