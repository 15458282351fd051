use behavior_chain::{Behavior, Step};

use crate::config::BattleConfig;
use crate::state::CellCoord;

use super::{UnitContext, UnitStep, UnitTurn};

/// Walks the unit to `destination` over a fixed number of ticks.
///
/// The unit is relocated on the last tick. A destination that cannot be
/// entered leaves the unit where it is; the move still completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    destination: CellCoord,
    elapsed: u32,
    duration: u32,
}

impl Move {
    pub fn new(destination: CellCoord, duration: u32) -> Self {
        Self {
            destination,
            elapsed: 0,
            duration: duration.max(1),
        }
    }

    pub fn from_config(destination: CellCoord, config: &BattleConfig) -> Self {
        Self::new(destination, config.effective_move_ticks())
    }

    pub fn destination(&self) -> CellCoord {
        self.destination
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }
}

impl Behavior<UnitTurn> for Move {
    fn perform(&mut self, ctx: &mut UnitContext<'_>) -> UnitStep {
        self.elapsed += 1;
        if self.elapsed < self.duration {
            tracing::trace!(
                unit = %ctx.unit.id(),
                tick = self.elapsed,
                of = self.duration,
                "moving"
            );
            return Step::Continue;
        }

        match ctx.grid.assign(ctx.unit, ctx.side, self.destination) {
            Ok(()) => tracing::debug!(
                side = %ctx.side,
                unit = %ctx.unit.id(),
                to = %self.destination,
                "move complete"
            ),
            Err(error) => tracing::warn!(
                side = %ctx.side,
                unit = %ctx.unit.id(),
                to = %self.destination,
                %error,
                "move blocked, unit stays put"
            ),
        }
        Step::Done
    }

    fn name(&self) -> &'static str {
        "Move"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Grid, Side, StatBlock, Unit, UnitId, UnitType};

    fn setup() -> (Grid, Unit, BattleConfig) {
        let mut grid = Grid::open(8, CellCoord::new(0, 0), CellCoord::new(7, 7)).expect("valid");
        let mut unit = Unit::new(UnitId(0), StatBlock::new(UnitType::TestUnit));
        grid.assign(&mut unit, Side::Player, CellCoord::new(0, 0))
            .expect("free cell");
        (grid, unit, BattleConfig::default())
    }

    #[test]
    fn relocates_on_the_last_tick() {
        let (mut grid, mut unit, config) = setup();
        let mut ctx = UnitContext::new(Side::Player, &mut unit, &mut grid, &config);
        let mut walk = Move::new(CellCoord::new(3, 4), 3);

        assert!(walk.perform(&mut ctx).is_continue());
        assert!(walk.perform(&mut ctx).is_continue());
        assert_eq!(ctx.unit.cell(), Some(CellCoord::new(0, 0)));
        assert!(walk.perform(&mut ctx).is_done());
        assert_eq!(ctx.unit.cell(), Some(CellCoord::new(3, 4)));
        assert!(ctx.grid.is_free(CellCoord::new(0, 0)));
    }

    #[test]
    fn zero_duration_still_takes_one_tick() {
        let (mut grid, mut unit, config) = setup();
        let mut ctx = UnitContext::new(Side::Player, &mut unit, &mut grid, &config);
        let mut walk = Move::new(CellCoord::new(1, 1), 0);

        assert_eq!(walk.duration(), 1);
        assert!(walk.perform(&mut ctx).is_done());
    }

    #[test]
    fn blocked_destination_keeps_unit_in_place() {
        let (mut grid, mut unit, config) = setup();
        grid.set_enabled(CellCoord::new(5, 5), false).expect("in bounds");
        let mut ctx = UnitContext::new(Side::Player, &mut unit, &mut grid, &config);
        let mut walk = Move::new(CellCoord::new(5, 5), 1);

        assert!(walk.perform(&mut ctx).is_done());
        assert_eq!(ctx.unit.cell(), Some(CellCoord::new(0, 0)));
    }
}
