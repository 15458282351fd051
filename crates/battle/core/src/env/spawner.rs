use crate::state::{Cell, Side, Unit};

/// Receives a notification for every unit that should appear in the world.
///
/// Called once per placed unit when a battle is assembled. Implementations
/// create visuals or record the event; they never see mutable battle state.
pub trait UnitSpawner {
    fn spawn(&mut self, label: &str, side: Side, unit: &Unit, cell: &Cell);
}

/// Logs every spawn at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSpawner;

impl UnitSpawner for TracingSpawner {
    fn spawn(&mut self, label: &str, side: Side, unit: &Unit, cell: &Cell) {
        let position = cell.position();
        tracing::info!(
            label,
            %side,
            unit = %unit.id(),
            cell = %cell.coord(),
            x = position.x,
            y = position.y,
            z = position.z,
            "spawned unit"
        );
    }
}

/// Ignores every spawn.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSpawner;

impl UnitSpawner for NoopSpawner {
    fn spawn(&mut self, _label: &str, _side: Side, _unit: &Unit, _cell: &Cell) {}
}
