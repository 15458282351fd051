//! Frame loop around the game state machine.

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use battle_core::{
    BattleOutcome, BattleStatus, FlatTerrain, GameStateMachine, LoadReport, TerrainSampler,
    TracingSpawner,
};

use crate::config::ClientConfig;

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Finished(BattleOutcome),
    TickLimit,
    NoBattle,
    Interrupted,
}

/// What a run did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: StopReason,
    pub frames: u64,
}

/// Loads content from `config.data_dir` and enters the battle.
///
/// Returns the machine together with the content's tick cap, overridden by
/// the environment when set.
pub fn load_machine(config: &ClientConfig) -> Result<(GameStateMachine, Option<u64>, LoadReport)> {
    let factory = ContentFactory::new(&config.data_dir);
    let battle_config = factory.load_battle_config()?;
    let grid_config = factory.load_grid_config()?;
    let catalog = factory.load_units()?;
    let setup = factory.load_roster()?;

    let terrain: Box<dyn TerrainSampler> = match factory.load_terrain()? {
        Some(map) => Box::new(map),
        None => Box::new(FlatTerrain::new(config.terrain_size, config.flat_height)),
    };

    let max_ticks = config.max_ticks.or(battle_config.max_ticks);
    let mut machine = GameStateMachine::new();
    machine.open_unit_selection();
    let report = machine
        .load_battle(
            &setup,
            &grid_config,
            terrain.as_ref(),
            &catalog,
            battle_config,
            &mut TracingSpawner,
        )
        .with_context(|| format!("loading battle from {}", config.data_dir.display()))?;

    for skipped in &report.skipped {
        tracing::warn!(side = %skipped.side, unit = %skipped.unit_type, "{}", skipped.reason);
    }

    Ok((machine, max_ticks, report))
}

/// Delivers frames to a [`GameStateMachine`].
#[derive(Debug)]
pub struct Driver {
    machine: GameStateMachine,
    max_ticks: Option<u64>,
    frames: u64,
}

impl Driver {
    pub fn new(machine: GameStateMachine, max_ticks: Option<u64>) -> Self {
        Self {
            machine,
            max_ticks,
            frames: 0,
        }
    }

    pub fn machine(&self) -> &GameStateMachine {
        &self.machine
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame: a physics step followed by a frame update.
    ///
    /// Returns `Some` once the run should stop.
    pub fn frame(&mut self) -> Option<StopReason> {
        if self.max_ticks.is_some_and(|max| self.frames >= max) {
            return Some(StopReason::TickLimit);
        }

        self.machine.fixed_update();
        let status = self.machine.update();
        self.frames += 1;

        match status {
            None => Some(StopReason::NoBattle),
            Some(BattleStatus::Finished(outcome)) => Some(StopReason::Finished(outcome)),
            Some(BattleStatus::Ongoing) => None,
        }
    }

    /// Runs frames back to back until the battle stops.
    pub fn run(&mut self) -> RunSummary {
        loop {
            if let Some(reason) = self.frame() {
                return self.summary(reason);
            }
        }
    }

    pub fn summary(&self, reason: StopReason) -> RunSummary {
        RunSummary {
            reason,
            frames: self.frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::Side;
    use tempfile::TempDir;

    fn data_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(temp_dir.path().join(name), content).unwrap();
        }
        temp_dir
    }

    fn config(dir: &TempDir) -> ClientConfig {
        ClientConfig {
            data_dir: dir.path().to_path_buf(),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn idle_machine_stops_immediately() {
        let mut driver = Driver::new(GameStateMachine::new(), None);
        assert_eq!(driver.run().reason, StopReason::NoBattle);
    }

    #[test]
    fn default_roster_runs_until_tick_limit() {
        let dir = data_dir(&[("units.ron", "(units: [(unit_type: TestUnit)])")]);
        let (machine, max_ticks, report) = load_machine(&config(&dir)).unwrap();
        assert_eq!(max_ticks, Some(battle_core::BattleConfig::DEFAULT_MAX_TICKS));
        assert_eq!((report.player_units, report.ai_units), (1, 1));

        // Nobody ever dies with the built-in choosers.
        let mut driver = Driver::new(machine, Some(40));
        let summary = driver.run();
        assert_eq!(summary, RunSummary { reason: StopReason::TickLimit, frames: 40 });
    }

    #[test]
    fn empty_ai_roster_is_a_player_victory() {
        let dir = data_dir(&[
            ("units.ron", "(units: [(unit_type: TestUnit)])"),
            (
                "roster.ron",
                r#"(player: (name: "Player: ", units: [TestUnit]), ai: (name: "AI: ", units: []))"#,
            ),
            ("config.toml", "move_ticks = 1\n"),
        ]);
        let (machine, _, _) = load_machine(&config(&dir)).unwrap();

        let summary = Driver::new(machine, None).run();

        // One chooser tick and one move tick, then the AI cannot start.
        assert_eq!(summary.reason, StopReason::Finished(BattleOutcome::Victory(Side::Player)));
        assert_eq!(summary.frames, 2);
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let dir = data_dir(&[]);
        assert!(load_machine(&config(&dir)).is_err());
    }
}
