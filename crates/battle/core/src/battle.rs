//! Two-army turn alternation.
//!
//! Exactly one army is active at a time. [`BattleState::update`] delivers one
//! tick to it; when its round completes the turn flag flips and the other
//! army's round is started in the same call, so the next tick always lands on
//! a valid controller.

use crate::army::{ArmyManager, RoundStatus};
use crate::config::BattleConfig;
use crate::env::UnitSpawner;
use crate::state::{Grid, Side};

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    /// The other side had nobody left to act.
    Victory(Side),
    /// Neither side has a living unit.
    Draw,
    /// An army broke the turn protocol.
    Aborted,
}

/// Result of one [`BattleState::update`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattleStatus {
    Ongoing,
    Finished(BattleOutcome),
}

impl BattleStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, BattleStatus::Finished(_))
    }
}

#[derive(Debug)]
pub struct BattleState {
    grid: Grid,
    player: ArmyManager,
    ai: ArmyManager,
    turn: Side,
    config: BattleConfig,
    outcome: Option<BattleOutcome>,
    ticks: u64,
    rounds: u32,
}

impl BattleState {
    /// Announces both armies' units to `spawner` and opens the first round.
    ///
    /// If the side configured to go first cannot start, the battle is decided
    /// before the first tick.
    pub fn new(
        grid: Grid,
        player: ArmyManager,
        ai: ArmyManager,
        config: BattleConfig,
        spawner: &mut dyn UnitSpawner,
    ) -> Self {
        player.instance_units(&grid, spawner);
        ai.instance_units(&grid, spawner);

        let turn = config.first_turn;
        let mut battle = Self {
            grid,
            player,
            ai,
            turn,
            config,
            outcome: None,
            ticks: 0,
            rounds: 0,
        };

        match battle.army_mut(turn).start_turn() {
            Ok(unit) => tracing::info!(
                %turn,
                %unit,
                player_units = battle.player.len(),
                ai_units = battle.ai.len(),
                "battle started"
            ),
            Err(error) => {
                tracing::info!(%turn, %error, "first side cannot act");
                let other = turn.opponent();
                let outcome = if battle.army(other).has_alive() {
                    BattleOutcome::Victory(other)
                } else {
                    BattleOutcome::Draw
                };
                battle.finish(outcome);
            }
        }

        battle
    }

    /// Delivers one tick to the active army.
    pub fn update(&mut self) -> BattleStatus {
        if let Some(outcome) = self.outcome {
            return BattleStatus::Finished(outcome);
        }
        self.ticks += 1;

        let turn = self.turn;
        let (army, grid, config) = self.split(turn);
        match army.update(grid, config) {
            Ok(RoundStatus::Ongoing) => BattleStatus::Ongoing,
            Ok(RoundStatus::Complete) => self.flip_turn(),
            Err(error) => {
                tracing::error!(%turn, %error, "army broke the turn protocol");
                self.finish(BattleOutcome::Aborted)
            }
        }
    }

    /// Physics-rate hook. Turn arbitration is frame driven, so this does nothing.
    pub fn fixed_update(&mut self) {}

    fn flip_turn(&mut self) -> BattleStatus {
        let finished = self.turn;
        let next = finished.opponent();
        self.rounds += 1;
        self.turn = next;

        match self.army_mut(next).start_turn() {
            Ok(unit) => {
                tracing::info!(from = %finished, to = %next, %unit, round = self.rounds, "turn passed");
                BattleStatus::Ongoing
            }
            Err(error) => {
                tracing::info!(side = %next, %error, "side cannot start its round");
                let outcome = if self.army(finished).has_alive() {
                    BattleOutcome::Victory(finished)
                } else {
                    BattleOutcome::Draw
                };
                self.finish(outcome)
            }
        }
    }

    fn finish(&mut self, outcome: BattleOutcome) -> BattleStatus {
        tracing::info!(?outcome, ticks = self.ticks, rounds = self.rounds, "battle over");
        self.outcome = Some(outcome);
        BattleStatus::Finished(outcome)
    }

    fn split(&mut self, side: Side) -> (&mut ArmyManager, &mut Grid, &BattleConfig) {
        let army = match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        };
        (army, &mut self.grid, &self.config)
    }

    pub fn status(&self) -> BattleStatus {
        match self.outcome {
            Some(outcome) => BattleStatus::Finished(outcome),
            None => BattleStatus::Ongoing,
        }
    }

    /// Side whose army is active.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn army(&self, side: Side) -> &ArmyManager {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    pub fn army_mut(&mut self, side: Side) -> &mut ArmyManager {
        match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Ticks processed while the battle was running.
    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks
    }

    /// Army rounds completed, both sides counted.
    pub fn rounds_completed(&self) -> u32 {
        self.rounds
    }
}
