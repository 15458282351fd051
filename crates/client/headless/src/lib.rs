//! Headless battle host.
//!
//! Plays the role of the game engine: loads content, owns the
//! [`GameStateMachine`](battle_core::GameStateMachine) and delivers frame and
//! physics ticks to it until the battle is decided.

pub mod config;
pub mod driver;
pub mod logging;

pub use config::ClientConfig;
pub use driver::{Driver, RunSummary, StopReason, load_machine};
