//! Multi-tick behavior chains for turn-based games.
//!
//! A behavior performs exactly one step per scheduling tick and reports how
//! its owner should proceed: keep running the same behavior, hand off to a new
//! one, or end the chain. A [`Chain`] holds the pending behavior between ticks.
//!
//! - **One step per tick**: `perform` runs to completion before returning
//! - **No self-reference**: "keep running" is [`Step::Continue`], never a
//!   behavior returning itself
//! - **Explicit rest state**: a chain is `NotStarted`, `InProgress` or
//!   `ChainComplete`, never a nullable slot
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Context`]: Family of context types a behavior runs against
//! - [`Behavior`]: Core trait for all behaviors
//! - [`Step`]: Continue, Transition or Done
//! - [`Chain`]: Three-state slot driving one behavior chain
//! - Composite behaviors: [`Sequence`]
//! - Decorators and leaves: [`Repeat`], [`FnBehavior`], [`Wait`]

pub mod behavior;
pub mod builder;
pub mod chain;
pub mod composite;
pub mod decorator;
pub mod step;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, BoxedBehavior, Context};
pub use chain::{Chain, ChainState};
pub use composite::Sequence;
pub use decorator::{FnBehavior, Repeat, Wait};
pub use step::Step;
