//! Pending-behavior slot for one owner's behavior chain.
//!
//! A [`Chain`] is what a controller holds between ticks. It distinguishes a
//! chain that has never run from one that just ran to completion, so the
//! "start a fresh turn" case is explicit instead of being inferred from an
//! empty slot.

use core::fmt;
use core::mem;

use crate::{BoxedBehavior, Context, Step};

/// State of a behavior chain between ticks.
pub enum ChainState<C: Context> {
    /// No turn has started yet.
    NotStarted,

    /// A behavior is pending and will be performed on the next advance.
    InProgress(BoxedBehavior<C>),

    /// The last step returned [`Step::Done`]; the next advance starts a fresh turn.
    ChainComplete,
}

impl<C: Context> ChainState<C> {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainState::NotStarted => "not_started",
            ChainState::InProgress(_) => "in_progress",
            ChainState::ChainComplete => "chain_complete",
        }
    }
}

impl<C: Context> fmt::Debug for ChainState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainState::InProgress(behavior) => {
                f.debug_tuple("InProgress").field(&behavior.name()).finish()
            }
            other => f.write_str(other.as_str()),
        }
    }
}

/// Drives one behavior chain, one step per [`Chain::advance`] call.
pub struct Chain<C: Context> {
    state: ChainState<C>,
    steps: u64,
}

impl<C: Context> Chain<C> {
    /// Creates a chain with no turn in progress.
    pub fn new() -> Self {
        Self {
            state: ChainState::NotStarted,
            steps: 0,
        }
    }

    /// Performs exactly one step of the chain.
    ///
    /// If no behavior is in progress, `start` is called with the context to
    /// obtain the first behavior of a fresh turn. The returned step's
    /// continuation becomes the new pending state.
    ///
    /// Returns `true` when this step concluded the owner's turn.
    pub fn advance<'r, F>(&mut self, ctx: &mut C::Ref<'r>, start: F) -> bool
    where
        F: FnOnce(&C::Ref<'r>) -> BoxedBehavior<C>,
    {
        let mut behavior = match mem::replace(&mut self.state, ChainState::NotStarted) {
            ChainState::InProgress(behavior) => behavior,
            ChainState::NotStarted | ChainState::ChainComplete => start(ctx),
        };

        let step = behavior.perform(ctx);
        let finished = step.finished();
        self.steps += 1;

        self.state = match step {
            Step::Continue => ChainState::InProgress(behavior),
            Step::Transition { next, .. } => ChainState::InProgress(next),
            Step::Done => ChainState::ChainComplete,
        };

        finished
    }

    pub fn state(&self) -> &ChainState<C> {
        &self.state
    }

    /// Returns `true` if a behavior is pending.
    pub fn is_in_progress(&self) -> bool {
        matches!(self.state, ChainState::InProgress(_))
    }

    /// Returns `true` if the last step exhausted the chain.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, ChainState::ChainComplete)
    }

    /// Returns `true` if the next advance will start a fresh turn.
    pub fn is_idle(&self) -> bool {
        !self.is_in_progress()
    }

    /// Name of the pending behavior, if any.
    pub fn current_name(&self) -> Option<&'static str> {
        match &self.state {
            ChainState::InProgress(behavior) => Some(behavior.name()),
            _ => None,
        }
    }

    /// Total number of steps performed over the chain's lifetime.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Drops any pending behavior and returns to `NotStarted`.
    pub fn reset(&mut self) {
        self.state = ChainState::NotStarted;
    }
}

impl<C: Context> Default for Chain<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Context> fmt::Debug for Chain<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("state", &self.state)
            .field("steps", &self.steps)
            .finish()
    }
}
