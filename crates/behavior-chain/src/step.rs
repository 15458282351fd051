//! Outcome of a single behavior step.

use core::fmt;

use crate::{BoxedBehavior, Context};

/// What the owner of a behavior should do after one `perform` call.
///
/// # Turn Semantics
///
/// Each step also answers whether the owner's *turn* is over:
/// - `Continue` never ends the turn
/// - `Transition` ends it only when `ends_turn` is set
/// - `Done` always ends it, and leaves nothing pending
pub enum Step<C: Context> {
    /// Not finished; perform the same behavior again on the next tick.
    Continue,

    /// Hand off to `next`, which is performed on the next tick.
    Transition {
        next: BoxedBehavior<C>,
        /// Whether this step concluded the owner's turn. The chain still
        /// holds `next` and resumes it when the owner acts again.
        ends_turn: bool,
    },

    /// The chain is exhausted.
    Done,
}

impl<C: Context> Step<C> {
    /// Hands off to `next` without ending the turn.
    pub fn transition(next: BoxedBehavior<C>) -> Self {
        Step::Transition {
            next,
            ends_turn: false,
        }
    }

    /// Hands off to `next` and ends the turn; `next` runs on the owner's
    /// following turn.
    pub fn transition_and_end_turn(next: BoxedBehavior<C>) -> Self {
        Step::Transition {
            next,
            ends_turn: true,
        }
    }

    /// Returns `true` if this step concluded the owner's turn.
    #[inline]
    pub fn finished(&self) -> bool {
        match self {
            Step::Continue => false,
            Step::Transition { ends_turn, .. } => *ends_turn,
            Step::Done => true,
        }
    }

    /// Returns `true` if this step is `Continue`.
    #[inline]
    pub fn is_continue(&self) -> bool {
        matches!(self, Step::Continue)
    }

    /// Returns `true` if this step is `Done`.
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done)
    }
}

impl<C: Context> fmt::Debug for Step<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Continue => f.write_str("Continue"),
            Step::Transition { next, ends_turn } => f
                .debug_struct("Transition")
                .field("next", &next.name())
                .field("ends_turn", ends_turn)
                .finish(),
            Step::Done => f.write_str("Done"),
        }
    }
}
