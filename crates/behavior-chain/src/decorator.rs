//! Decorators and leaf helpers.
//!
//! [`Repeat`] re-runs a freshly built behavior a fixed number of times,
//! [`FnBehavior`] turns a closure into a behavior and [`Wait`] spends ticks.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::{Behavior, BoxedBehavior, Context, Step};

type Factory<C> = Arc<dyn Fn() -> BoxedBehavior<C> + Send + Sync>;

/// Runs a behavior built by `factory` to completion, `times` times over.
///
/// # Semantics
///
/// - A fresh child is built for every repetition
/// - `Done` from the last repetition finishes the repeat
/// - A child transition that ends the turn is propagated, carrying the
///   remaining repetitions along
pub struct Repeat<C: Context> {
    factory: Factory<C>,
    remaining: u32,
    current: Option<BoxedBehavior<C>>,
}

impl<C: Context> Repeat<C> {
    /// Creates a repeat of `times` runs.
    ///
    /// # Panics
    ///
    /// Panics if `times` is zero.
    pub fn new<F>(times: u32, factory: F) -> Self
    where
        F: Fn() -> BoxedBehavior<C> + Send + Sync + 'static,
    {
        assert!(times > 0, "Repeat must run at least once");
        Self {
            factory: Arc::new(factory),
            remaining: times,
            current: None,
        }
    }

    /// Repetitions left, including the one in progress.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl<C: Context> Behavior<C> for Repeat<C> {
    fn perform(&mut self, ctx: &mut C::Ref<'_>) -> Step<C> {
        let mut current = self.current.take().unwrap_or_else(|| (self.factory)());

        match current.perform(ctx) {
            Step::Continue => {
                self.current = Some(current);
                Step::Continue
            }
            Step::Transition {
                next,
                ends_turn: false,
            } => {
                self.current = Some(next);
                Step::Continue
            }
            Step::Transition {
                next,
                ends_turn: true,
            } => Step::transition_and_end_turn(Box::new(Repeat {
                factory: Arc::clone(&self.factory),
                remaining: self.remaining,
                current: Some(next),
            })),
            Step::Done => {
                self.remaining -= 1;
                if self.remaining == 0 {
                    Step::Done
                } else {
                    Step::Continue
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "Repeat"
    }
}

/// Wraps a closure as a behavior.
///
/// The closure is called once per tick and returns the step directly.
pub struct FnBehavior<C, F> {
    name: &'static str,
    f: F,
    _context: PhantomData<fn() -> C>,
}

impl<C, F> FnBehavior<C, F>
where
    C: Context,
    F: FnMut(&mut C::Ref<'_>) -> Step<C> + Send + Sync,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self {
            name,
            f,
            _context: PhantomData,
        }
    }
}

impl<C, F> Behavior<C> for FnBehavior<C, F>
where
    C: Context,
    F: FnMut(&mut C::Ref<'_>) -> Step<C> + Send + Sync,
{
    #[inline]
    fn perform(&mut self, ctx: &mut C::Ref<'_>) -> Step<C> {
        (self.f)(ctx)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Spends a fixed number of ticks doing nothing, then finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wait {
    remaining: u32,
}

impl Wait {
    /// Creates a wait of `ticks` steps (at least one).
    pub fn new(ticks: u32) -> Self {
        Self {
            remaining: ticks.max(1),
        }
    }
}

impl<C: Context> Behavior<C> for Wait {
    fn perform(&mut self, _ctx: &mut C::Ref<'_>) -> Step<C> {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            Step::Done
        } else {
            Step::Continue
        }
    }

    fn name(&self) -> &'static str {
        "Wait"
    }
}
