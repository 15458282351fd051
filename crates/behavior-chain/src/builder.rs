//! Builder utilities for ergonomic chain construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behaviors. Instead of writing verbose `Box::new(Sequence::new(vec![...]))`,
//! you can use shorter functions like `sequence(vec![...])`.

use crate::{BoxedBehavior, Context, FnBehavior, Repeat, Sequence, Step, Wait};

/// Creates a sequence.
///
/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: Context>(children: Vec<BoxedBehavior<C>>) -> BoxedBehavior<C> {
    Box::new(Sequence::new(children))
}

/// Creates a repeat.
///
/// Shorthand for `Box::new(Repeat::new(times, factory))`.
#[inline]
pub fn repeat<C, F>(times: u32, factory: F) -> BoxedBehavior<C>
where
    C: Context,
    F: Fn() -> BoxedBehavior<C> + Send + Sync + 'static,
{
    Box::new(Repeat::new(times, factory))
}

/// Creates a closure-backed behavior.
///
/// Shorthand for `Box::new(FnBehavior::new(name, f))`.
#[inline]
pub fn from_fn<C, F>(name: &'static str, f: F) -> BoxedBehavior<C>
where
    C: Context,
    F: FnMut(&mut C::Ref<'_>) -> Step<C> + Send + Sync + 'static,
{
    Box::new(FnBehavior::new(name, f))
}

/// Creates a wait of `ticks` steps.
///
/// Shorthand for `Box::new(Wait::new(ticks))`.
#[inline]
pub fn wait<C: Context>(ticks: u32) -> BoxedBehavior<C> {
    Box::new(Wait::new(ticks))
}
