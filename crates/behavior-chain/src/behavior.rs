//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for every step of a behavior chain. Behaviors are stored
//! between ticks while the context they act on is only borrowed for the
//! duration of one step, so the trait is generic over a [`Context`] family
//! rather than over a concrete (possibly borrowed) context type.

use crate::Step;

/// Family of context types a behavior can be performed against.
///
/// The family itself is a `'static` marker; [`Context::Ref`] is the value a
/// behavior actually receives for one tick, and may borrow from its caller.
///
/// ```rust,ignore
/// struct UnitTurn;
///
/// impl Context for UnitTurn {
///     type Ref<'a> = UnitContext<'a>;
/// }
/// ```
pub trait Context: 'static {
    /// Context value handed to [`Behavior::perform`] for a single tick.
    type Ref<'a>;
}

/// Owned, type-erased behavior stored in a chain between ticks.
pub type BoxedBehavior<C> = Box<dyn Behavior<C>>;

/// A unit of work performed on exactly one scheduling tick.
pub trait Behavior<C: Context>: Send + Sync {
    /// Perform one step of this behavior.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context for this tick. Behaviors
    ///   read and mutate the world through it.
    ///
    /// # Returns
    ///
    /// - `Step::Continue` to be performed again on the next tick
    /// - `Step::Transition` to hand off to another behavior
    /// - `Step::Done` when the chain is exhausted
    fn perform(&mut self, ctx: &mut C::Ref<'_>) -> Step<C>;

    /// Short name used in logs and debug output.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// so composites can hold heterogeneous children.
impl<C: Context> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn perform(&mut self, ctx: &mut C::Ref<'_>) -> Step<C> {
        (**self).perform(ctx)
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }
}
