//! Composite behaviors.
//!
//! Composites drive several child behaviors as one. Because every child may
//! span several ticks, a composite only ever performs its *current* child and
//! moves on when that child reports [`Step::Done`].

use std::collections::VecDeque;
use std::mem;

use crate::{Behavior, BoxedBehavior, Context, Step};

/// Runs child behaviors one after another.
///
/// # Semantics
///
/// - The front child is performed once per tick
/// - `Continue` from the child keeps it in front
/// - `Transition` from the child replaces it in place
/// - `Done` from the child pops it; the next child starts on the following tick
/// - After the last child is done, the sequence returns `Done`
///
/// A child transition that ends the turn is propagated: the sequence hands off
/// to a new sequence holding the remaining children, so the owner resumes
/// exactly where it left off on its next turn.
pub struct Sequence<C: Context> {
    children: VecDeque<BoxedBehavior<C>>,
}

impl<C: Context> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<BoxedBehavior<C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            children: children.into(),
        }
    }

    /// Number of children that have not finished yet.
    pub fn remaining(&self) -> usize {
        self.children.len()
    }
}

impl<C: Context> Behavior<C> for Sequence<C> {
    fn perform(&mut self, ctx: &mut C::Ref<'_>) -> Step<C> {
        let Some(current) = self.children.front_mut() else {
            return Step::Done;
        };

        match current.perform(ctx) {
            Step::Continue => Step::Continue,
            Step::Transition { next, ends_turn } => {
                if let Some(slot) = self.children.front_mut() {
                    *slot = next;
                }
                if ends_turn {
                    let children = mem::take(&mut self.children);
                    Step::transition_and_end_turn(Box::new(Sequence { children }))
                } else {
                    Step::Continue
                }
            }
            Step::Done => {
                self.children.pop_front();
                if self.children.is_empty() {
                    Step::Done
                } else {
                    Step::Continue
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "Sequence"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chain;

    #[derive(Default)]
    struct TestContext {
        log: Vec<&'static str>,
    }

    impl Context for TestContext {
        type Ref<'a> = TestContext;
    }

    struct Record {
        label: &'static str,
        ticks: u32,
    }

    impl Behavior<TestContext> for Record {
        fn perform(&mut self, ctx: &mut TestContext) -> Step<TestContext> {
            ctx.log.push(self.label);
            self.ticks -= 1;
            if self.ticks == 0 {
                Step::Done
            } else {
                Step::Continue
            }
        }
    }

    /// Ends the turn, handing off to a single-tick record.
    struct Yield {
        then: &'static str,
    }

    impl Behavior<TestContext> for Yield {
        fn perform(&mut self, ctx: &mut TestContext) -> Step<TestContext> {
            ctx.log.push("yield");
            Step::transition_and_end_turn(Box::new(Record {
                label: self.then,
                ticks: 1,
            }))
        }
    }

    fn record(label: &'static str, ticks: u32) -> BoxedBehavior<TestContext> {
        Box::new(Record { label, ticks })
    }

    #[test]
    fn sequence_runs_children_in_order_one_step_per_tick() {
        let mut seq = Sequence::new(vec![record("a", 2), record("b", 1)]);
        let mut ctx = TestContext::default();

        assert!(seq.perform(&mut ctx).is_continue());
        assert!(seq.perform(&mut ctx).is_continue());
        assert_eq!(seq.remaining(), 1);
        assert!(seq.perform(&mut ctx).is_done());
        assert_eq!(ctx.log, vec!["a", "a", "b"]);
    }

    #[test]
    fn sequence_propagates_turn_ending_transition() {
        let mut chain = Chain::new();
        let mut ctx = TestContext::default();
        let start = |_: &TestContext| -> BoxedBehavior<TestContext> {
            Box::new(Sequence::new(vec![
                Box::new(Yield { then: "resumed" }),
                record("last", 1),
            ]))
        };

        assert!(chain.advance(&mut ctx, start), "yield ends the turn");
        assert_eq!(chain.current_name(), Some("Sequence"));

        assert!(!chain.advance(&mut ctx, start));
        assert!(chain.advance(&mut ctx, start));
        assert!(chain.is_complete());
        assert_eq!(ctx.log, vec!["yield", "resumed", "last"]);
    }

    #[test]
    #[should_panic(expected = "Sequence must have at least one child")]
    fn empty_sequence_panics() {
        let _ = Sequence::<TestContext>::new(Vec::new());
    }
}
