//! Shorthand constructors for nesting trees without `Box::new` noise.
//!
//! ```
//! use arbor_bt::builder::{action, condition, sequence};
//! use arbor_bt::{TaskStatus, TickContext};
//!
//! let root = sequence::<u32>(vec![
//!     condition(|_ctx: &TickContext, n: &u32| TaskStatus::from(*n < 10)),
//!     action(|_ctx: &TickContext, n: &mut u32| {
//!         *n += 1;
//!         TaskStatus::Success
//!     }),
//! ]);
//! # let _ = root;
//! ```

use arbor_core::{TaskStatus, TickContext};

use crate::nodes::{
    Action, AlwaysSucceed, Condition, Inverter, Parallel, ParallelPolicy, ReactiveSelector,
    ReactiveSequence, Repeat, Selector, Sequence, Wait,
};
use crate::task::Task;

#[inline]
pub fn action<B: 'static>(
    callback: impl FnMut(&TickContext, &mut B) -> TaskStatus + 'static,
) -> Box<dyn Task<B>> {
    Box::new(Action::new(callback))
}

#[inline]
pub fn condition<B: 'static>(
    callback: impl FnMut(&TickContext, &B) -> TaskStatus + 'static,
) -> Box<dyn Task<B>> {
    Box::new(Condition::new(callback))
}

#[inline]
pub fn wait<B: 'static>(seconds: f32) -> Box<dyn Task<B>> {
    Box::new(Wait::new(seconds))
}

#[inline]
pub fn sequence<B: 'static>(children: Vec<Box<dyn Task<B>>>) -> Box<dyn Task<B>> {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector<B: 'static>(children: Vec<Box<dyn Task<B>>>) -> Box<dyn Task<B>> {
    Box::new(Selector::new(children))
}

#[inline]
pub fn reactive_sequence<B: 'static>(children: Vec<Box<dyn Task<B>>>) -> Box<dyn Task<B>> {
    Box::new(ReactiveSequence::new(children))
}

#[inline]
pub fn reactive_selector<B: 'static>(children: Vec<Box<dyn Task<B>>>) -> Box<dyn Task<B>> {
    Box::new(ReactiveSelector::new(children))
}

#[inline]
pub fn parallel<B: 'static>(
    policy: ParallelPolicy,
    children: Vec<Box<dyn Task<B>>>,
) -> Box<dyn Task<B>> {
    Box::new(Parallel::new(policy, children))
}

#[inline]
pub fn inverter<B: 'static>(child: Box<dyn Task<B>>) -> Box<dyn Task<B>> {
    Box::new(Inverter::new(child))
}

#[inline]
pub fn always_succeed<B: 'static>(child: Box<dyn Task<B>>) -> Box<dyn Task<B>> {
    Box::new(AlwaysSucceed::new(child))
}

#[inline]
pub fn repeat<B: 'static>(child: Box<dyn Task<B>>, times: u32) -> Box<dyn Task<B>> {
    Box::new(Repeat::new(child, times))
}
