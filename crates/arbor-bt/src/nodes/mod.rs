//! Built-in node types.

mod composite;
mod decorator;
mod leaf;
mod parallel;

pub use composite::{Composite, ReactiveSelector, ReactiveSequence, Selector, Sequence};
pub use decorator::{AlwaysSucceed, Inverter, Repeat};
pub use leaf::{Action, Condition, Wait};
pub use parallel::{Parallel, ParallelPolicy};
