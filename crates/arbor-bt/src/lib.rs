//! Frame-driven behavior tree runtime built on `arbor-core`.
//!
//! A [`Scheduler`] holds the registered [`Tree`]s and, once per host frame, runs each tree's
//! root [`Task`] with the frame delta. Composites combine child results:
//!
//! - [`Sequence`] / [`Selector`] resume at the child that reported `Running`.
//! - [`ReactiveSequence`] / [`ReactiveSelector`] re-check earlier children every tick.
//! - [`Parallel`] ticks all unfinished children every tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod builder;
pub mod nodes;
pub mod scheduler;
pub mod task;
pub mod tree;

pub use arbor_core::{TaskStatus, TickContext};
pub use nodes::{
    Action, AlwaysSucceed, Composite, Condition, Inverter, Parallel, ParallelPolicy,
    ReactiveSelector, ReactiveSequence, Repeat, Selector, Sequence, Wait,
};
pub use scheduler::{Scheduler, SchedulerConfig, TickReport, TreeId};
pub use task::Task;
pub use tree::{Runnable, Tree, TreeHandle};
