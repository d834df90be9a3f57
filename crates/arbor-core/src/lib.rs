//! Deterministic, engine-agnostic primitives for frame-driven behavior trees.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod rng;
pub mod status;
pub mod tick;

pub use blackboard::{BbKey, Blackboard, BlackboardError};
pub use rng::{DeterministicRng, SplitMix64};
pub use status::TaskStatus;
pub use tick::TickContext;
