//! Tracing primitives for inspecting behavior tree ticks.
//!
//! Events are plain data so they can be recorded during a run and rendered later by tooling.
//! Log output goes through `tracing`; these events are for structured, assertable history.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{emit, SharedTraceSink, TraceEvent, TraceLog, TraceSink, TRACE_LOG};
