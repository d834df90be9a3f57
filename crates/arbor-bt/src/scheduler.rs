//! Per-frame driver for registered trees.
//!
//! The host creates one [`Scheduler`] at startup, passes it to [`TreeHandle::start`] /
//! [`TreeHandle::stop`], and calls [`Scheduler::tick`] exactly once per frame. Trees run in
//! registration order; each tree runs at most once per tick.

use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use arbor_core::TickContext;
use arbor_tools::{TraceEvent, TraceSink};

use crate::tree::{Runnable, TreeHandle};

/// Id assigned to a tree when it is registered. A tree re-added after removal gets a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreeId(pub u64);

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SchedulerConfig {
    /// Upper bound applied to every frame delta. Non-positive disables the cap.
    pub max_dt_seconds: f32,
    /// Seed folded into every [`TickContext`].
    pub seed: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_dt_seconds: 1.0 / 3.0,
            seed: 0,
        }
    }
}

impl SchedulerConfig {
    /// Negative and non-finite deltas become `0.0`; large ones are capped.
    pub fn clamp_dt(&self, dt_seconds: f32) -> f32 {
        if !dt_seconds.is_finite() || dt_seconds < 0.0 {
            return 0.0;
        }
        if self.max_dt_seconds > 0.0 {
            dt_seconds.min(self.max_dt_seconds)
        } else {
            dt_seconds
        }
    }
}

/// Summary of one [`Scheduler::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub dt_seconds: f32,
    /// Trees that ran.
    pub ran: usize,
    /// Trees that were borrowed elsewhere and could not run.
    pub skipped: usize,
    /// Registrations dropped because their tree no longer exists.
    pub pruned: usize,
}

struct Entry {
    id: TreeId,
    name: String,
    tree: Weak<RefCell<dyn Runnable>>,
}

pub struct Scheduler {
    config: SchedulerConfig,
    entries: Vec<Entry>,
    next_id: u64,
    tick: u64,
    trace: Option<Box<dyn TraceSink>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .field("trees", &self.entries.iter().map(|e| e.id).collect::<Vec<_>>())
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            next_id: 1,
            tick: 0,
            trace: None,
        }
    }

    /// Emits one `tree.run` event per tree per tick into `sink`.
    pub fn with_trace_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.trace = Some(Box::new(sink));
        self
    }

    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.trace = sink;
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Number of ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains<B: 'static>(&self, tree: &TreeHandle<B>) -> bool {
        self.position(tree).is_some()
    }

    pub fn id_of<B: 'static>(&self, tree: &TreeHandle<B>) -> Option<TreeId> {
        self.position(tree).map(|i| self.entries[i].id)
    }

    /// Registered trees in tick order.
    pub fn registered(&self) -> impl Iterator<Item = (TreeId, &str)> + '_ {
        self.entries.iter().map(|e| (e.id, e.name.as_str()))
    }

    /// Appends `tree` to the tick order. Adding a tree that is already registered is a
    /// no-op and returns `false`.
    pub fn add<B: 'static>(&mut self, tree: &TreeHandle<B>) -> bool {
        if self.contains(tree) {
            return false;
        }

        let id = TreeId(self.next_id);
        self.next_id += 1;
        let name = tree.name_for_log();
        tracing::debug!(%id, name = %name, "tree registered");

        self.entries.push(Entry {
            id,
            name,
            tree: tree.runnable(),
        });
        true
    }

    /// Removes `tree`, keeping the relative order of the rest. Removing a tree that is not
    /// registered is a no-op and returns `false`.
    pub fn remove<B: 'static>(&mut self, tree: &TreeHandle<B>) -> bool {
        let Some(index) = self.position(tree) else {
            return false;
        };

        let entry = self.entries.remove(index);
        tracing::debug!(id = %entry.id, name = %entry.name, "tree unregistered");
        true
    }

    pub fn clear(&mut self) {
        tracing::debug!(count = self.entries.len(), "scheduler cleared");
        self.entries.clear();
    }

    /// Runs every registered tree once, in registration order, with `dt_seconds` (clamped by
    /// [`SchedulerConfig::clamp_dt`]).
    pub fn tick(&mut self, dt_seconds: f32) -> TickReport {
        let dt_seconds = self.config.clamp_dt(dt_seconds);
        let ctx = TickContext::new(self.tick, dt_seconds, self.config.seed);
        let mut report = TickReport {
            tick: self.tick,
            dt_seconds,
            ran: 0,
            skipped: 0,
            pruned: 0,
        };

        let before = self.entries.len();
        self.entries.retain(|e| e.tree.strong_count() > 0);
        report.pruned = before - self.entries.len();

        for entry in &self.entries {
            let Some(tree) = entry.tree.upgrade() else {
                continue;
            };
            let Ok(mut tree) = tree.try_borrow_mut() else {
                tracing::warn!(id = %entry.id, name = %entry.name, "tree is borrowed, skipping tick");
                report.skipped += 1;
                continue;
            };

            let status = tree.run(&ctx);
            report.ran += 1;
            tracing::trace!(id = %entry.id, name = tree.name(), ?status, "tree ran");

            if let Some(sink) = self.trace.as_mut() {
                sink.emit(
                    TraceEvent::new(ctx.tick, "tree.run")
                        .with_tree(entry.id.0)
                        .with_status(status),
                );
            }
        }

        tracing::trace!(
            tick = report.tick,
            dt = report.dt_seconds,
            ran = report.ran,
            skipped = report.skipped,
            pruned = report.pruned,
            "scheduler tick"
        );

        self.tick += 1;
        report
    }

    fn position<B: 'static>(&self, tree: &TreeHandle<B>) -> Option<usize> {
        let needle = tree.runnable();
        self.entries.iter().position(|e| Weak::ptr_eq(&e.tree, &needle))
    }
}
