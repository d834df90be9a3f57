//! Parallel composite: every child is ticked each frame and the results are combined under
//! a [`ParallelPolicy`].

use arbor_core::{TaskStatus, TickContext};

use crate::nodes::Composite;
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParallelPolicy {
    /// Succeeds once every child has succeeded; fails on the first failure.
    RequireAll,
    /// Succeeds on the first success; fails once every child has failed.
    RequireOne,
}

/// Ticks every unfinished child each tick.
///
/// Children that already finished during the current activation are not ticked again until
/// the parallel node itself completes or is reset.
pub struct Parallel<B: 'static> {
    base: Composite<B>,
    policy: ParallelPolicy,
    finished: Vec<Option<TaskStatus>>,
}

impl<B: 'static> Parallel<B> {
    pub fn new(policy: ParallelPolicy, children: Vec<Box<dyn Task<B>>>) -> Self {
        let finished = vec![None; children.len()];
        Self {
            base: Composite::new(children),
            policy,
            finished,
        }
    }

    pub fn policy(&self) -> ParallelPolicy {
        self.policy
    }

    /// Indices of children still in progress in the current activation.
    pub fn running_children(&self) -> Vec<usize> {
        self.finished
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_none())
            .map(|(i, _)| i)
            .collect()
    }
}

impl<B: 'static> Task<B> for Parallel<B> {
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus {
        for i in 0..self.base.len() {
            if self.finished[i].is_some() {
                continue;
            }

            let status = self.base.execute_child(i, ctx, blackboard);
            match (self.policy, status) {
                (_, TaskStatus::Running) => {}
                (ParallelPolicy::RequireAll, TaskStatus::Failure)
                | (ParallelPolicy::RequireOne, TaskStatus::Success) => {
                    self.reset();
                    return status;
                }
                (_, done) => self.finished[i] = Some(done),
            }
        }

        if self.finished.iter().all(Option::is_some) {
            self.reset();
            return match self.policy {
                ParallelPolicy::RequireAll => TaskStatus::Success,
                ParallelPolicy::RequireOne => TaskStatus::Failure,
            };
        }

        TaskStatus::Running
    }

    fn reset(&mut self) {
        for f in self.finished.iter_mut() {
            *f = None;
        }
        self.base.reset_all();
    }
}
