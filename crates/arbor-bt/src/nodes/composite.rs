//! Sequence and selector composites.
//!
//! The memory variants ([`Sequence`], [`Selector`]) keep a cursor on the child that last
//! reported `Running` and resume there on the next tick, without re-running the children
//! before it. The reactive variants re-evaluate from the first child every tick, so an
//! earlier condition can abort a running branch.

use arbor_core::{TaskStatus, TickContext};

use crate::task::Task;

/// Ordered, fixed child list shared by every composite policy.
pub struct Composite<B: 'static> {
    children: Vec<Box<dyn Task<B>>>,
}

impl<B: 'static> Composite<B> {
    pub fn new(children: Vec<Box<dyn Task<B>>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn execute_child(
        &mut self,
        index: usize,
        ctx: &TickContext,
        blackboard: &mut B,
    ) -> TaskStatus {
        self.children[index].execute(ctx, blackboard)
    }

    pub(crate) fn reset_child(&mut self, index: usize) {
        self.children[index].reset();
    }

    pub fn reset_all(&mut self) {
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

/// AND composite. Fails on the first failing child, succeeds when all children succeed.
///
/// An empty sequence succeeds.
pub struct Sequence<B: 'static> {
    base: Composite<B>,
    cursor: usize,
}

impl<B: 'static> Sequence<B> {
    pub fn new(children: Vec<Box<dyn Task<B>>>) -> Self {
        Self {
            base: Composite::new(children),
            cursor: 0,
        }
    }

    /// Index of the child the next `execute` starts at.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

impl<B: 'static> Task<B> for Sequence<B> {
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus {
        while self.cursor < self.base.len() {
            match self.base.execute_child(self.cursor, ctx, blackboard) {
                TaskStatus::Running => return TaskStatus::Running,
                TaskStatus::Failure => {
                    self.reset();
                    return TaskStatus::Failure;
                }
                TaskStatus::Success => self.cursor += 1,
            }
        }

        self.reset();
        TaskStatus::Success
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.base.reset_all();
    }
}

/// OR composite. Succeeds on the first succeeding child, fails when all children fail.
///
/// An empty selector fails.
pub struct Selector<B: 'static> {
    base: Composite<B>,
    cursor: usize,
}

impl<B: 'static> Selector<B> {
    pub fn new(children: Vec<Box<dyn Task<B>>>) -> Self {
        Self {
            base: Composite::new(children),
            cursor: 0,
        }
    }

    /// Index of the child the next `execute` starts at.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

impl<B: 'static> Task<B> for Selector<B> {
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus {
        while self.cursor < self.base.len() {
            match self.base.execute_child(self.cursor, ctx, blackboard) {
                TaskStatus::Running => return TaskStatus::Running,
                TaskStatus::Success => {
                    self.reset();
                    return TaskStatus::Success;
                }
                TaskStatus::Failure => self.cursor += 1,
            }
        }

        self.reset();
        TaskStatus::Failure
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.base.reset_all();
    }
}

/// AND composite that re-checks every child from the first one on each tick.
///
/// A child that starts running preempts the one that was running before, which is reset.
pub struct ReactiveSequence<B: 'static> {
    base: Composite<B>,
    running: Option<usize>,
}

impl<B: 'static> ReactiveSequence<B> {
    pub fn new(children: Vec<Box<dyn Task<B>>>) -> Self {
        Self {
            base: Composite::new(children),
            running: None,
        }
    }

    pub fn running_child(&self) -> Option<usize> {
        self.running
    }
}

impl<B: 'static> Task<B> for ReactiveSequence<B> {
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus {
        for i in 0..self.base.len() {
            match self.base.execute_child(i, ctx, blackboard) {
                TaskStatus::Failure => {
                    self.reset();
                    return TaskStatus::Failure;
                }
                TaskStatus::Running => {
                    if self.running != Some(i) {
                        if let Some(prev) = self.running {
                            self.base.reset_child(prev);
                        }
                        self.running = Some(i);
                    }
                    return TaskStatus::Running;
                }
                TaskStatus::Success => continue,
            }
        }

        self.reset();
        TaskStatus::Success
    }

    fn reset(&mut self) {
        self.running = None;
        self.base.reset_all();
    }
}

/// OR composite that re-checks every child from the first one on each tick, so a
/// higher-priority branch takes over as soon as it stops failing.
pub struct ReactiveSelector<B: 'static> {
    base: Composite<B>,
    running: Option<usize>,
}

impl<B: 'static> ReactiveSelector<B> {
    pub fn new(children: Vec<Box<dyn Task<B>>>) -> Self {
        Self {
            base: Composite::new(children),
            running: None,
        }
    }

    pub fn running_child(&self) -> Option<usize> {
        self.running
    }
}

impl<B: 'static> Task<B> for ReactiveSelector<B> {
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus {
        for i in 0..self.base.len() {
            match self.base.execute_child(i, ctx, blackboard) {
                TaskStatus::Failure => continue,
                TaskStatus::Success => {
                    self.reset();
                    return TaskStatus::Success;
                }
                TaskStatus::Running => {
                    if self.running != Some(i) {
                        if let Some(prev) = self.running {
                            self.base.reset_child(prev);
                        }
                        self.running = Some(i);
                    }
                    return TaskStatus::Running;
                }
            }
        }

        self.reset();
        TaskStatus::Failure
    }

    fn reset(&mut self) {
        self.running = None;
        self.base.reset_all();
    }
}
