use std::borrow::Cow;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use arbor_core::{TaskStatus, TickContext};

use crate::scheduler::Scheduler;
use crate::task::Task;

/// Anything the [`Scheduler`] can drive once per tick.
pub trait Runnable {
    fn name(&self) -> &str;

    fn run(&mut self, ctx: &TickContext) -> TaskStatus;
}

/// One behavior tree: a root task plus the blackboard its leaves share.
pub struct Tree<B: 'static> {
    name: Cow<'static, str>,
    root: Box<dyn Task<B>>,
    blackboard: B,
    last_status: Option<TaskStatus>,
    last_tick: Option<u64>,
    runs: u64,
    elapsed_seconds: f64,
    /// Set by [`TreeHandle::stop`] when the tree could not be reset in place.
    reset_pending: Rc<Cell<bool>>,
}

impl<B: 'static> Tree<B> {
    pub fn new(name: impl Into<Cow<'static, str>>, root: Box<dyn Task<B>>, blackboard: B) -> Self {
        Self {
            name: name.into(),
            root,
            blackboard,
            last_status: None,
            last_tick: None,
            runs: 0,
            elapsed_seconds: 0.0,
            reset_pending: Rc::new(Cell::new(false)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn blackboard(&self) -> &B {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut B {
        &mut self.blackboard
    }

    /// Status the root reported on the most recent run. Diagnostic only.
    pub fn last_status(&self) -> Option<TaskStatus> {
        self.last_status
    }

    /// Scheduler tick of the most recent run.
    pub fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Sum of all deltas this tree has been run with.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// Executes the root once.
    ///
    /// The root has no parent to report to; the status is only recorded. A finished root is
    /// reset so the next run starts from the first child again.
    pub fn run(&mut self, ctx: &TickContext) -> TaskStatus {
        if self.reset_pending.get() {
            self.reset();
        }

        let status = self.root.execute(ctx, &mut self.blackboard);
        if status.is_done() {
            self.root.reset();
        }

        self.last_status = Some(status);
        self.last_tick = Some(ctx.tick);
        self.runs += 1;
        self.elapsed_seconds += f64::from(ctx.dt_seconds);
        status
    }

    /// Drops all in-progress state of the root task. The blackboard is left untouched.
    pub fn reset(&mut self) {
        self.root.reset();
        self.last_status = None;
        self.reset_pending.set(false);
    }

    /// Whether a reset requested by [`TreeHandle::stop`] is still waiting for the next run.
    pub fn is_reset_pending(&self) -> bool {
        self.reset_pending.get()
    }
}

impl<B: Default + 'static> Tree<B> {
    pub fn with_default_blackboard(
        name: impl Into<Cow<'static, str>>,
        root: Box<dyn Task<B>>,
    ) -> Self {
        Self::new(name, root, B::default())
    }
}

impl<B: 'static> Runnable for Tree<B> {
    fn name(&self) -> &str {
        Tree::name(self)
    }

    fn run(&mut self, ctx: &TickContext) -> TaskStatus {
        Tree::run(self, ctx)
    }
}

impl<B: 'static> fmt::Debug for Tree<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("name", &self.name)
            .field("last_status", &self.last_status)
            .field("last_tick", &self.last_tick)
            .field("runs", &self.runs)
            .finish_non_exhaustive()
    }
}

/// Shared handle to a [`Tree`], held by the tree's owner.
///
/// A [`Scheduler`] only keeps a weak reference: dropping every handle drops the tree, and
/// the scheduler forgets it on its next tick.
pub struct TreeHandle<B: 'static> {
    inner: Rc<RefCell<Tree<B>>>,
    reset_pending: Rc<Cell<bool>>,
}

impl<B: 'static> Clone for TreeHandle<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            reset_pending: Rc::clone(&self.reset_pending),
        }
    }
}

impl<B: 'static> TreeHandle<B> {
    pub fn new(tree: Tree<B>) -> Self {
        let reset_pending = Rc::clone(&tree.reset_pending);
        Self {
            inner: Rc::new(RefCell::new(tree)),
            reset_pending,
        }
    }

    /// Registers the tree with `scheduler`. Returns `false` if it was already registered.
    pub fn start(&self, scheduler: &mut Scheduler) -> bool {
        scheduler.add(self)
    }

    /// Unregisters the tree and resets its in-progress state so a later `start` begins
    /// fresh. Returns `false` if it was not registered.
    ///
    /// If the tree is borrowed at the time, the reset is deferred to the start of its next
    /// run.
    pub fn stop(&self, scheduler: &mut Scheduler) -> bool {
        let removed = scheduler.remove(self);
        if removed {
            match self.inner.try_borrow_mut() {
                Ok(mut tree) => tree.reset(),
                Err(_) => {
                    tracing::warn!("stopped tree is borrowed, deferring reset to its next run");
                    self.reset_pending.set(true);
                }
            }
        }
        removed
    }

    pub fn is_started(&self, scheduler: &Scheduler) -> bool {
        scheduler.contains(self)
    }

    /// # Panics
    ///
    /// Panics if the tree is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, Tree<B>> {
        self.inner.borrow()
    }

    /// # Panics
    ///
    /// Panics if the tree is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Tree<B>> {
        self.inner.borrow_mut()
    }

    pub fn with_blackboard<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(self.inner.borrow_mut().blackboard_mut())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn name_for_log(&self) -> String {
        self.inner
            .try_borrow()
            .map(|tree| tree.name().to_owned())
            .unwrap_or_default()
    }

    pub(crate) fn runnable(&self) -> Weak<RefCell<dyn Runnable>> {
        let rc: Rc<RefCell<dyn Runnable>> = self.inner.clone();
        Rc::downgrade(&rc)
    }
}

impl<B: 'static> fmt::Debug for TreeHandle<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(tree) => fmt::Debug::fmt(&*tree, f),
            Err(_) => f.write_str("TreeHandle(<borrowed>)"),
        }
    }
}
