use arbor_core::{TaskStatus, TickContext};

/// A behavior tree node.
///
/// `B` is the blackboard type of the owning tree. Every node of a tree sees the same
/// blackboard, and nothing outside that tree does.
pub trait Task<B>: 'static
where
    B: 'static,
{
    /// Runs the node for one tick.
    ///
    /// Must not block. Work that spans several frames returns [`TaskStatus::Running`] and
    /// continues on the next call.
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus;

    /// Drops any in-progress state so the next `execute` starts from scratch.
    fn reset(&mut self);
}

impl<B: 'static> Task<B> for Box<dyn Task<B>> {
    #[inline]
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus {
        (**self).execute(ctx, blackboard)
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset();
    }
}
