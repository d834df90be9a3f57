//! Leaf nodes.
//!
//! Leaves wrap host callbacks. The runtime never looks inside them; it only consumes the
//! returned [`TaskStatus`]. A leaf built without a callback always fails.

use arbor_core::{TaskStatus, TickContext};

use crate::task::Task;

type ActionFn<B> = Box<dyn FnMut(&TickContext, &mut B) -> TaskStatus>;
type ConditionFn<B> = Box<dyn FnMut(&TickContext, &B) -> TaskStatus>;

/// Side-effecting leaf: may mutate the blackboard and call out to collaborators.
pub struct Action<B: 'static> {
    callback: Option<ActionFn<B>>,
}

impl<B: 'static> Action<B> {
    pub fn new(callback: impl FnMut(&TickContext, &mut B) -> TaskStatus + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// An action with nothing to do. Always returns `Failure`.
    pub fn empty() -> Self {
        Self { callback: None }
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl<B: 'static> Default for Action<B> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<B: 'static> Task<B> for Action<B> {
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus {
        match self.callback.as_mut() {
            Some(callback) => callback(ctx, blackboard),
            None => TaskStatus::Failure,
        }
    }

    fn reset(&mut self) {}
}

/// Check leaf. Only gets shared access to the blackboard.
pub struct Condition<B: 'static> {
    callback: Option<ConditionFn<B>>,
}

impl<B: 'static> Condition<B> {
    pub fn new(callback: impl FnMut(&TickContext, &B) -> TaskStatus + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Maps `true` to `Success` and `false` to `Failure`.
    pub fn from_predicate(mut pred: impl FnMut(&TickContext, &B) -> bool + 'static) -> Self {
        Self::new(move |ctx, bb| TaskStatus::from(pred(ctx, bb)))
    }

    /// A condition with nothing to check. Always returns `Failure`.
    pub fn empty() -> Self {
        Self { callback: None }
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl<B: 'static> Default for Condition<B> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<B: 'static> Task<B> for Condition<B> {
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus {
        match self.callback.as_mut() {
            Some(callback) => callback(ctx, &*blackboard),
            None => TaskStatus::Failure,
        }
    }

    fn reset(&mut self) {}
}

/// Stays `Running` until `duration` seconds of tick deltas have accumulated, then succeeds
/// and rearms.
///
/// Negative and non-finite durations are treated as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Wait {
    duration: f32,
    elapsed: f32,
}

impl Wait {
    pub fn new(duration_seconds: f32) -> Self {
        let duration = if duration_seconds.is_finite() {
            duration_seconds.max(0.0)
        } else {
            0.0
        };
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl<B: 'static> Task<B> for Wait {
    fn execute(&mut self, ctx: &TickContext, _blackboard: &mut B) -> TaskStatus {
        self.elapsed += ctx.dt_seconds.max(0.0);
        if self.elapsed >= self.duration {
            self.elapsed = 0.0;
            TaskStatus::Success
        } else {
            TaskStatus::Running
        }
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(dt: f32) -> TickContext {
        TickContext::new(0, dt, 0)
    }

    #[test]
    fn empty_leaves_fail_for_any_delta() {
        let mut action = Action::<()>::empty();
        let mut condition = Condition::<()>::default();
        assert!(!action.has_callback());

        for dt in [0.0, 0.016, 1.0, 1000.0] {
            assert_eq!(action.execute(&ctx(dt), &mut ()), TaskStatus::Failure);
            assert_eq!(condition.execute(&ctx(dt), &mut ()), TaskStatus::Failure);
        }
    }

    #[test]
    fn action_returns_callback_status_and_mutates_blackboard() {
        let mut action = Action::new(|_ctx: &TickContext, hits: &mut u32| {
            *hits += 1;
            TaskStatus::Running
        });

        let mut hits = 0;
        assert_eq!(action.execute(&ctx(0.016), &mut hits), TaskStatus::Running);
        assert_eq!(action.execute(&ctx(0.016), &mut hits), TaskStatus::Running);
        assert_eq!(hits, 2);
    }

    #[test]
    fn condition_from_predicate() {
        let mut positive = Condition::from_predicate(|_ctx: &TickContext, v: &i32| *v > 0);

        assert_eq!(positive.execute(&ctx(0.0), &mut 5), TaskStatus::Success);
        assert_eq!(positive.execute(&ctx(0.0), &mut -5), TaskStatus::Failure);
    }

    #[test]
    fn wait_accumulates_delta_and_rearms() {
        let mut wait = Wait::new(0.5);

        assert_eq!(Task::<()>::execute(&mut wait, &ctx(0.2), &mut ()), TaskStatus::Running);
        assert_eq!(Task::<()>::execute(&mut wait, &ctx(0.2), &mut ()), TaskStatus::Running);
        assert_eq!(Task::<()>::execute(&mut wait, &ctx(0.2), &mut ()), TaskStatus::Success);
        assert_eq!(wait.elapsed(), 0.0);

        assert_eq!(Task::<()>::execute(&mut wait, &ctx(0.2), &mut ()), TaskStatus::Running);
        Task::<()>::reset(&mut wait);
        assert_eq!(wait.elapsed(), 0.0);
    }

    #[test]
    fn zero_wait_succeeds_immediately() {
        let mut wait = Wait::new(0.0);
        assert_eq!(Task::<()>::execute(&mut wait, &ctx(0.0), &mut ()), TaskStatus::Success);
    }

    #[test]
    fn non_finite_wait_succeeds_immediately() {
        for duration in [f32::NAN, f32::INFINITY, -1.0] {
            let mut wait = Wait::new(duration);
            assert_eq!(wait.duration(), 0.0);
            assert_eq!(
                Task::<()>::execute(&mut wait, &ctx(0.016), &mut ()),
                TaskStatus::Success
            );
        }
    }
}
