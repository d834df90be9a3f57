//! Decorator nodes.
//!
//! Decorators wrap a single child and rewrite its result. `Running` always passes through.

use arbor_core::{TaskStatus, TickContext};

use crate::task::Task;

/// Swaps `Success` and `Failure`.
pub struct Inverter<B: 'static> {
    child: Box<dyn Task<B>>,
}

impl<B: 'static> Inverter<B> {
    pub fn new(child: Box<dyn Task<B>>) -> Self {
        Self { child }
    }
}

impl<B: 'static> Task<B> for Inverter<B> {
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus {
        self.child.execute(ctx, blackboard).invert()
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Reports `Success` whenever the child finishes, whatever its result.
///
/// Useful for optional steps that must not break an enclosing sequence.
pub struct AlwaysSucceed<B: 'static> {
    child: Box<dyn Task<B>>,
}

impl<B: 'static> AlwaysSucceed<B> {
    pub fn new(child: Box<dyn Task<B>>) -> Self {
        Self { child }
    }
}

impl<B: 'static> Task<B> for AlwaysSucceed<B> {
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus {
        match self.child.execute(ctx, blackboard) {
            TaskStatus::Running => TaskStatus::Running,
            TaskStatus::Success | TaskStatus::Failure => TaskStatus::Success,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Runs the child until it has succeeded `times` times, one completion per tick at most.
///
/// Fails as soon as the child fails. `times == 0` succeeds without running the child.
pub struct Repeat<B: 'static> {
    child: Box<dyn Task<B>>,
    times: u32,
    completed: u32,
}

impl<B: 'static> Repeat<B> {
    pub fn new(child: Box<dyn Task<B>>, times: u32) -> Self {
        Self {
            child,
            times,
            completed: 0,
        }
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }
}

impl<B: 'static> Task<B> for Repeat<B> {
    fn execute(&mut self, ctx: &TickContext, blackboard: &mut B) -> TaskStatus {
        if self.completed >= self.times {
            self.reset();
            return TaskStatus::Success;
        }

        match self.child.execute(ctx, blackboard) {
            TaskStatus::Running => TaskStatus::Running,
            TaskStatus::Failure => {
                self.reset();
                TaskStatus::Failure
            }
            TaskStatus::Success => {
                self.completed += 1;
                if self.completed >= self.times {
                    self.reset();
                    TaskStatus::Success
                } else {
                    self.child.reset();
                    TaskStatus::Running
                }
            }
        }
    }

    fn reset(&mut self) {
        self.completed = 0;
        self.child.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{Action, Condition};

    struct TestContext {
        value: i32,
    }

    fn ctx() -> TickContext {
        TickContext::new(0, 0.016, 0)
    }

    fn is_positive() -> Box<dyn Task<TestContext>> {
        Box::new(Condition::from_predicate(
            |_ctx: &TickContext, bb: &TestContext| bb.value > 0,
        ))
    }

    fn increment(status: TaskStatus) -> Box<dyn Task<TestContext>> {
        Box::new(Action::new(move |_ctx: &TickContext, bb: &mut TestContext| {
            bb.value += 1;
            status
        }))
    }

    #[test]
    fn inverter_inverts_success() {
        let mut inverter = Inverter::new(is_positive());

        let mut bb = TestContext { value: 10 };
        assert_eq!(inverter.execute(&ctx(), &mut bb), TaskStatus::Failure);
    }

    #[test]
    fn inverter_inverts_failure() {
        let mut inverter = Inverter::new(is_positive());

        let mut bb = TestContext { value: -10 };
        assert_eq!(inverter.execute(&ctx(), &mut bb), TaskStatus::Success);
    }

    #[test]
    fn inverter_passes_running() {
        let mut inverter = Inverter::new(increment(TaskStatus::Running));

        let mut bb = TestContext { value: 0 };
        assert_eq!(inverter.execute(&ctx(), &mut bb), TaskStatus::Running);
    }

    #[test]
    fn always_succeed_on_failure() {
        let mut always = AlwaysSucceed::new(increment(TaskStatus::Failure));

        let mut bb = TestContext { value: 0 };
        assert_eq!(always.execute(&ctx(), &mut bb), TaskStatus::Success);
        assert_eq!(bb.value, 1); // Child still executed
    }

    #[test]
    fn repeat_runs_child_n_times() {
        let mut repeat = Repeat::new(increment(TaskStatus::Success), 3);

        let mut bb = TestContext { value: 0 };
        assert_eq!(repeat.execute(&ctx(), &mut bb), TaskStatus::Running);
        assert_eq!(repeat.execute(&ctx(), &mut bb), TaskStatus::Running);
        assert_eq!(repeat.completed(), 2);
        assert_eq!(repeat.execute(&ctx(), &mut bb), TaskStatus::Success);
        assert_eq!(bb.value, 3);
        assert_eq!(repeat.completed(), 0);
    }

    #[test]
    fn repeat_stops_on_failure() {
        let mut repeat = Repeat::new(increment(TaskStatus::Failure), 3);

        let mut bb = TestContext { value: 0 };
        assert_eq!(repeat.execute(&ctx(), &mut bb), TaskStatus::Failure);
        assert_eq!(bb.value, 1);
    }

    #[test]
    fn repeat_zero_skips_child() {
        let mut repeat = Repeat::new(increment(TaskStatus::Success), 0);

        let mut bb = TestContext { value: 0 };
        assert_eq!(repeat.execute(&ctx(), &mut bb), TaskStatus::Success);
        assert_eq!(bb.value, 0);
    }
}
