use arbor_bt::builder::{action, condition, reactive_selector, reactive_sequence};
use arbor_bt::{
    ReactiveSelector, ReactiveSequence, Selector, Sequence, Task, TaskStatus, TickContext, Wait,
};

/// Records which leaves ran, in order.
#[derive(Default)]
struct Log {
    entries: Vec<&'static str>,
    gate_open: bool,
}

fn record(tag: &'static str, status: TaskStatus) -> Box<dyn Task<Log>> {
    action(move |_ctx: &TickContext, log: &mut Log| {
        log.entries.push(tag);
        status
    })
}

/// Running for `ticks` executions, then Success.
fn record_running_for(tag: &'static str, ticks: u32) -> Box<dyn Task<Log>> {
    let mut remaining = ticks;
    action(move |_ctx: &TickContext, log: &mut Log| {
        log.entries.push(tag);
        if remaining == 0 {
            TaskStatus::Success
        } else {
            remaining -= 1;
            TaskStatus::Running
        }
    })
}

fn frame(dt: f32) -> TickContext {
    TickContext::new(0, dt, 0)
}

#[test]
fn sequence_resumes_at_running_child() {
    let mut seq = Sequence::new(vec![
        record("check", TaskStatus::Success),
        record_running_for("walk", 2),
        record("arrive", TaskStatus::Success),
    ]);
    let mut log = Log::default();

    assert_eq!(seq.execute(&frame(0.1), &mut log), TaskStatus::Running);
    assert_eq!(seq.cursor(), 1);
    assert_eq!(seq.execute(&frame(0.1), &mut log), TaskStatus::Running);
    assert_eq!(seq.execute(&frame(0.1), &mut log), TaskStatus::Success);
    assert_eq!(seq.cursor(), 0);

    // "check" ran once; later siblings never ran while "walk" was running.
    assert_eq!(log.entries, vec!["check", "walk", "walk", "walk", "arrive"]);
}

#[test]
fn selector_resumes_at_running_child() {
    let mut sel = Selector::new(vec![
        record("first", TaskStatus::Failure),
        record_running_for("second", 1),
        record("third", TaskStatus::Success),
    ]);
    let mut log = Log::default();

    assert_eq!(sel.execute(&frame(0.1), &mut log), TaskStatus::Running);
    assert_eq!(sel.cursor(), 1);
    assert_eq!(sel.execute(&frame(0.1), &mut log), TaskStatus::Success);

    assert_eq!(log.entries, vec!["first", "second", "second"]);
}

#[test]
fn sequence_restarts_from_first_child_after_completion() {
    let mut seq = Sequence::new(vec![
        record("a", TaskStatus::Success),
        Box::new(Wait::new(0.25)),
    ]);
    let mut log = Log::default();

    assert_eq!(seq.execute(&frame(0.2), &mut log), TaskStatus::Running);
    assert_eq!(seq.execute(&frame(0.2), &mut log), TaskStatus::Success);
    assert_eq!(seq.execute(&frame(0.2), &mut log), TaskStatus::Running);

    assert_eq!(log.entries, vec!["a", "a"]);
}

#[test]
fn reset_drops_resume_cursor() {
    let mut seq = Sequence::new(vec![
        record("a", TaskStatus::Success),
        Box::new(Wait::new(1.0)),
    ]);
    let mut log = Log::default();

    assert_eq!(seq.execute(&frame(0.5), &mut log), TaskStatus::Running);
    seq.reset();
    assert_eq!(seq.cursor(), 0);
    assert_eq!(seq.execute(&frame(0.5), &mut log), TaskStatus::Running);

    // The wait restarted too, so one more half-second is not enough to finish.
    assert_eq!(log.entries, vec!["a", "a"]);
}

#[test]
fn reactive_sequence_rechecks_conditions_every_tick() {
    let mut seq = reactive_sequence(vec![
        condition(|_ctx: &TickContext, log: &Log| TaskStatus::from(log.gate_open)),
        record("work", TaskStatus::Running),
    ]);
    let mut log = Log {
        gate_open: true,
        ..Default::default()
    };

    assert_eq!(seq.execute(&frame(0.1), &mut log), TaskStatus::Running);
    assert_eq!(seq.execute(&frame(0.1), &mut log), TaskStatus::Running);

    log.gate_open = false;
    assert_eq!(seq.execute(&frame(0.1), &mut log), TaskStatus::Failure);
    assert_eq!(log.entries, vec!["work", "work"]);
}

#[test]
fn reactive_selector_resets_preempted_branch() {
    // The low-priority branch is a Wait: if it is not reset on preemption, it would finish
    // early when it resumes.
    let mut sel = reactive_selector(vec![
        condition(|_ctx: &TickContext, log: &Log| TaskStatus::from(log.gate_open)),
        Box::new(Wait::new(0.3)),
    ]);
    let mut log = Log::default();

    assert_eq!(sel.execute(&frame(0.2), &mut log), TaskStatus::Running);

    log.gate_open = true;
    assert_eq!(sel.execute(&frame(0.2), &mut log), TaskStatus::Success);

    log.gate_open = false;
    assert_eq!(sel.execute(&frame(0.2), &mut log), TaskStatus::Running);
    assert_eq!(sel.execute(&frame(0.2), &mut log), TaskStatus::Success);
}

/// Running while the gate is open, Failure otherwise.
fn busy_while_open() -> Box<dyn Task<Log>> {
    action(|_ctx: &TickContext, log: &mut Log| {
        if log.gate_open {
            TaskStatus::Running
        } else {
            TaskStatus::Failure
        }
    })
}

/// Running while the gate is closed, Success otherwise.
fn pass_while_open() -> Box<dyn Task<Log>> {
    action(|_ctx: &TickContext, log: &mut Log| {
        if log.gate_open {
            TaskStatus::Success
        } else {
            TaskStatus::Running
        }
    })
}

#[test]
fn reactive_selector_resets_branch_preempted_by_running_child() {
    let mut sel = ReactiveSelector::new(vec![busy_while_open(), Box::new(Wait::new(0.3))]);
    let mut log = Log::default();

    assert_eq!(sel.execute(&frame(0.2), &mut log), TaskStatus::Running);
    assert_eq!(sel.running_child(), Some(1));

    log.gate_open = true;
    assert_eq!(sel.execute(&frame(0.2), &mut log), TaskStatus::Running);
    assert_eq!(sel.running_child(), Some(0));

    // The wait was reset when it lost the running slot, so 0.2s more is not enough.
    log.gate_open = false;
    assert_eq!(sel.execute(&frame(0.2), &mut log), TaskStatus::Running);
    assert_eq!(sel.running_child(), Some(1));
    assert_eq!(sel.execute(&frame(0.2), &mut log), TaskStatus::Success);
    assert_eq!(sel.running_child(), None);
}

#[test]
fn reactive_sequence_resets_branch_preempted_by_running_child() {
    let mut seq = ReactiveSequence::new(vec![pass_while_open(), Box::new(Wait::new(0.3))]);
    let mut log = Log {
        gate_open: true,
        ..Default::default()
    };

    assert_eq!(seq.execute(&frame(0.2), &mut log), TaskStatus::Running);
    assert_eq!(seq.running_child(), Some(1));

    log.gate_open = false;
    assert_eq!(seq.execute(&frame(0.2), &mut log), TaskStatus::Running);
    assert_eq!(seq.running_child(), Some(0));

    log.gate_open = true;
    assert_eq!(seq.execute(&frame(0.2), &mut log), TaskStatus::Running);
    assert_eq!(seq.running_child(), Some(1));
    assert_eq!(seq.execute(&frame(0.2), &mut log), TaskStatus::Success);
}
