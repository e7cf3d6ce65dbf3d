use task_runner::{BatchState, RunnerError, SerialTaskRunner};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, ThreadId};

fn add(x: i32, y: i32) -> i32 {
    x + y
}

fn sub(x: i32, y: i32) -> i32 {
    x - y
}

fn mul(x: i32, y: i32) -> i32 {
    x * y
}

fn rem(x: i32, y: i32) -> i32 {
    x % y
}

#[test]
fn test_serial_collect() {
    let mut runner = SerialTaskRunner::<(i32, i32), i32, 4>::new();
    runner.configure_fixed([add, sub, mul, rem]);
    runner.run((5, 10)).unwrap();

    assert_eq!(runner.collect().unwrap(), vec![15, -5, 50, 5]);
}

#[test]
fn test_serial_reduce() {
    let mut runner = SerialTaskRunner::<(i32, i32), i32, 8>::new();
    runner.configure_fixed([add, sub, mul, rem, add, sub, mul, rem]);

    runner.run((5, 10)).unwrap();
    assert_eq!(runner.reduce().unwrap(), 130);

    runner.run((5, 10)).unwrap();
    assert_eq!(runner.reduce_with(|acc, value| acc.max(value)).unwrap(), 50);
}

#[test]
fn test_serial_dynamic_too_short() {
    let tasks: Vec<fn(i32, i32) -> i32> = vec![add, sub, mul];

    let mut runner = SerialTaskRunner::<(i32, i32), i32, 4>::new();

    assert_eq!(
        runner.configure_dynamic(tasks),
        Err(RunnerError::ConfigSize {
            expected: 4,
            actual: 3
        })
    );
    assert_eq!(runner.state(), BatchState::Empty);
    assert_eq!(runner.run((1, 2)), Err(RunnerError::NotConfigured));
}

fn current_thread() -> ThreadId {
    thread::current().id()
}

#[test]
fn test_serial_runs_on_caller_thread() {
    let mut runner = SerialTaskRunner::<(), ThreadId, 3>::new();
    runner.configure_fixed([current_thread; 3]);
    runner.run(()).unwrap();

    let caller = thread::current().id();
    assert!(runner.collect().unwrap().iter().all(|id| *id == caller));
}

#[test]
fn test_serial_runs_in_slot_order() {
    let clock = Arc::new(AtomicUsize::new(0));

    let tasks = (0..5).map(|_| {
        Box::new(|clock: Arc<AtomicUsize>| clock.fetch_add(1, Ordering::SeqCst))
            as Box<dyn Fn(Arc<AtomicUsize>) -> usize + Send>
    });

    let mut runner = SerialTaskRunner::<(Arc<AtomicUsize>,), usize, 5>::new();
    runner.configure_dynamic(tasks).unwrap();
    runner.run((clock,)).unwrap();

    assert_eq!(runner.collect().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_serial_failure_does_not_stop_later_slots() {
    let ran = Arc::new(AtomicUsize::new(0));

    let tick = |ran: Arc<AtomicUsize>| -> usize { ran.fetch_add(1, Ordering::SeqCst) + 1 };
    let tasks: [Box<dyn Fn(Arc<AtomicUsize>) -> usize + Send>; 3] = [
        Box::new(|_: Arc<AtomicUsize>| -> usize { panic!("first slot failed") }),
        Box::new(tick),
        Box::new(tick),
    ];

    let mut runner = SerialTaskRunner::<(Arc<AtomicUsize>,), usize, 3>::new();
    runner.configure_fixed(tasks);
    runner.run((ran.clone(),)).unwrap();

    assert_eq!(ran.load(Ordering::SeqCst), 2);
    assert_eq!(
        runner.collect(),
        Err(RunnerError::TaskFailed {
            slot: 0,
            message: "first slot failed".to_string()
        })
    );
    assert_eq!(runner.take(1), Ok(1));
    assert_eq!(runner.take(2), Ok(2));
}

#[test]
fn test_serial_state_transitions() {
    let mut runner = SerialTaskRunner::<(i32, i32), i32, 2>::new();
    assert_eq!(runner.state(), BatchState::Empty);

    runner.configure_fixed([add, mul]);
    assert_eq!(runner.state(), BatchState::Configured);
    assert!(!runner.is_ready(0));

    runner.run((3, 3)).unwrap();
    assert_eq!(runner.state(), BatchState::Completed);
    assert!(runner.is_ready(0) && runner.is_ready(1));

    assert_eq!(runner.reduce().unwrap(), 15);
    assert_eq!(runner.state(), BatchState::Consumed);
    assert_eq!(runner.collect(), Err(RunnerError::AlreadyConsumed));

    runner.configure_fixed([sub, rem]);
    assert_eq!(runner.state(), BatchState::Configured);
}

#[test]
fn test_serial_zero_tasks() {
    let mut runner = SerialTaskRunner::<(i32,), i32, 0>::default();
    runner.configure_fixed::<fn(i32) -> i32>([]);
    runner.run((1,)).unwrap();

    assert_eq!(runner.reduce().unwrap(), 0);
    assert!(runner.is_empty());
}
