use crate::binding::{BoxedTask, TaskFn};
use crate::error::{Result, RunnerError, TaskFailure};
use crate::runner::state::BatchState;

use std::mem;

use tracing::trace;

/// One-shot storage for a task's outcome.
///
/// Written at most once per batch by the task's worker (or by the runner
/// when the worker failed), then moved out at most once.
pub(crate) enum ResultCell<R> {
    /// Nothing written yet.
    Empty,

    /// The task returned normally.
    Ready(R),

    /// The task panicked or could not be started.
    Failed(TaskFailure),

    /// The outcome was already consumed.
    Taken,
}

impl<R> ResultCell<R> {
    /// The ready flag: `true` once the task has finished, successfully or not.
    pub(crate) fn is_ready(&self) -> bool {
        matches!(self, ResultCell::Ready(_) | ResultCell::Failed(_))
    }

    /// Checks that the cell can be consumed without consuming it.
    pub(crate) fn check(&self) -> Result<()> {
        match self {
            ResultCell::Ready(_) => Ok(()),
            ResultCell::Failed(failure) => Err(failure.clone().into()),
            ResultCell::Taken => Err(RunnerError::AlreadyConsumed),
            ResultCell::Empty => Err(RunnerError::NotCompleted {
                state: BatchState::Configured,
            }),
        }
    }

    /// Moves the outcome out, leaving [`ResultCell::Taken`] behind.
    ///
    /// An unwritten cell is left untouched.
    pub(crate) fn take(&mut self) -> Result<R> {
        match mem::replace(self, ResultCell::Taken) {
            ResultCell::Ready(value) => Ok(value),
            ResultCell::Failed(failure) => Err(failure.into()),
            ResultCell::Taken => Err(RunnerError::AlreadyConsumed),
            ResultCell::Empty => {
                *self = ResultCell::Empty;
                Err(RunnerError::NotCompleted {
                    state: BatchState::Configured,
                })
            }
        }
    }
}

/// A fixed position in the batch: one task and its result cell.
pub(crate) struct Slot<Args, R> {
    /// Position of the slot; the ordering key for results.
    index: usize,

    task: Option<BoxedTask<Args, R>>,

    pub(crate) cell: ResultCell<R>,
}

impl<Args, R> Slot<Args, R> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            task: None,
            cell: ResultCell::Empty,
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// Replaces the task and forgets any previous outcome.
    pub(crate) fn install(&mut self, task: BoxedTask<Args, R>) {
        self.task = Some(task);
        self.cell = ResultCell::Empty;
    }

    /// Drops the task and any previous outcome.
    pub(crate) fn clear(&mut self) {
        self.task = None;
        self.cell = ResultCell::Empty;
    }

    /// Forgets the previous outcome, keeping the task for another run.
    pub(crate) fn reset(&mut self) {
        self.cell = ResultCell::Empty;
    }

    /// Runs the task with its bound arguments and stores the result.
    ///
    /// If the task panics the cell stays [`ResultCell::Empty`]; the caller
    /// catches the panic and records it with [`Slot::fail`].
    pub(crate) fn execute(&mut self, args: Args) {
        let Some(task) = self.task.as_ref() else {
            self.cell = ResultCell::Failed(TaskFailure::new(self.index, "no task installed"));
            return;
        };

        trace!(slot = self.index, "task started");
        let value = TaskFn::call(&**task, args);
        trace!(slot = self.index, "task finished");

        self.cell = ResultCell::Ready(value);
    }

    pub(crate) fn fail(&mut self, failure: TaskFailure) {
        self.cell = ResultCell::Failed(failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(x: i32) -> i32 {
        x * 2
    }

    #[test]
    fn cell_is_consumed_once() {
        let mut slot: Slot<(i32,), i32> = Slot::new(0);
        slot.install(Box::new(double));

        assert!(!slot.cell.is_ready());
        slot.execute((21,));
        assert!(slot.cell.is_ready());

        assert_eq!(slot.cell.check(), Ok(()));
        assert_eq!(slot.cell.take(), Ok(42));
        assert_eq!(slot.cell.take(), Err(RunnerError::AlreadyConsumed));
    }

    #[test]
    fn failure_is_surfaced_on_take() {
        let mut slot: Slot<(i32,), i32> = Slot::new(3);
        slot.install(Box::new(double));
        slot.fail(TaskFailure::new(3, "exploded"));

        assert!(slot.cell.is_ready());
        assert_eq!(
            slot.cell.take(),
            Err(RunnerError::TaskFailed {
                slot: 3,
                message: "exploded".to_string()
            })
        );
    }

    #[test]
    fn unwritten_cell_survives_take() {
        let mut slot: Slot<(i32,), i32> = Slot::new(0);
        slot.install(Box::new(double));

        assert!(matches!(
            slot.cell.take(),
            Err(RunnerError::NotCompleted { .. })
        ));
        assert!(matches!(slot.cell, ResultCell::Empty));
    }

    #[test]
    fn executing_without_task_fails_the_slot() {
        let mut slot: Slot<(i32,), i32> = Slot::new(1);
        slot.execute((1,));

        assert!(matches!(
            slot.cell.take(),
            Err(RunnerError::TaskFailed { slot: 1, .. })
        ));
    }

    #[test]
    fn reinstall_resets_outcome() {
        let mut slot: Slot<(i32,), i32> = Slot::new(0);
        slot.install(Box::new(double));
        slot.execute((1,));

        slot.install(Box::new(|x: i32| x + 100));
        assert!(!slot.cell.is_ready());

        slot.execute((1,));
        assert_eq!(slot.cell.take(), Ok(101));
    }
}
