use crate::binding::{BoxedTask, TaskFn};
use crate::error::{Result, RunnerError, TaskFailure};
use crate::runner::slot::Slot;
use crate::runner::state::BatchState;

use std::array;

use tracing::{debug, warn};

/// Slot storage and state machine shared by both runners.
///
/// The runners only differ in how `run` drives the slots; configuration
/// and consumption live here.
pub(crate) struct Batch<Args, R, const N: usize> {
    slots: [Slot<Args, R>; N],
    state: BatchState,
}

impl<Args, R, const N: usize> Batch<Args, R, N> {
    pub(crate) fn new() -> Self {
        Self {
            slots: array::from_fn(Slot::new),
            state: BatchState::Empty,
        }
    }

    pub(crate) fn state(&self) -> BatchState {
        self.state
    }

    pub(crate) fn is_ready(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .is_some_and(|slot| slot.cell.is_ready())
    }

    pub(crate) fn configure_fixed<F>(&mut self, tasks: [F; N])
    where
        F: TaskFn<Args, Output = R> + Send + 'static,
    {
        for (slot, task) in self.slots.iter_mut().zip(tasks) {
            slot.install(Box::new(task));
        }

        self.state = BatchState::Configured;
        debug!(tasks = N, "batch configured");
    }

    /// Installs the first `N` tasks of `tasks`.
    ///
    /// The iterator is never advanced past the `N`th item. Either every slot
    /// is replaced or, when fewer than `N` tasks are available, every slot is
    /// cleared and the batch reverts to [`BatchState::Empty`].
    pub(crate) fn configure_dynamic<I, F>(&mut self, tasks: I) -> Result<()>
    where
        I: IntoIterator<Item = F>,
        F: TaskFn<Args, Output = R> + Send + 'static,
    {
        let staged: Vec<BoxedTask<Args, R>> = tasks
            .into_iter()
            .take(N)
            .map(|task| Box::new(task) as BoxedTask<Args, R>)
            .collect();

        if staged.len() < N {
            warn!(
                expected = N,
                actual = staged.len(),
                "not enough tasks to fill the batch"
            );

            self.clear();
            return Err(RunnerError::ConfigSize {
                expected: N,
                actual: staged.len(),
            });
        }

        for (slot, task) in self.slots.iter_mut().zip(staged) {
            slot.install(task);
        }

        self.state = BatchState::Configured;
        debug!(tasks = N, "batch configured");

        Ok(())
    }

    /// Prepares every slot for a run and hands them to the caller.
    ///
    /// Results of a previous run are discarded here.
    pub(crate) fn begin_run(&mut self) -> Result<&mut [Slot<Args, R>; N]> {
        if !self.state.is_configured() {
            return Err(RunnerError::NotConfigured);
        }

        for slot in &mut self.slots {
            slot.reset();
        }

        Ok(&mut self.slots)
    }

    /// Records failures caught while running and closes the run.
    pub(crate) fn finish_run(&mut self, failures: Vec<TaskFailure>) {
        for failure in failures {
            warn!(slot = failure.slot(), reason = failure.message(), "task failed");

            if let Some(slot) = self.slots.get_mut(failure.slot()) {
                slot.fail(failure);
            }
        }

        self.state = BatchState::Completed;
        debug!(tasks = N, "batch completed");
    }

    /// Moves every result out in slot order.
    ///
    /// All cells are checked before any is consumed: if one holds a failure
    /// or was already taken, the error is returned and nothing changes.
    pub(crate) fn collect(&mut self) -> Result<Vec<R>> {
        self.ensure_completed()?;

        for slot in &self.slots {
            slot.cell.check()?;
        }

        let results = self
            .slots
            .iter_mut()
            .map(|slot| slot.cell.take())
            .collect::<Result<Vec<R>>>()?;

        self.state = BatchState::Consumed;

        Ok(results)
    }

    /// Left-folds the results in slot order, starting from `R::default()`.
    pub(crate) fn reduce_with<C>(&mut self, combine: C) -> Result<R>
    where
        R: Default,
        C: FnMut(R, R) -> R,
    {
        let results = self.collect()?;

        Ok(results.into_iter().fold(R::default(), combine))
    }

    /// Moves a single result out, leaving the other slots untouched.
    ///
    /// Taking the last outcome left in the batch consumes the batch.
    pub(crate) fn take(&mut self, index: usize) -> Result<R> {
        if index >= N {
            return Err(RunnerError::SlotOutOfRange { index, len: N });
        }

        self.ensure_completed()?;

        let outcome = self.slots[index].cell.take();

        if !self.slots.iter().any(|slot| slot.cell.is_ready()) {
            self.state = BatchState::Consumed;
            debug!(tasks = N, "batch consumed slot by slot");
        }

        outcome
    }

    fn ensure_completed(&self) -> Result<()> {
        match self.state {
            BatchState::Completed => Ok(()),
            BatchState::Consumed => Err(RunnerError::AlreadyConsumed),
            state => Err(RunnerError::NotCompleted { state }),
        }
    }

    fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }

        self.state = BatchState::Empty;
    }
}
