use crate::binding::{TaskFn, bind};
use crate::error::{Result, TaskFailure};
use crate::runner::batch::Batch;
use crate::runner::state::BatchState;

use std::ops::Add;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

/// Runs a batch of `N` tasks one after another on the caller's thread.
///
/// Same surface and failure semantics as [`TaskRunner`](crate::TaskRunner):
/// for pure tasks both runners produce identical results, which makes this
/// runner the reference the parallel one is tested against.
pub struct SerialTaskRunner<Args, R, const N: usize> {
    batch: Batch<Args, R, N>,
}

impl<Args, R, const N: usize> SerialTaskRunner<Args, R, N> {
    pub fn new() -> Self {
        Self {
            batch: Batch::new(),
        }
    }

    /// Installs exactly `N` tasks, replacing any previous ones.
    pub fn configure_fixed<F>(&mut self, tasks: [F; N])
    where
        F: TaskFn<Args, Output = R> + Send + 'static,
    {
        self.batch.configure_fixed(tasks);
    }

    /// Installs the first `N` tasks yielded by `tasks`.
    ///
    /// On [`ConfigSize`](crate::RunnerError::ConfigSize) the runner is
    /// emptied.
    pub fn configure_dynamic<I, F>(&mut self, tasks: I) -> Result<()>
    where
        I: IntoIterator<Item = F>,
        F: TaskFn<Args, Output = R> + Send + 'static,
    {
        self.batch.configure_dynamic(tasks)
    }

    /// Runs every installed task in slot order, each with its own copy of
    /// `args`.
    ///
    /// A panicking task is caught and recorded in its slot; the remaining
    /// slots still run.
    pub fn run(&mut self, args: Args) -> Result<()>
    where
        Args: Clone,
    {
        let slots = self.batch.begin_run()?;
        let mut failures = Vec::new();

        debug!(tasks = N, "running batch serially");

        for (slot, args) in slots.iter_mut().zip(bind(args, N)) {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| slot.execute(args))) {
                failures.push(TaskFailure::from_panic(slot.index(), payload));
            }
        }

        self.batch.finish_run(failures);

        Ok(())
    }

    pub fn state(&self) -> BatchState {
        self.batch.state()
    }

    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn is_ready(&self, index: usize) -> bool {
        self.batch.is_ready(index)
    }

    /// Moves the results out in slot order. See
    /// [`TaskRunner::collect`](crate::TaskRunner::collect).
    pub fn collect(&mut self) -> Result<Vec<R>> {
        self.batch.collect()
    }

    /// Sums the results in slot order, starting from `R::default()`.
    pub fn reduce(&mut self) -> Result<R>
    where
        R: Default + Add<Output = R>,
    {
        self.batch.reduce_with(|acc, value| acc + value)
    }

    /// Left-folds the results in slot order with `combine`.
    pub fn reduce_with<C>(&mut self, combine: C) -> Result<R>
    where
        R: Default,
        C: FnMut(R, R) -> R,
    {
        self.batch.reduce_with(combine)
    }

    pub fn take(&mut self, index: usize) -> Result<R> {
        self.batch.take(index)
    }
}

impl<Args, R, const N: usize> Default for SerialTaskRunner<Args, R, N> {
    fn default() -> Self {
        Self::new()
    }
}
