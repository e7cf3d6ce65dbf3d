use crate::binding::{TaskFn, bind};
use crate::builder::RunnerBuilder;
use crate::error::{Result, TaskFailure};
use crate::runner::batch::Batch;
use crate::runner::state::BatchState;

use std::ops::Add;
use std::thread;

use tracing::{debug, trace};

/// Runs a batch of `N` tasks concurrently, one worker thread per slot.
///
/// All tasks share the signature `Args -> R`, where `Args` is the argument
/// tuple `(A1, …, Ak)`. Results are always reported in slot order, whatever
/// order the workers finish in.
///
/// Workers live for a single [`run`](Self::run): every slot is dispatched
/// first, then every worker is joined. A task that panics marks only its own
/// slot as failed; the panic surfaces when that slot is consumed.
///
/// # Examples
///
/// ```rust
/// use task_runner::TaskRunner;
///
/// fn add(x: i32, y: i32) -> i32 { x + y }
/// fn sub(x: i32, y: i32) -> i32 { x - y }
///
/// let mut runner = TaskRunner::<(i32, i32), i32, 2>::new();
/// runner.configure_fixed([add, sub]);
/// runner.run((5, 10)).unwrap();
///
/// assert_eq!(runner.collect().unwrap(), vec![15, -5]);
/// ```
pub struct TaskRunner<Args, R, const N: usize> {
    batch: Batch<Args, R, N>,

    /// Prefix for worker thread names; workers are named `{prefix}-{slot}`.
    thread_name: String,

    /// Stack size for worker threads, platform default when `None`.
    stack_size: Option<usize>,
}

impl<Args, R, const N: usize> TaskRunner<Args, R, N> {
    /// Creates an empty runner with the default worker configuration.
    pub fn new() -> Self {
        RunnerBuilder::new().build()
    }

    /// Returns a builder for configuring worker threads.
    pub fn builder() -> RunnerBuilder {
        RunnerBuilder::new()
    }

    pub(crate) fn with_config(thread_name: String, stack_size: Option<usize>) -> Self {
        Self {
            batch: Batch::new(),
            thread_name,
            stack_size,
        }
    }

    /// Installs exactly `N` tasks, replacing any previous ones.
    ///
    /// The array length is checked by the compiler, so this cannot fail.
    pub fn configure_fixed<F>(&mut self, tasks: [F; N])
    where
        F: TaskFn<Args, Output = R> + Send + 'static,
    {
        self.batch.configure_fixed(tasks);
    }

    /// Installs the first `N` tasks yielded by `tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::ConfigSize`](crate::RunnerError::ConfigSize)
    /// if fewer than `N` tasks are available. The runner is then emptied and
    /// must be configured again before it can run.
    pub fn configure_dynamic<I, F>(&mut self, tasks: I) -> Result<()>
    where
        I: IntoIterator<Item = F>,
        F: TaskFn<Args, Output = R> + Send + 'static,
    {
        self.batch.configure_dynamic(tasks)
    }

    /// Returns the current batch state.
    pub fn state(&self) -> BatchState {
        self.batch.state()
    }

    /// Number of slots, always `N`.
    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns `true` if slot `index` holds an outcome that was not consumed.
    pub fn is_ready(&self, index: usize) -> bool {
        self.batch.is_ready(index)
    }

    /// Moves the results out in slot order.
    ///
    /// # Errors
    ///
    /// - [`NotCompleted`](crate::RunnerError::NotCompleted) before `run`.
    /// - [`AlreadyConsumed`](crate::RunnerError::AlreadyConsumed) if this
    ///   batch was already collected or reduced, or a slot was taken.
    /// - [`TaskFailed`](crate::RunnerError::TaskFailed) for the first failed
    ///   slot. Nothing is consumed in that case, so [`take`](Self::take) can
    ///   still recover the other slots.
    pub fn collect(&mut self) -> Result<Vec<R>> {
        self.batch.collect()
    }

    /// Sums the results in slot order, starting from `R::default()`.
    ///
    /// Consumes the batch like [`collect`](Self::collect).
    pub fn reduce(&mut self) -> Result<R>
    where
        R: Default + Add<Output = R>,
    {
        self.batch.reduce_with(|acc, value| acc + value)
    }

    /// Left-folds the results in slot order with `combine`, starting from
    /// `R::default()`. `combine` need not be commutative.
    ///
    /// Consumes the batch like [`collect`](Self::collect).
    pub fn reduce_with<C>(&mut self, combine: C) -> Result<R>
    where
        R: Default,
        C: FnMut(R, R) -> R,
    {
        self.batch.reduce_with(combine)
    }

    /// Moves the outcome of a single slot out.
    ///
    /// Ownership is transferred: the slot cannot be consumed again in this
    /// batch, and `collect`/`reduce` will report it as already consumed.
    /// Taking the last outcome still held moves the batch to
    /// [`BatchState::Consumed`].
    pub fn take(&mut self, index: usize) -> Result<R> {
        self.batch.take(index)
    }
}

impl<Args, R, const N: usize> TaskRunner<Args, R, N>
where
    Args: Clone + Send,
    R: Send,
{
    /// Runs every installed task with its own copy of `args`.
    ///
    /// Blocks until all workers have finished. Any earlier results are
    /// discarded. Running again without reconfiguring reuses the same tasks.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::NotConfigured`](crate::RunnerError::NotConfigured)
    /// if no tasks are installed. Task failures are not reported here.
    pub fn run(&mut self, args: Args) -> Result<()> {
        let slots = self.batch.begin_run()?;
        let bound = bind(args, N);

        let thread_name = &self.thread_name;
        let stack_size = self.stack_size;

        debug!(tasks = N, "dispatching batch");

        let failures = thread::scope(|scope| {
            let mut workers = Vec::with_capacity(N);
            let mut failures = Vec::new();

            for (slot, args) in slots.iter_mut().zip(bound) {
                let index = slot.index();

                let mut builder = thread::Builder::new().name(format!("{thread_name}-{index}"));
                if let Some(size) = stack_size {
                    builder = builder.stack_size(size);
                }

                match builder.spawn_scoped(scope, move || slot.execute(args)) {
                    Ok(handle) => {
                        trace!(slot = index, "worker dispatched");
                        workers.push((index, handle));
                    }
                    Err(err) => failures.push(TaskFailure::new(
                        index,
                        format!("failed to spawn worker: {err}"),
                    )),
                }
            }

            for (index, handle) in workers {
                if let Err(payload) = handle.join() {
                    failures.push(TaskFailure::from_panic(index, payload));
                }
            }

            failures
        });

        self.batch.finish_run(failures);

        Ok(())
    }
}

impl<Args, R, const N: usize> Default for TaskRunner<Args, R, N> {
    fn default() -> Self {
        Self::new()
    }
}
