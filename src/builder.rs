use crate::runner::TaskRunner;

/// Default prefix for worker thread names.
const DEFAULT_THREAD_NAME: &str = "task-runner";

/// Builder for configuring and creating a [`TaskRunner`].
///
/// `RunnerBuilder` customizes the worker threads a runner spawns for each
/// batch: their name prefix and their stack size.
///
/// # Examples
///
/// ```rust
/// use task_runner::RunnerBuilder;
///
/// let runner = RunnerBuilder::new()
///     .thread_name("pricing")
///     .stack_size(256 * 1024)
///     .build::<(u64,), u64, 4>();
///
/// assert_eq!(runner.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct RunnerBuilder {
    /// Worker threads are named `{thread_name}-{slot}`.
    thread_name: String,

    /// Worker stack size in bytes, platform default when `None`.
    stack_size: Option<usize>,
}

impl RunnerBuilder {
    /// Creates a new `RunnerBuilder` with default configuration.
    ///
    /// Workers are named `task-runner-{slot}` and use the platform's
    /// default stack size.
    pub fn new() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            stack_size: None,
        }
    }

    /// Sets the name prefix of worker threads.
    ///
    /// # Panics
    ///
    /// Panics if `prefix` contains a null byte.
    pub fn thread_name(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        assert!(
            !prefix.contains('\0'),
            "thread_name must not contain null bytes"
        );

        self.thread_name = prefix;
        self
    }

    /// Sets the stack size of worker threads, in bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes == 0`.
    pub fn stack_size(mut self, bytes: usize) -> Self {
        assert!(bytes > 0, "stack_size must be > 0");

        self.stack_size = Some(bytes);
        self
    }

    /// Builds an empty runner with the configured options.
    pub fn build<Args, R, const N: usize>(self) -> TaskRunner<Args, R, N> {
        TaskRunner::with_config(self.thread_name, self.stack_size)
    }
}

impl Default for RunnerBuilder {
    /// Creates a default `RunnerBuilder`.
    fn default() -> Self {
        Self::new()
    }
}
