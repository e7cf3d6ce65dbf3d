//! # task-runner
//!
//! **task-runner** runs a fixed-size batch of independent functions that share
//! one signature `(A1, …, Ak) -> R` over a single argument tuple, then hands
//! back the per-task results in order or folds them into one value.
//!
//! It offers:
//!
//! - [`TaskRunner`], which gives every task its own worker thread for the
//!   duration of one run,
//! - [`SerialTaskRunner`], the same contract executed in order on the caller's
//!   thread,
//! - a compile-time batch size `N`, so slot storage is a plain array,
//! - lazy task failures: a panicking task only poisons its own slot.
//!
//! ## Quick Start
//!
//! ```rust
//! use task_runner::TaskRunner;
//!
//! fn add(x: i32, y: i32) -> i32 { x + y }
//! fn sub(x: i32, y: i32) -> i32 { x - y }
//! fn mul(x: i32, y: i32) -> i32 { x * y }
//! fn rem(x: i32, y: i32) -> i32 { x % y }
//!
//! let mut runner = TaskRunner::<(i32, i32), i32, 4>::new();
//!
//! runner.configure_fixed([add, sub, mul, rem]);
//! runner.run((5, 10)).unwrap();
//! assert_eq!(runner.collect().unwrap(), vec![15, -5, 50, 5]);
//!
//! runner.run((5, 10)).unwrap();
//! assert_eq!(runner.reduce().unwrap(), 65);
//! ```
//!
//! ## Batch lifecycle
//!
//! A runner starts [`Empty`](BatchState::Empty). Configuring installs `N`
//! tasks, running fills every slot's result cell, and `collect`/`reduce`
//! consume the cells. Calling an operation in the wrong state returns a
//! [`RunnerError`] instead of panicking.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events at `debug` and `trace` level for batch
//! and slot boundaries, and at `warn` level for failed tasks. No subscriber is
//! installed.

mod binding;
mod builder;
mod error;
mod runner;

pub use binding::{TaskFn, bind};
pub use builder::RunnerBuilder;
pub use error::{Result, RunnerError, TaskFailure};
pub use runner::{BatchState, SerialTaskRunner, TaskRunner};
