//! Batch runners.
//!
//! A runner owns `N` slots. Each slot holds one task and one result cell.
//! A batch goes through three steps:
//!
//! - configure: install `N` tasks into slots `0..N`,
//! - run: execute every task with its own copy of one argument tuple,
//! - consume: move the results out in slot order, or fold them into one value.
//!
//! [`TaskRunner`] runs the slots on scoped worker threads;
//! [`SerialTaskRunner`] runs them in order on the caller's thread.
//! Both share the slot storage and state machine in `batch`.

mod batch;
mod parallel;
mod serial;
mod slot;

pub(crate) mod state;

pub use parallel::TaskRunner;
pub use serial::SerialTaskRunner;
pub use state::BatchState;
