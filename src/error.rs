use crate::runner::state::BatchState;

use std::any::Any;

use thiserror::Error;

/// A failure captured from a single slot.
///
/// Produced when a task panics or when its worker thread could not be
/// started. The failure stays inside the slot until the slot is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("slot {slot} failed: {message}")]
pub struct TaskFailure {
    slot: usize,
    message: String,
}

impl TaskFailure {
    pub(crate) fn new(slot: usize, message: impl Into<String>) -> Self {
        Self {
            slot,
            message: message.into(),
        }
    }

    /// Builds a failure from the payload of a caught panic.
    ///
    /// `&str` and `String` payloads (everything `panic!` produces) are kept
    /// verbatim.
    pub(crate) fn from_panic(slot: usize, payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&'static str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "unknown panic payload".to_string()
        };

        Self::new(slot, message)
    }

    /// Index of the slot that failed.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Human readable reason, usually the panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors reported by [`TaskRunner`](crate::TaskRunner) and
/// [`SerialTaskRunner`](crate::SerialTaskRunner).
///
/// Everything except [`RunnerError::TaskFailed`] is a usage error raised
/// eagerly by the offending call. Task failures are raised lazily, when the
/// failed slot is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    #[error("expected {expected} tasks, got {actual}")]
    ConfigSize { expected: usize, actual: usize },

    #[error("run called before any tasks were configured")]
    NotConfigured,

    #[error("results are not available while the batch is {state}")]
    NotCompleted { state: BatchState },

    #[error("batch results were already consumed")]
    AlreadyConsumed,

    #[error("task in slot {slot} failed: {message}")]
    TaskFailed { slot: usize, message: String },

    #[error("slot {index} is out of range for a batch of {len}")]
    SlotOutOfRange { index: usize, len: usize },
}

impl From<TaskFailure> for RunnerError {
    fn from(failure: TaskFailure) -> Self {
        RunnerError::TaskFailed {
            slot: failure.slot,
            message: failure.message,
        }
    }
}

pub type Result<T> = std::result::Result<T, RunnerError>;
