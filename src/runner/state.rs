use std::fmt;

/// Lifecycle of a batch.
///
/// ```text
/// Empty ──configure──▶ Configured ──run──▶ Completed ──collect/reduce/take──▶ Consumed
///                          ▲                   │  ▲                               │
///                          └────configure──────┘  └──────────────run───────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// No tasks installed.
    ///
    /// Initial state, and the state a failed dynamic configure reverts to.
    Empty,

    /// Every slot holds a task and every result cell is unwritten.
    Configured,

    /// All tasks have run; every result cell holds a value or a failure.
    Completed,

    /// Results were moved out by `collect`, `reduce`, or by taking the
    /// last remaining slot.
    ///
    /// A new `run` or `configure` starts the next batch.
    Consumed,
}

impl BatchState {
    /// Returns `true` once tasks are installed, whether or not they ran.
    pub fn is_configured(self) -> bool {
        !matches!(self, BatchState::Empty)
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchState::Empty => "empty",
            BatchState::Configured => "configured",
            BatchState::Completed => "completed",
            BatchState::Consumed => "consumed",
        };

        f.write_str(name)
    }
}
