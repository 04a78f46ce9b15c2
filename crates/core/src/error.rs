//! Task execution and parameter errors.

/// Convenience alias for core results.
pub type Result<T> = std::result::Result<T, Error>;

/// Error produced by task execution and fan-out coordination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The task's delay was interrupted before it completed.
    Cancelled {
        /// Id of the cancelled task.
        task_id: u64,
    },
    /// The task panicked while running.
    Panicked {
        /// Id of the panicked task.
        task_id: u64,
        /// Panic description from the runtime.
        reason: String,
    },
    /// A request parameter was out of range.
    InvalidParameter {
        /// Parameter name as it appears in the query string.
        name: &'static str,
        /// The rejected value.
        value: i64,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cancelled { task_id } => {
                write!(f, "task {task_id} was cancelled before completing")
            }
            Self::Panicked { task_id, reason } => {
                write!(f, "task {task_id} panicked: {reason}")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name}={value}: must be non-negative")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Map a join failure on a task handle to the matching error kind.
    pub(crate) fn from_join(task_id: u64, err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            Self::Cancelled { task_id }
        } else {
            Self::Panicked {
                task_id,
                reason: err.to_string(),
            }
        }
    }
}

/// Validate that a query-supplied integer is non-negative.
///
/// Negative values are rejected outright rather than clamped; zero is
/// valid everywhere it can appear (a zero delay means no suspension).
pub fn non_negative(name: &'static str, value: i64) -> Result<u64> {
    if value < 0 {
        return Err(Error::InvalidParameter { name, value });
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_accepts_zero() {
        assert_eq!(non_negative("delay", 0), Ok(0));
    }

    #[test]
    fn non_negative_rejects_negative() {
        let err = non_negative("count", -3).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidParameter {
                name: "count",
                value: -3
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid parameter count=-3: must be non-negative"
        );
    }
}
