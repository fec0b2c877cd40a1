use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a training job.
///
/// A job occupies exactly one of these states at any observation instant.
/// The set is closed: backends map their own job states onto these five and
/// never extend them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    /// Accepted by the backend, not yet executing.
    Queued,
    /// The backend has begun execution.
    Running,
    /// Finished successfully; the trained model is loadable.
    Completed,
    /// Terminated on request before completing.
    Canceled,
    /// Execution failed.
    Errored,
}

impl TrainingStatus {
    /// True once the job can make no further transition.
    ///
    /// Allowed-transition validation is a backend concern; this type only
    /// distinguishes terminal from non-terminal observations.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled | Self::Errored)
    }
}

impl fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Errored => "errored",
        };
        f.write_str(name)
    }
}
