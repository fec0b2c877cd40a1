//! The per-job future contract every backend implements.

use crate::error::TrainingResult;
use crate::id::TrainingId;
use crate::module::TrainedModule;
use crate::status::TrainingStatus;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Handle to one in-flight or completed training job.
///
/// Futures are created by [`ModelTrainer::train`](crate::trainer::ModelTrainer::train)
/// or resurrected by `get_model_future`, and owned by whoever requested the
/// training. Identity fields are fixed at construction; status is observed
/// fresh from backend-owned state on every query, never cached here.
#[async_trait]
pub trait ModelFuture: Send + Sync {
    /// The composite training id. Never changes after construction.
    fn id(&self) -> &TrainingId;

    /// The derived artifact save path, if one was requested.
    /// Never changes after construction.
    fn save_path(&self) -> Option<&Path>;

    /// Polls the backend for the job's current lifecycle state.
    ///
    /// May block briefly on a status check but never until completion.
    /// Execution failures surface as [`TrainingStatus::Errored`], not as an
    /// error from this call, so polling is always safe.
    async fn status(&self) -> TrainingResult<TrainingStatus>;

    /// Requests termination of the underlying job.
    ///
    /// Advisory and asynchronous: status eventually reflects `Canceled`,
    /// but no immediate transition is guaranteed. A no-op on an
    /// already-terminal job, never an error.
    async fn cancel(&self) -> TrainingResult<()>;

    /// Blocks until the job reaches a terminal state, then returns it.
    ///
    /// Safe for any number of concurrent callers; all of them unblock once
    /// the backend reports a terminal status. Implementations must not
    /// busy-spin.
    async fn wait(&self) -> TrainingResult<TrainingStatus>;

    /// Loads the trained model. Needs nothing beyond what was captured at
    /// construction.
    ///
    /// # Errors
    /// Returns `IllegalState` while the job is non-terminal or after it
    /// ended `Canceled` or `Errored`.
    async fn load(&self) -> TrainingResult<Arc<dyn TrainedModule>>;
}
