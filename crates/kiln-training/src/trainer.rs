//! The trainer contract: start jobs, look them up by id.

use crate::error::TrainingResult;
use crate::future::ModelFuture;
use crate::id::TrainingId;
use crate::module::TrainableModule;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// Job-specific arguments for one `train` call.
#[derive(Debug, Clone, Default)]
pub struct TrainRequest {
    /// Backend-opaque training parameters handed to the module.
    pub params: Value,
    /// Base path the trained artifact should be saved under.
    pub save_path: Option<PathBuf>,
    /// Inject the training id into the save path directly above its leaf.
    pub save_with_id: bool,
}

impl TrainRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_save_path(mut self, save_path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(save_path.into());
        self
    }

    #[must_use]
    pub fn save_with_id(mut self, save_with_id: bool) -> Self {
        self.save_with_id = save_with_id;
        self
    }
}

/// A configured backend that starts and tracks training jobs of one kind.
///
/// Instances are long-lived, constructed once from configuration, and must
/// tolerate concurrent `train`/`get_model_future` calls against the same
/// instance without interfering with executing jobs.
#[async_trait]
pub trait ModelTrainer: Send + Sync {
    /// The configured instance name embedded in every id this trainer
    /// issues.
    fn instance_name(&self) -> &str;

    /// Starts training `module` and returns a future tracking the job.
    ///
    /// Dispatch never blocks for job completion. Every call yields a future
    /// with a freshly unique composite id. Nothing about the module itself
    /// is validated here.
    async fn train(
        &self,
        module: Arc<dyn TrainableModule>,
        request: TrainRequest,
    ) -> TrainingResult<Arc<dyn ModelFuture>>;

    /// Resolves a previously issued id back to a live future handle.
    ///
    /// # Errors
    /// `NotFound` if no job of this trainer matches the id,
    /// `OwnershipMismatch` if the id was issued by a different trainer
    /// instance.
    async fn get_model_future(
        &self,
        training_id: &TrainingId,
    ) -> TrainingResult<Arc<dyn ModelFuture>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let request = TrainRequest::new()
            .with_params(json!({"epochs": 3}))
            .with_save_path("/models/m")
            .save_with_id(true);
        assert_eq!(request.params["epochs"], 3);
        assert_eq!(request.save_path.as_deref(), Some(std::path::Path::new("/models/m")));
        assert!(request.save_with_id);
    }

    #[test]
    fn test_request_defaults() {
        let request = TrainRequest::new();
        assert!(request.save_path.is_none());
        assert!(!request.save_with_id);
    }
}
