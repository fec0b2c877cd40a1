//! Collaborator contracts for trainable and trained modules.
//!
//! Trainers execute modules; they neither validate nor interpret them. The
//! artifact format behind [`TrainedModule::save`] is the module's own
//! concern.

use crate::error::TrainingResult;
use serde_json::Value;
use std::path::Path;

/// Handle to a trained model artifact.
pub trait TrainedModule: Send + Sync {
    /// Human-readable module name.
    fn name(&self) -> &str;

    /// Persists the artifact under `path`.
    fn save(&self, path: &Path) -> TrainingResult<()>;
}

/// The unit of work a trainer executes.
///
/// `train` runs to completion on the calling thread; backends decide where
/// that thread lives.
pub trait TrainableModule: Send + Sync {
    fn train(&self, params: &Value) -> TrainingResult<Box<dyn TrainedModule>>;
}
