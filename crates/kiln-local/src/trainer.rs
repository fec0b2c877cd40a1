//! In-process trainer executing modules on the tokio blocking pool.

use crate::future::LocalModelFuture;
use async_trait::async_trait;
use kiln_training::{
    ModelFuture, ModelTrainer, TrainRequest, TrainableModule, TrainerFactory, TrainingError,
    TrainingId, TrainingResult,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Factory type name for the local trainer.
pub const LOCAL_TRAINER_TYPE: &str = "local";

/// Configuration for a [`LocalTrainer`] instance.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalTrainerConfig {
    /// Keep futures for terminal jobs resolvable by id. When unset, a
    /// job's future is dropped from the lookup table once it reaches a
    /// terminal state.
    #[serde(default = "default_retain_terminal")]
    pub retain_terminal: bool,
}

fn default_retain_terminal() -> bool {
    true
}

impl Default for LocalTrainerConfig {
    fn default() -> Self {
        Self {
            retain_terminal: true,
        }
    }
}

/// Trainer backend that runs jobs inside the current process.
///
/// Jobs execute on the tokio blocking pool; bookkeeping is a shared map
/// from composite id to future, safe for concurrent `train` and
/// `get_model_future` callers.
pub struct LocalTrainer {
    instance_name: String,
    config: LocalTrainerConfig,
    futures: Arc<RwLock<HashMap<String, Arc<LocalModelFuture>>>>,
}

impl LocalTrainer {
    #[must_use]
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self::with_config(instance_name, LocalTrainerConfig::default())
    }

    #[must_use]
    pub fn with_config(instance_name: impl Into<String>, config: LocalTrainerConfig) -> Self {
        Self {
            instance_name: instance_name.into(),
            config,
            futures: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Constructor used by the trainer factory.
    ///
    /// # Errors
    /// `InvalidConfig` if the config table does not deserialize.
    pub fn from_config(instance_name: &str, config: &Value) -> TrainingResult<Arc<dyn ModelTrainer>> {
        let config: LocalTrainerConfig = serde_json::from_value(config.clone())
            .map_err(|e| TrainingError::InvalidConfig(format!("local trainer config: {e}")))?;
        Ok(Arc::new(Self::with_config(instance_name, config)))
    }

    /// Registers this backend with `factory` under the `local` type name.
    ///
    /// # Errors
    /// Returns error if the factory lock is poisoned.
    pub fn register(factory: &TrainerFactory) -> TrainingResult<()> {
        factory.register(LOCAL_TRAINER_TYPE, Self::from_config)
    }
}

#[async_trait]
impl ModelTrainer for LocalTrainer {
    fn instance_name(&self) -> &str {
        &self.instance_name
    }

    async fn train(
        &self,
        module: Arc<dyn TrainableModule>,
        request: TrainRequest,
    ) -> TrainingResult<Arc<dyn ModelFuture>> {
        let job_id = Uuid::new_v4().to_string();
        let future = LocalModelFuture::spawn(&self.instance_name, &job_id, &request, module);
        let id = future.id().clone();

        {
            let mut futures = self.futures.write().await;
            futures.insert(id.as_str().to_string(), Arc::clone(&future));
        }
        info!(training_id = %id, trainer = %self.instance_name, "Dispatched training job");

        if !self.config.retain_terminal {
            let futures = Arc::clone(&self.futures);
            let watched = Arc::clone(&future);
            tokio::spawn(async move {
                let _ = watched.wait().await;
                let mut futures = futures.write().await;
                futures.remove(watched.id().as_str());
            });
        }

        Ok(future)
    }

    async fn get_model_future(
        &self,
        training_id: &TrainingId,
    ) -> TrainingResult<Arc<dyn ModelFuture>> {
        let owner = training_id.trainer_name()?;
        if owner != self.instance_name {
            return Err(TrainingError::OwnershipMismatch {
                id: training_id.to_string(),
                owner,
                requested: self.instance_name.clone(),
            });
        }

        let futures = self.futures.read().await;
        futures
            .get(training_id.as_str())
            .cloned()
            .map(|future| future as Arc<dyn ModelFuture>)
            .ok_or_else(|| TrainingError::NotFound(training_id.to_string()))
    }
}
