//! Construction of configured trainers by type name.

use crate::config::{TrainerConfig, TrainersConfig};
use crate::error::{TrainingError, TrainingResult};
use crate::trainer::ModelTrainer;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Constructor for one trainer backend type.
///
/// Receives the configured instance name and the backend-specific config
/// table.
pub type TrainerConstructor =
    Arc<dyn Fn(&str, &Value) -> TrainingResult<Arc<dyn ModelTrainer>> + Send + Sync>;

/// Registry of trainer constructors keyed by type name.
pub struct TrainerFactory {
    constructors: RwLock<HashMap<String, TrainerConstructor>>,
}

impl TrainerFactory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a constructor under `type_name`, replacing any previous
    /// one.
    ///
    /// # Errors
    /// Returns error if the lock is poisoned.
    pub fn register<F>(&self, type_name: &str, constructor: F) -> TrainingResult<()>
    where
        F: Fn(&str, &Value) -> TrainingResult<Arc<dyn ModelTrainer>> + Send + Sync + 'static,
    {
        let mut constructors = self
            .constructors
            .write()
            .map_err(|e| TrainingError::Backend(format!("factory lock poisoned: {e}")))?;

        debug!(trainer_type = %type_name, "Registering trainer constructor");
        constructors.insert(type_name.to_string(), Arc::new(constructor));
        Ok(())
    }

    /// Constructs the trainer described by `config` under `instance_name`.
    ///
    /// # Errors
    /// `InvalidConfig` if no constructor is registered for the type, or
    /// whatever the constructor itself reports.
    pub fn construct(
        &self,
        instance_name: &str,
        config: &TrainerConfig,
    ) -> TrainingResult<Arc<dyn ModelTrainer>> {
        let constructor = {
            let constructors = self
                .constructors
                .read()
                .map_err(|e| TrainingError::Backend(format!("factory lock poisoned: {e}")))?;
            constructors.get(&config.trainer_type).cloned()
        }
        .ok_or_else(|| {
            TrainingError::InvalidConfig(format!(
                "unknown trainer type: {}",
                config.trainer_type
            ))
        })?;

        debug!(
            instance_name = %instance_name,
            trainer_type = %config.trainer_type,
            "Constructing trainer"
        );
        constructor(instance_name, &config.config)
    }

    /// Constructs every trainer named in the `trainers` section.
    ///
    /// # Errors
    /// Fails on the first instance whose type is unknown or whose
    /// constructor rejects its config.
    pub fn construct_all(
        &self,
        config: &TrainersConfig,
    ) -> TrainingResult<HashMap<String, Arc<dyn ModelTrainer>>> {
        let mut trainers = HashMap::new();
        for (name, section) in &config.trainers {
            trainers.insert(name.clone(), self.construct(name, section)?);
        }
        Ok(trainers)
    }

    /// Checks whether a constructor is registered for `type_name`.
    pub fn has(&self, type_name: &str) -> bool {
        self.constructors
            .read()
            .map(|constructors| constructors.contains_key(type_name))
            .unwrap_or(false)
    }
}

impl Default for TrainerFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::future::ModelFuture;
    use crate::id::TrainingId;
    use crate::module::TrainableModule;
    use crate::trainer::TrainRequest;
    use async_trait::async_trait;

    struct NullTrainer {
        instance_name: String,
    }

    #[async_trait]
    impl ModelTrainer for NullTrainer {
        fn instance_name(&self) -> &str {
            &self.instance_name
        }

        async fn train(
            &self,
            _module: Arc<dyn TrainableModule>,
            _request: TrainRequest,
        ) -> TrainingResult<Arc<dyn ModelFuture>> {
            Err(TrainingError::Backend("null trainer".to_string()))
        }

        async fn get_model_future(
            &self,
            training_id: &TrainingId,
        ) -> TrainingResult<Arc<dyn ModelFuture>> {
            Err(TrainingError::NotFound(training_id.to_string()))
        }
    }

    fn null_constructor(
        instance_name: &str,
        _config: &Value,
    ) -> TrainingResult<Arc<dyn ModelTrainer>> {
        Ok(Arc::new(NullTrainer {
            instance_name: instance_name.to_string(),
        }))
    }

    #[test]
    fn test_register_and_construct() {
        let factory = TrainerFactory::new();
        factory.register("null", null_constructor).unwrap();
        assert!(factory.has("null"));

        let config = TrainerConfig {
            trainer_type: "null".to_string(),
            config: Value::Object(serde_json::Map::new()),
        };
        let trainer = factory.construct("default", &config).unwrap();
        assert_eq!(trainer.instance_name(), "default");
    }

    #[test]
    fn test_construct_unknown_type() {
        let factory = TrainerFactory::new();
        let config = TrainerConfig {
            trainer_type: "missing".to_string(),
            config: Value::Object(serde_json::Map::new()),
        };
        assert!(matches!(
            factory.construct("default", &config),
            Err(TrainingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_construct_all() {
        let factory = TrainerFactory::new();
        factory.register("null", null_constructor).unwrap();

        let section: TrainersConfig = serde_json::from_str(
            r#"{"trainers": {"a": {"type": "null"}, "b": {"type": "null"}}}"#,
        )
        .unwrap();
        let trainers = factory.construct_all(&section).unwrap();
        assert_eq!(trainers.len(), 2);
        assert_eq!(trainers["a"].instance_name(), "a");
    }
}
