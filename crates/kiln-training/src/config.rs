//! Trainer configuration sections.
//!
//! Trainers are configured per named instance:
//!
//! ```json
//! {
//!   "trainers": {
//!     "default": { "type": "local", "config": {} }
//!   }
//! }
//! ```
//!
//! The `type` selector is resolved through the
//! [`TrainerFactory`](crate::factory::TrainerFactory); the `config` table
//! is passed through to the backend opaquely.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Configuration for one named trainer instance.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainerConfig {
    /// Backend type selector.
    #[serde(rename = "type")]
    pub trainer_type: String,
    /// Backend-specific options.
    #[serde(default = "default_config")]
    pub config: Value,
}

fn default_config() -> Value {
    Value::Object(serde_json::Map::new())
}

/// The `trainers` configuration section: instance name to trainer config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainersConfig {
    #[serde(default)]
    pub trainers: HashMap<String, TrainerConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trainer_config_deserialize() {
        let json = r#"{"type": "local", "config": {"retain_terminal": false}}"#;
        let config: TrainerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.trainer_type, "local");
        assert_eq!(config.config["retain_terminal"], false);
    }

    #[test]
    fn test_trainer_config_defaults_empty_table() {
        let json = r#"{"type": "local"}"#;
        let config: TrainerConfig = serde_json::from_str(json).unwrap();
        assert!(config.config.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_trainers_section() {
        let json = r#"{"trainers": {"default": {"type": "local"}, "batch": {"type": "cluster"}}}"#;
        let section: TrainersConfig = serde_json::from_str(json).unwrap();
        assert_eq!(section.trainers.len(), 2);
        assert_eq!(section.trainers["batch"].trainer_type, "cluster");
    }

    #[test]
    fn test_trainers_section_defaults_empty() {
        let section: TrainersConfig = serde_json::from_str("{}").unwrap();
        assert!(section.trainers.is_empty());
    }
}
