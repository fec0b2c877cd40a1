//! Kiln Training
//!
//! Backend-agnostic contract for tracking asynchronous training jobs:
//! - Job lifecycle states (`TrainingStatus`)
//! - Composite training ids binding a job to its owning trainer (`TrainingId`)
//! - Save-path derivation and per-future bookkeeping (`TrainingTicket`)
//! - The `ModelFuture` / `ModelTrainer` traits backends implement
//! - Construction of configured trainers by type name (`TrainerFactory`)

pub mod codec;
pub mod config;
pub mod error;
pub mod factory;
pub mod future;
pub mod id;
pub mod module;
pub mod paths;
pub mod status;
pub mod ticket;
pub mod trainer;

pub use codec::{decode_trainer_name, encode_trainer_name};
pub use config::{TrainerConfig, TrainersConfig};
pub use error::{TrainingError, TrainingResult};
pub use factory::{TrainerConstructor, TrainerFactory};
pub use future::ModelFuture;
pub use id::{trainer_name_from_id, TrainingId, ID_DELIMITER};
pub use module::{TrainableModule, TrainedModule};
pub use paths::save_path_with_id;
pub use status::TrainingStatus;
pub use ticket::TrainingTicket;
pub use trainer::{ModelTrainer, TrainRequest};
