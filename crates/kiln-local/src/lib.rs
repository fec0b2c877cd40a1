//! Kiln Local
//!
//! In-process trainer backend: executes trainable modules on the tokio
//! blocking pool and tracks their futures by composite training id. The
//! backend-agnostic contract lives in `kiln-training`.

pub mod future;
pub mod trainer;

pub use future::LocalModelFuture;
pub use trainer::{LocalTrainer, LocalTrainerConfig, LOCAL_TRAINER_TYPE};
