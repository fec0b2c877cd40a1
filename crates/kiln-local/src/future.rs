//! In-process model future backed by a tokio task.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kiln_training::{
    ModelFuture, TrainRequest, TrainableModule, TrainedModule, TrainingError, TrainingId,
    TrainingResult, TrainingStatus, TrainingTicket,
};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Outcome slot filled by the training task on its terminal transition.
#[derive(Default)]
struct JobOutcome {
    model: Option<Arc<dyn TrainedModule>>,
    error: Option<String>,
}

/// Future for a job running on the local tokio runtime.
///
/// Status lives in a watch channel: waiters subscribe instead of polling,
/// and terminal writes go through `send_if_modified` so a cancel that wins
/// the race against completion keeps its state.
pub struct LocalModelFuture {
    ticket: TrainingTicket,
    submitted_at: DateTime<Utc>,
    status_tx: Arc<watch::Sender<TrainingStatus>>,
    status_rx: watch::Receiver<TrainingStatus>,
    outcome: Arc<Mutex<JobOutcome>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl LocalModelFuture {
    /// Spawns the training task and returns its future.
    ///
    /// Construction itself is pure bookkeeping: the composite id and save
    /// path are fixed here, and the module starts on the blocking pool
    /// without being awaited.
    pub(crate) fn spawn(
        trainer_name: &str,
        job_id: &str,
        request: &TrainRequest,
        module: Arc<dyn TrainableModule>,
    ) -> Arc<Self> {
        let ticket = TrainingTicket::new(
            trainer_name,
            job_id,
            request.save_with_id,
            request.save_path.as_deref(),
        );
        let (status_tx, status_rx) = watch::channel(TrainingStatus::Queued);
        let status_tx = Arc::new(status_tx);
        let outcome = Arc::new(Mutex::new(JobOutcome::default()));

        let id = ticket.id().clone();
        let params = request.params.clone();
        let save_path = ticket.save_path().map(Path::to_path_buf);
        let task_tx = Arc::clone(&status_tx);
        let task_outcome = Arc::clone(&outcome);

        let task = tokio::spawn(async move {
            // A cancel may land before this task is first polled; a job
            // already observed terminal never starts.
            let started = task_tx.send_if_modified(|status| {
                if status.is_terminal() {
                    false
                } else {
                    *status = TrainingStatus::Running;
                    true
                }
            });
            if !started {
                return;
            }

            let result =
                tokio::task::spawn_blocking(move || run_job(&module, &params, save_path.as_deref()))
                    .await;

            let terminal = match result {
                Ok(Ok(model)) => {
                    if let Ok(mut slot) = task_outcome.lock() {
                        slot.model = Some(model);
                    }
                    TrainingStatus::Completed
                }
                Ok(Err(err)) => {
                    warn!(training_id = %id, error = %err, "Training job failed");
                    if let Ok(mut slot) = task_outcome.lock() {
                        slot.error = Some(err.to_string());
                    }
                    TrainingStatus::Errored
                }
                Err(err) => {
                    warn!(training_id = %id, error = %err, "Training task panicked");
                    if let Ok(mut slot) = task_outcome.lock() {
                        slot.error = Some(err.to_string());
                    }
                    TrainingStatus::Errored
                }
            };

            // A cancel that already reached a terminal state wins the race.
            task_tx.send_if_modified(|status| {
                if status.is_terminal() {
                    false
                } else {
                    *status = terminal;
                    true
                }
            });
        });

        Arc::new(Self {
            ticket,
            submitted_at: Utc::now(),
            status_tx,
            status_rx,
            outcome,
            task: Mutex::new(Some(task)),
        })
    }

    /// When the job was handed to this backend.
    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Diagnostic message for a job that ended `Errored`.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.outcome.lock().ok().and_then(|slot| slot.error.clone())
    }
}

/// Runs the module to completion and persists the artifact when a save
/// path was derived. Executes on the blocking pool.
fn run_job(
    module: &Arc<dyn TrainableModule>,
    params: &Value,
    save_path: Option<&Path>,
) -> TrainingResult<Arc<dyn TrainedModule>> {
    let trained: Arc<dyn TrainedModule> = Arc::from(module.train(params)?);
    if let Some(path) = save_path {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        trained.save(path)?;
    }
    Ok(trained)
}

#[async_trait]
impl ModelFuture for LocalModelFuture {
    fn id(&self) -> &TrainingId {
        self.ticket.id()
    }

    fn save_path(&self) -> Option<&Path> {
        self.ticket.save_path()
    }

    async fn status(&self) -> TrainingResult<TrainingStatus> {
        Ok(*self.status_rx.borrow())
    }

    async fn cancel(&self) -> TrainingResult<()> {
        let canceled = self.status_tx.send_if_modified(|status| {
            if status.is_terminal() {
                false
            } else {
                *status = TrainingStatus::Canceled;
                true
            }
        });

        if canceled {
            debug!(training_id = %self.ticket.id(), "Canceled training job");
            if let Ok(mut task) = self.task.lock() {
                if let Some(handle) = task.take() {
                    handle.abort();
                }
            }
        }
        Ok(())
    }

    async fn wait(&self) -> TrainingResult<TrainingStatus> {
        let mut rx = self.status_rx.clone();
        loop {
            let status = *rx.borrow_and_update();
            if status.is_terminal() {
                return Ok(status);
            }
            rx.changed()
                .await
                .map_err(|_| TrainingError::Backend("status channel closed".to_string()))?;
        }
    }

    async fn load(&self) -> TrainingResult<Arc<dyn TrainedModule>> {
        let id = self.ticket.id();
        match *self.status_rx.borrow() {
            TrainingStatus::Completed => {
                let slot = self
                    .outcome
                    .lock()
                    .map_err(|_| TrainingError::Backend("outcome lock poisoned".to_string()))?;
                slot.model.clone().ok_or_else(|| {
                    TrainingError::Backend(format!("completed job {id} has no trained model"))
                })
            }
            TrainingStatus::Canceled => Err(TrainingError::IllegalState(format!(
                "training {id} was canceled"
            ))),
            TrainingStatus::Errored => {
                let detail = self
                    .error_message()
                    .unwrap_or_else(|| "unknown error".to_string());
                Err(TrainingError::IllegalState(format!(
                    "training {id} errored: {detail}"
                )))
            }
            status => Err(TrainingError::IllegalState(format!(
                "training {id} has not finished (status: {status})"
            ))),
        }
    }
}
