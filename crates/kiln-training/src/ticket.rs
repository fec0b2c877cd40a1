//! Per-future bookkeeping fixed at construction.

use crate::id::TrainingId;
use crate::paths::save_path_with_id;
use std::path::{Path, PathBuf};

/// Identity and artifact destination for one training job.
///
/// Concrete futures embed a ticket and expose its fields through the
/// [`ModelFuture`](crate::future::ModelFuture) accessors. Construction is
/// pure bookkeeping over its inputs: no backend I/O, no failure modes, and
/// both fields are immutable afterwards.
#[derive(Debug, Clone)]
pub struct TrainingTicket {
    id: TrainingId,
    save_path: Option<PathBuf>,
}

impl TrainingTicket {
    #[must_use]
    pub fn new(
        trainer_name: &str,
        job_id: &str,
        save_with_id: bool,
        save_path: Option<&Path>,
    ) -> Self {
        let id = TrainingId::for_job(trainer_name, job_id);
        let save_path = save_path_with_id(save_path, save_with_id, &id);
        Self { id, save_path }
    }

    #[must_use]
    pub fn id(&self) -> &TrainingId {
        &self.id
    }

    #[must_use]
    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_binds_id_and_path() {
        let ticket =
            TrainingTicket::new("default", "job-1", true, Some(Path::new("/models/m")));
        assert_eq!(ticket.id().trainer_name().unwrap(), "default");
        let save_path = ticket.save_path().unwrap();
        assert!(save_path.to_string_lossy().contains(ticket.id().as_str()));
        assert!(save_path.ends_with("m"));
    }

    #[test]
    fn test_ticket_without_save_path() {
        let ticket = TrainingTicket::new("default", "job-1", true, None);
        assert_eq!(ticket.save_path(), None);
    }
}
