//! Composite training ids.

use crate::codec::{decode_trainer_name, encode_trainer_name};
use crate::error::{TrainingError, TrainingResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delimiter between the encoded trainer name and the backend job id.
pub const ID_DELIMITER: char = ':';

/// Globally unique identifier for one training job.
///
/// The id pairs the owning trainer's encoded instance name with a
/// backend-assigned job id: `<encoded-name>:<job-id>`. It is computed once
/// when a future is constructed and never reassigned; uniqueness of the
/// job-id half is the backend's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingId(String);

impl TrainingId {
    /// Builds the composite id for a job owned by `trainer_name`.
    #[must_use]
    pub fn for_job(trainer_name: &str, job_id: &str) -> Self {
        Self(format!(
            "{}{}{}",
            encode_trainer_name(trainer_name),
            ID_DELIMITER,
            job_id
        ))
    }

    /// Parses an externally supplied composite id, validating both halves.
    ///
    /// # Errors
    /// Returns `MalformedId` if the delimiter is missing, or `InvalidToken`
    /// if the trainer-name segment does not decode.
    pub fn parse(raw: &str) -> TrainingResult<Self> {
        trainer_name_from_id(raw)?;
        Ok(Self(raw.to_string()))
    }

    /// Recovers the owning trainer's instance name.
    ///
    /// # Errors
    /// Same conditions as [`TrainingId::parse`].
    pub fn trainer_name(&self) -> TrainingResult<String> {
        trainer_name_from_id(&self.0)
    }

    /// The backend-assigned half of the id.
    ///
    /// # Errors
    /// Returns `MalformedId` if the delimiter is missing.
    pub fn job_id(&self) -> TrainingResult<&str> {
        self.0
            .split_once(ID_DELIMITER)
            .map(|(_, job_id)| job_id)
            .ok_or_else(|| TrainingError::MalformedId(self.0.clone()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrainingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TrainingId {
    type Err = TrainingError;

    fn from_str(s: &str) -> TrainingResult<Self> {
        Self::parse(s)
    }
}

/// Recovers the trainer instance name from a raw composite id string.
///
/// Shared utility for callers that hold an id but no trainer instance.
/// The encoded token never contains the delimiter, so splitting on the
/// first occurrence is unambiguous even when the job id contains one.
///
/// # Errors
/// Returns `MalformedId` if the delimiter is missing, or `InvalidToken` if
/// the first segment is not a valid encoded token.
pub fn trainer_name_from_id(training_id: &str) -> TrainingResult<String> {
    let (token, _) = training_id
        .split_once(ID_DELIMITER)
        .ok_or_else(|| TrainingError::MalformedId(training_id.to_string()))?;
    decode_trainer_name(token)
}
