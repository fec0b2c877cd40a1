use thiserror::Error;

pub type TrainingResult<T> = std::result::Result<T, TrainingError>;

#[derive(Debug, Error)]
pub enum TrainingError {
    /// A trainer-name token the codec could not have produced.
    #[error("invalid trainer name token: {0}")]
    InvalidToken(String),

    /// A composite training id missing its delimiter or otherwise unparsable.
    #[error("malformed training id: {0}")]
    MalformedId(String),

    /// No training job matches the looked-up id.
    #[error("no training job found for id: {0}")]
    NotFound(String),

    /// The id was issued by a different trainer instance.
    #[error("training id {id} belongs to trainer '{owner}', not '{requested}'")]
    OwnershipMismatch {
        id: String,
        owner: String,
        requested: String,
    },

    /// An operation used outside the lifecycle state that permits it.
    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("invalid trainer configuration: {0}")]
    InvalidConfig(String),

    #[error("trainer backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
