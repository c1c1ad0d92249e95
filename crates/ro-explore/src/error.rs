use ro_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExploreError {
    #[error("epsilon must lie in [0, 1], got {0}")]
    EpsilonOutOfRange(f64),

    #[error("invalid epsilon schedule: {0}")]
    Schedule(String),

    #[error("random cache batch size must be positive")]
    EmptyBatch,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ExploreResult<T> = Result<T, ExploreError>;
