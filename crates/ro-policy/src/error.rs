use ro_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("{policy} cannot act in this action space: {reason}")]
    IncompatibleSpace {
        policy: &'static str,
        reason: String,
    },

    #[error("policy configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
