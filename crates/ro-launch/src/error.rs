use std::fmt;

use ro_core::{CoreError, WorkerId};
use thiserror::Error;

/// Where in a worker's life a failure happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureStage {
    /// The OS refused to start the thread.
    Spawn,
    /// Generator, policy or strategy construction failed.
    Setup,
    /// The training entry point panicked.
    Training,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureStage::Spawn => "spawn",
            FailureStage::Setup => "setup",
            FailureStage::Training => "training",
        })
    }
}

/// One failed worker, as reported after join.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{worker} failed during {stage}: {message}")]
pub struct WorkerFailure {
    pub worker:  WorkerId,
    pub stage:   FailureStage,
    pub message: String,
}

impl WorkerFailure {
    pub fn new(worker: WorkerId, stage: FailureStage, message: impl Into<String>) -> Self {
        Self { worker, stage, message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("launch configuration error: {0}")]
    Config(String),

    #[error("{} of {launched} workers failed", .failures.len())]
    Workers {
        failures: Vec<WorkerFailure>,
        launched: usize,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type LaunchResult<T> = Result<T, LaunchError>;
