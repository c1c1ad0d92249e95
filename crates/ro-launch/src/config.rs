use std::num::NonZeroUsize;
use std::thread;

use crate::{LaunchError, LaunchResult};

/// Threads left free for the OS and runtime when the worker count is derived
/// from the hardware.
pub const DEFAULT_RESERVED_HEADROOM: usize = 6;

/// Size in bytes above which a type is cached per thread instead of rebuilt.
pub const DEFAULT_ALLOC_THRESHOLD: usize = 2 << 20;

/// Launcher settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LaunchConfig {
    /// Explicit worker count.  `None` derives it from the hardware.
    pub workers: Option<usize>,

    /// Subtracted from the available parallelism when `workers` is `None`.
    pub reserved_headroom: usize,

    /// Actors larger than this many bytes use the thread-local strategy.
    pub actor_alloc_threshold: usize,

    /// Environments larger than this many bytes use the thread-local strategy.
    pub env_alloc_threshold: usize,

    /// Base seed applied to the launcher's registry before any worker starts.
    pub seed: Option<u64>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            workers:               None,
            reserved_headroom:     DEFAULT_RESERVED_HEADROOM,
            actor_alloc_threshold: DEFAULT_ALLOC_THRESHOLD,
            env_alloc_threshold:   DEFAULT_ALLOC_THRESHOLD,
            seed:                  None,
        }
    }
}

impl LaunchConfig {
    /// Config with an explicit worker count and everything else defaulted.
    pub fn with_workers(workers: usize) -> Self {
        Self { workers: Some(workers), ..Self::default() }
    }

    /// Number of workers to launch.
    ///
    /// An explicit count is taken as-is (zero is an error).  Otherwise the
    /// count is the available parallelism minus the headroom, but at least 1.
    pub fn resolve_workers(&self) -> LaunchResult<usize> {
        match self.workers {
            Some(0) => Err(LaunchError::Config("worker count override must be positive".into())),
            Some(n) => Ok(n),
            None => {
                let hardware = thread::available_parallelism().map_or(1, NonZeroUsize::get);
                Ok(hardware.saturating_sub(self.reserved_headroom).max(1))
            }
        }
    }
}
