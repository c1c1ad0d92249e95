//! Worker identifiers.
//!
//! A `WorkerId` is the launch-local index of a worker thread, in
//! `[0, worker_count)`.  It is `Copy + Ord + Hash` so it can key maps and sort
//! failure reports without ceremony.

use std::fmt;

/// Launch-local index of one rollout worker.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerId(pub u32);

impl WorkerId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Name given to the OS thread that runs this worker.
    pub fn thread_name(self) -> String {
        format!("rollout-worker-{}", self.0)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker#{}", self.0)
    }
}

impl From<WorkerId> for usize {
    #[inline(always)]
    fn from(id: WorkerId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for WorkerId {
    type Error = std::num::TryFromIntError;

    fn try_from(v: usize) -> Result<Self, Self::Error> {
        u32::try_from(v).map(WorkerId)
    }
}
