use crate::{EpsilonGreedy, EpsilonSchedule, ExploreError, ExploreResult};

/// Settings for the reference epsilon-greedy strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExplorationConfig {
    pub epsilon:    EpsilonSchedule,
    /// Uniform draws pre-generated per cache refill.
    pub batch_size: usize,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self { epsilon: EpsilonSchedule::default(), batch_size: 1024 }
    }
}

impl ExplorationConfig {
    pub fn validate(&self) -> ExploreResult<()> {
        self.epsilon.validate()?;
        if self.batch_size == 0 {
            return Err(ExploreError::EmptyBatch);
        }
        Ok(())
    }

    /// Validate, then build a fresh strategy.  Each worker calls this once.
    pub fn build(&self) -> ExploreResult<EpsilonGreedy<EpsilonSchedule>> {
        self.validate()?;
        EpsilonGreedy::new(self.epsilon, self.batch_size)
    }
}
