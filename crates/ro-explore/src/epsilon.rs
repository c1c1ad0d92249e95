//! Epsilon providers: constants, annealing schedules, and closures.

use crate::{ExploreError, ExploreResult};

/// Source of the exploration rate.
///
/// Evaluated on every `explore` call with the strategy's call counter, so a
/// provider may anneal as training progresses.  Values should lie in
/// `[0, 1]`: [`EpsilonGreedy::new`](crate::EpsilonGreedy::new) rejects a bad
/// value at step 0, but later values are only clamped (NaN as 0), so a closure
/// that drifts above 1 silently explores on every call.  Prefer
/// [`EpsilonSchedule`], whose whole range is checked by `validate`.
///
/// Any `Fn(u64) -> f64 + Send` closure is a provider.
pub trait EpsilonProvider: Send {
    fn epsilon(&self, step: u64) -> f64;
}

impl<F> EpsilonProvider for F
where
    F: Fn(u64) -> f64 + Send,
{
    #[inline]
    fn epsilon(&self, step: u64) -> f64 {
        self(step)
    }
}

/// Built-in epsilon schedules.
///
/// The variants are public so configurations can be written literally or
/// deserialized; call [`validate`](Self::validate) (or use the checked
/// constructors) before handing one to a strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "params", rename_all = "snake_case"))]
pub enum EpsilonSchedule {
    /// The same rate forever.
    Constant(f64),
    /// Straight line from `start` to `end` over `steps` calls, then `end`.
    Linear { start: f64, end: f64, steps: u64 },
    /// `start * rate^step`, never below `floor`.
    Exponential { start: f64, floor: f64, rate: f64 },
}

impl EpsilonSchedule {
    pub fn constant(epsilon: f64) -> ExploreResult<Self> {
        Self::Constant(epsilon).validated()
    }

    pub fn linear(start: f64, end: f64, steps: u64) -> ExploreResult<Self> {
        Self::Linear { start, end, steps }.validated()
    }

    pub fn exponential(start: f64, floor: f64, rate: f64) -> ExploreResult<Self> {
        Self::Exponential { start, floor, rate }.validated()
    }

    fn validated(self) -> ExploreResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Check that every value the schedule can produce lies in `[0, 1]`.
    pub fn validate(&self) -> ExploreResult<()> {
        match *self {
            Self::Constant(eps) => check_unit(eps),
            Self::Linear { start, end, steps } => {
                check_unit(start)?;
                check_unit(end)?;
                if steps == 0 {
                    return Err(ExploreError::Schedule("linear schedule needs steps > 0".into()));
                }
                Ok(())
            }
            Self::Exponential { start, floor, rate } => {
                check_unit(start)?;
                check_unit(floor)?;
                if floor >= start {
                    return Err(ExploreError::Schedule(format!(
                        "exponential floor {floor} must be below start {start}"
                    )));
                }
                if !(rate > 0.0 && rate < 1.0) {
                    return Err(ExploreError::Schedule(format!(
                        "exponential rate must lie in (0, 1), got {rate}"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Rate at call number `step`.
    pub fn value(&self, step: u64) -> f64 {
        match *self {
            Self::Constant(eps) => eps,
            Self::Linear { start, end, steps } => {
                if step >= steps {
                    end
                } else {
                    start + (end - start) * (step as f64 / steps as f64)
                }
            }
            Self::Exponential { start, floor, rate } => {
                // Past ~2^31 steps the decay has long since hit the floor.
                let exp = i32::try_from(step).unwrap_or(i32::MAX);
                (start * rate.powi(exp)).max(floor)
            }
        }
    }
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        Self::Constant(0.05)
    }
}

impl EpsilonProvider for EpsilonSchedule {
    #[inline]
    fn epsilon(&self, step: u64) -> f64 {
        self.value(step)
    }
}

pub(crate) fn check_unit(eps: f64) -> ExploreResult<()> {
    if (0.0..=1.0).contains(&eps) {
        Ok(())
    } else {
        Err(ExploreError::EpsilonOutOfRange(eps))
    }
}
