//! Action spaces and uniform random action sampling.
//!
//! Four shapes are supported through one contract:
//!
//! | Shape                | Per-variable domain                         |
//! |----------------------|---------------------------------------------|
//! | `DiscreteUniform`    | `0..n_actions` for every variable           |
//! | `DiscreteVariable`   | `0..action_counts[i]`                       |
//! | `ContinuousUniform`  | `[lower, upper)` for every variable         |
//! | `ContinuousVariable` | `[lower[i], upper[i])`                      |
//!
//! An [`ActionSpace`] can only be obtained through its validating
//! constructors, so every space in circulation satisfies its invariants and
//! [`sample_random`] is total.

use rand::Rng;

use crate::{CoreError, CoreResult};

// ── Action ────────────────────────────────────────────────────────────────────

/// One joint action: a value per action variable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Discrete(Vec<usize>),
    Continuous(Vec<f64>),
}

impl Action {
    /// Number of action variables.
    pub fn len(&self) -> usize {
        match self {
            Action::Discrete(v) => v.len(),
            Action::Continuous(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_discrete(&self) -> Option<&[usize]> {
        match self {
            Action::Discrete(v) => Some(v),
            Action::Continuous(_) => None,
        }
    }

    pub fn as_continuous(&self) -> Option<&[f64]> {
        match self {
            Action::Continuous(v) => Some(v),
            Action::Discrete(_) => None,
        }
    }
}

// ── Shape ─────────────────────────────────────────────────────────────────────

/// The raw shape of an action domain.
///
/// Build an [`ActionSpace`] from it with `ActionSpace::try_from(shape)`, which
/// validates the invariants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    DiscreteUniform {
        n_vars:    usize,
        n_actions: usize,
    },
    DiscreteVariable {
        n_vars:        usize,
        action_counts: Vec<usize>,
    },
    ContinuousUniform {
        n_vars: usize,
        lower:  f64,
        upper:  f64,
    },
    ContinuousVariable {
        n_vars: usize,
        lower:  Vec<f64>,
        upper:  Vec<f64>,
    },
}

// ── ActionSpace ───────────────────────────────────────────────────────────────

/// A validated, immutable action domain.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Shape", into = "Shape"))]
pub struct ActionSpace(Shape);

impl ActionSpace {
    /// `n_vars` variables, each taking one of `n_actions` values.
    pub fn discrete_uniform(n_vars: usize, n_actions: usize) -> CoreResult<Self> {
        Self::try_from(Shape::DiscreteUniform { n_vars, n_actions })
    }

    /// One variable per entry of `action_counts`.
    pub fn discrete_variable(action_counts: Vec<usize>) -> CoreResult<Self> {
        Self::try_from(Shape::DiscreteVariable { n_vars: action_counts.len(), action_counts })
    }

    /// `n_vars` variables sharing the bounds `[lower, upper)`.
    pub fn continuous_uniform(n_vars: usize, lower: f64, upper: f64) -> CoreResult<Self> {
        Self::try_from(Shape::ContinuousUniform { n_vars, lower, upper })
    }

    /// Per-variable bounds `[lower[i], upper[i])`.
    pub fn continuous_variable(lower: Vec<f64>, upper: Vec<f64>) -> CoreResult<Self> {
        Self::try_from(Shape::ContinuousVariable { n_vars: lower.len(), lower, upper })
    }

    /// Per-variable bounds given as `(lower, upper)` pairs.
    pub fn continuous_from_bounds(bounds: &[(f64, f64)]) -> CoreResult<Self> {
        let (lower, upper) = bounds.iter().copied().unzip();
        Self::continuous_variable(lower, upper)
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.0
    }

    /// Number of action variables.
    pub fn n_vars(&self) -> usize {
        match &self.0 {
            Shape::DiscreteUniform { n_vars, .. }
            | Shape::DiscreteVariable { n_vars, .. }
            | Shape::ContinuousUniform { n_vars, .. }
            | Shape::ContinuousVariable { n_vars, .. } => *n_vars,
        }
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self.0, Shape::DiscreteUniform { .. } | Shape::DiscreteVariable { .. })
    }

    /// Number of values variable `i` can take (`None` for continuous spaces
    /// or out-of-range `i`).
    pub fn action_count(&self, i: usize) -> Option<usize> {
        match &self.0 {
            Shape::DiscreteUniform { n_vars, n_actions } => (i < *n_vars).then_some(*n_actions),
            Shape::DiscreteVariable { action_counts, .. } => action_counts.get(i).copied(),
            _ => None,
        }
    }

    /// Bounds `[lower, upper)` of variable `i` (`None` for discrete spaces or
    /// out-of-range `i`).
    pub fn bounds(&self, i: usize) -> Option<(f64, f64)> {
        match &self.0 {
            Shape::ContinuousUniform { n_vars, lower, upper } => {
                (i < *n_vars).then_some((*lower, *upper))
            }
            Shape::ContinuousVariable { lower, upper, .. } => {
                Some((*lower.get(i)?, *upper.get(i)?))
            }
            _ => None,
        }
    }

    /// Total number of joint discrete actions.
    ///
    /// `None` for continuous spaces, or if the product overflows `usize`.
    pub fn cardinality(&self) -> Option<usize> {
        match &self.0 {
            Shape::DiscreteUniform { n_vars, n_actions } => {
                (0..*n_vars).try_fold(1usize, |acc, _| acc.checked_mul(*n_actions))
            }
            Shape::DiscreteVariable { action_counts, .. } => {
                action_counts.iter().try_fold(1usize, |acc, &c| acc.checked_mul(c))
            }
            _ => None,
        }
    }

    /// Pull every value of `action` into its variable's domain.
    ///
    /// Discrete values are capped at `count - 1`; continuous values are
    /// clamped into `[lower, upper)` (NaN maps to `lower`).  Values beyond
    /// `n_vars` are dropped.
    pub fn clamp(&self, action: Action) -> Action {
        match action {
            Action::Discrete(values) => Action::Discrete(
                values
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, v)| self.action_count(i).map(|n| v.min(n - 1)))
                    .collect(),
            ),
            Action::Continuous(values) => Action::Continuous(
                values
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, v)| {
                        self.bounds(i).map(|(lo, hi)| v.max(lo).min(next_below(hi)))
                    })
                    .collect(),
            ),
        }
    }

    /// `true` if `action` has the right kind and arity and every value lies
    /// inside its variable's domain.
    pub fn contains(&self, action: &Action) -> bool {
        if action.len() != self.n_vars() {
            return false;
        }
        match action {
            Action::Discrete(values) => values
                .iter()
                .enumerate()
                .all(|(i, &v)| self.action_count(i).is_some_and(|n| v < n)),
            Action::Continuous(values) => values
                .iter()
                .enumerate()
                .all(|(i, &v)| self.bounds(i).is_some_and(|(lo, hi)| lo <= v && v < hi)),
        }
    }
}

impl TryFrom<Shape> for ActionSpace {
    type Error = CoreError;

    fn try_from(shape: Shape) -> CoreResult<Self> {
        validate(&shape)?;
        Ok(ActionSpace(shape))
    }
}

impl From<ActionSpace> for Shape {
    fn from(space: ActionSpace) -> Shape {
        space.0
    }
}

fn validate(shape: &Shape) -> CoreResult<()> {
    match shape {
        Shape::DiscreteUniform { n_vars, n_actions } => {
            check_vars(*n_vars)?;
            if *n_actions == 0 {
                return Err(CoreError::config("discrete action space needs n_actions > 0"));
            }
        }
        Shape::DiscreteVariable { n_vars, action_counts } => {
            check_vars(*n_vars)?;
            check_len("action_counts", *n_vars, action_counts.len())?;
            if let Some(i) = action_counts.iter().position(|&c| c == 0) {
                return Err(CoreError::config(format!("action variable {i} has zero actions")));
            }
        }
        Shape::ContinuousUniform { n_vars, lower, upper } => {
            check_vars(*n_vars)?;
            check_bounds(0, *lower, *upper)?;
        }
        Shape::ContinuousVariable { n_vars, lower, upper } => {
            check_vars(*n_vars)?;
            check_len("lower bounds", *n_vars, lower.len())?;
            check_len("upper bounds", *n_vars, upper.len())?;
            for (i, (&lo, &hi)) in lower.iter().zip(upper).enumerate() {
                check_bounds(i, lo, hi)?;
            }
        }
    }
    Ok(())
}

fn check_vars(n_vars: usize) -> CoreResult<()> {
    if n_vars == 0 {
        return Err(CoreError::config("action space needs n_vars > 0"));
    }
    Ok(())
}

fn check_len(what: &str, expected: usize, got: usize) -> CoreResult<()> {
    if expected != got {
        return Err(CoreError::config(format!(
            "{what} length {got} does not match n_vars {expected}"
        )));
    }
    Ok(())
}

fn check_bounds(i: usize, lower: f64, upper: f64) -> CoreResult<()> {
    if !(lower.is_finite() && upper.is_finite()) {
        return Err(CoreError::config(format!("variable {i} has non-finite bounds")));
    }
    if lower >= upper {
        return Err(CoreError::config(format!(
            "variable {i} bounds [{lower}, {upper}) are empty"
        )));
    }
    if !(upper - lower).is_finite() {
        return Err(CoreError::config(format!("variable {i} range overflows f64")));
    }
    Ok(())
}

/// The largest `f64` strictly less than `x` (for finite `x`).
fn next_below(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x < 0.0 {
        f64::from_bits(x.to_bits() + 1)
    } else {
        -f64::from_bits(1)
    }
}

// ── Sampling ──────────────────────────────────────────────────────────────────

/// Draw one action uniformly from `space`.
///
/// Total over every valid space; the only side effect is advancing `rng`.
pub fn sample_random<R: Rng + ?Sized>(space: &ActionSpace, rng: &mut R) -> Action {
    match space.shape() {
        Shape::DiscreteUniform { n_vars, n_actions } => {
            Action::Discrete((0..*n_vars).map(|_| rng.gen_range(0..*n_actions)).collect())
        }
        Shape::DiscreteVariable { action_counts, .. } => {
            Action::Discrete(action_counts.iter().map(|&n| rng.gen_range(0..n)).collect())
        }
        Shape::ContinuousUniform { n_vars, lower, upper } => {
            Action::Continuous((0..*n_vars).map(|_| rng.gen_range(*lower..*upper)).collect())
        }
        Shape::ContinuousVariable { lower, upper, .. } => Action::Continuous(
            lower
                .iter()
                .zip(upper)
                .map(|(&lo, &hi)| rng.gen_range(lo..hi))
                .collect(),
        ),
    }
}
