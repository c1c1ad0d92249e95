//! Greedy policy: the approximator output *is* the decision.

use std::sync::Arc;

use ro_core::{Action, ActionSpace, GeneratorHandle, Shape};

use crate::{Approximator, Policy, SharedParams};

/// Reads approximator outputs as the action directly, drawing no randomness.
///
/// - Discrete spaces: the output is the concatenation of per-variable score
///   segments (`action_count(0)` scores, then `action_count(1)`, …) and each
///   variable takes the argmax of its segment.  Missing scores count as
///   `-inf`; ties pick the lowest index.
/// - Continuous spaces: output `i` is the value of variable `i`, clamped into
///   its bounds.  Missing outputs fall back to the lower bound.
pub struct DirectPolicy<A> {
    approx: Arc<A>,
    space:  ActionSpace,
}

impl<A: Approximator> DirectPolicy<A> {
    pub fn new(approx: Arc<A>, space: ActionSpace) -> Self {
        Self { approx, space }
    }
}

impl<A: Approximator> Policy for DirectPolicy<A> {
    type State = A::State;

    fn sample(&self, state: &Self::State, _rng: &mut GeneratorHandle) -> Action {
        let output = self.approx.predict(state);
        match self.space.shape() {
            Shape::DiscreteUniform { .. } | Shape::DiscreteVariable { .. } => {
                let mut offset = 0;
                let choices = (0..self.space.n_vars())
                    .map(|i| {
                        let n = self.space.action_count(i).unwrap_or(1);
                        let choice = argmax(output.get(offset..).unwrap_or(&[]), n);
                        offset += n;
                        choice
                    })
                    .collect();
                Action::Discrete(choices)
            }
            Shape::ContinuousUniform { .. } | Shape::ContinuousVariable { .. } => {
                let values = (0..self.space.n_vars())
                    .map(|i| output.get(i).copied().unwrap_or(f64::NEG_INFINITY))
                    .collect();
                self.space.clamp(Action::Continuous(values))
            }
        }
    }

    fn action_space(&self) -> &ActionSpace {
        &self.space
    }

    fn parameters(&self) -> &SharedParams {
        self.approx.parameters()
    }
}

/// Index of the largest of the first `n` scores (lowest index on ties).
pub(crate) fn argmax(scores: &[f64], n: usize) -> usize {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (i, &s) in scores.iter().take(n).enumerate() {
        if s > best_score {
            best = i;
            best_score = s;
        }
    }
    best
}
