//! Stochastic policies over a single discrete action variable.

use std::sync::Arc;

use rand::distributions::{Distribution, WeightedIndex};
use ro_core::{Action, ActionSpace, GeneratorHandle, sample_random};

use crate::{Approximator, Policy, PolicyError, PolicyResult, SharedParams};

fn single_discrete(space: &ActionSpace, policy: &'static str) -> PolicyResult<usize> {
    match (space.n_vars(), space.action_count(0)) {
        (1, Some(n)) => Ok(n),
        _ => Err(PolicyError::IncompatibleSpace {
            policy,
            reason: "needs exactly one discrete action variable".into(),
        }),
    }
}

/// Sample an index proportional to `weights`, falling back to a uniform
/// draw over the space when the weights do not form a distribution (all
/// zero, negative, or NaN).
fn draw_weighted(weights: &[f64], space: &ActionSpace, rng: &mut GeneratorHandle) -> Action {
    match WeightedIndex::new(weights) {
        Ok(dist) => Action::Discrete(vec![dist.sample(rng)]),
        Err(_) => sample_random(space, rng),
    }
}

// ── CategoricalPolicy ─────────────────────────────────────────────────────────

/// Reads the approximator output as unnormalised non-negative weights, one
/// per action, and samples proportionally.  Outputs past the action count
/// are ignored.
pub struct CategoricalPolicy<A> {
    approx:    Arc<A>,
    space:     ActionSpace,
    n_actions: usize,
}

impl<A: Approximator> CategoricalPolicy<A> {
    pub fn new(approx: Arc<A>, space: ActionSpace) -> PolicyResult<Self> {
        let n_actions = single_discrete(&space, "CategoricalPolicy")?;
        Ok(Self { approx, space, n_actions })
    }
}

impl<A: Approximator> Policy for CategoricalPolicy<A> {
    type State = A::State;

    fn sample(&self, state: &Self::State, rng: &mut GeneratorHandle) -> Action {
        let mut weights = self.approx.predict(state);
        weights.truncate(self.n_actions);
        draw_weighted(&weights, &self.space, rng)
    }

    fn action_space(&self) -> &ActionSpace {
        &self.space
    }

    fn parameters(&self) -> &SharedParams {
        self.approx.parameters()
    }
}

// ── SoftmaxPolicy ─────────────────────────────────────────────────────────────

/// Reads the approximator output as logits and samples from their softmax.
pub struct SoftmaxPolicy<A> {
    approx:    Arc<A>,
    space:     ActionSpace,
    n_actions: usize,
}

impl<A: Approximator> SoftmaxPolicy<A> {
    pub fn new(approx: Arc<A>, space: ActionSpace) -> PolicyResult<Self> {
        let n_actions = single_discrete(&space, "SoftmaxPolicy")?;
        Ok(Self { approx, space, n_actions })
    }
}

/// Numerically stable softmax (max-shifted).  Empty input yields empty output.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

impl<A: Approximator> Policy for SoftmaxPolicy<A> {
    type State = A::State;

    fn sample(&self, state: &Self::State, rng: &mut GeneratorHandle) -> Action {
        let mut logits = self.approx.predict(state);
        logits.truncate(self.n_actions);
        draw_weighted(&softmax(&logits), &self.space, rng)
    }

    fn action_space(&self) -> &ActionSpace {
        &self.space
    }

    fn parameters(&self) -> &SharedParams {
        self.approx.parameters()
    }
}
