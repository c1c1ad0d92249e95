//! Gaussian policy for continuous action spaces.

use std::sync::Arc;

use rand_distr::{Distribution, Normal};
use ro_core::{Action, ActionSpace, GeneratorHandle};

use crate::{Approximator, Policy, PolicyError, PolicyResult, SharedParams};

/// Reads the approximator output as per-variable means and samples
/// `Normal(mean_i, std)`, clamped into the variable's bounds.
///
/// A missing or non-finite mean is replaced by the midpoint of the bounds.
pub struct GaussianPolicy<A> {
    approx: Arc<A>,
    space:  ActionSpace,
    std:    f64,
}

impl<A: Approximator> GaussianPolicy<A> {
    pub fn new(approx: Arc<A>, space: ActionSpace, std: f64) -> PolicyResult<Self> {
        if space.is_discrete() {
            return Err(PolicyError::IncompatibleSpace {
                policy: "GaussianPolicy",
                reason: "needs a continuous action space".into(),
            });
        }
        if !(std.is_finite() && std > 0.0) {
            return Err(PolicyError::Config(format!(
                "gaussian std must be finite and positive, got {std}"
            )));
        }
        Ok(Self { approx, space, std })
    }

    pub fn std(&self) -> f64 {
        self.std
    }
}

impl<A: Approximator> Policy for GaussianPolicy<A> {
    type State = A::State;

    fn sample(&self, state: &Self::State, rng: &mut GeneratorHandle) -> Action {
        let means = self.approx.predict(state);
        let values = (0..self.space.n_vars())
            .map(|i| {
                let (lo, hi) = self.space.bounds(i).unwrap_or((0.0, 1.0));
                let mean = means
                    .get(i)
                    .copied()
                    .filter(|m| m.is_finite())
                    .unwrap_or(0.5 * (lo + hi));
                // `std` was validated at construction, so this cannot fail.
                match Normal::new(mean, self.std) {
                    Ok(normal) => normal.sample(rng),
                    Err(_) => mean,
                }
            })
            .collect();
        self.space.clamp(Action::Continuous(values))
    }

    fn action_space(&self) -> &ActionSpace {
        &self.space
    }

    fn parameters(&self) -> &SharedParams {
        self.approx.parameters()
    }
}
