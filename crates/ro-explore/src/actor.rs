//! The per-worker action selector.

use ro_core::{Action, GeneratorHandle, sample_random};
use ro_policy::Policy;

use crate::ExplorationStrategy;

/// Couples a policy, an exploration strategy and one exclusively owned
/// generator.
///
/// An actor belongs to one worker for that worker's whole lifetime; every
/// method takes `&mut self`, so it cannot be driven from two threads at once.
#[derive(Debug)]
pub struct Actor<P, X> {
    policy:   P,
    strategy: X,
    rng:      GeneratorHandle,
    steps:    u64,
}

impl<P, X> Actor<P, X>
where
    P: Policy,
    X: ExplorationStrategy,
{
    pub fn new(policy: P, strategy: X, rng: GeneratorHandle) -> Self {
        Self { policy, strategy, rng, steps: 0 }
    }

    /// The policy's choice, with no exploration.
    pub fn select_action(&mut self, state: &P::State) -> Action {
        self.policy.sample(state, &mut self.rng)
    }

    /// A uniform draw over the policy's action space.  `state` is ignored.
    pub fn select_random(&mut self, _state: &P::State) -> Action {
        sample_random(self.policy.action_space(), &mut self.rng)
    }

    /// Let the strategy choose between the two.
    pub fn explore(&mut self, state: &P::State) -> Action {
        self.steps += 1;
        self.strategy.explore(state, &self.policy, &mut self.rng)
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn strategy(&self) -> &X {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut X {
        &mut self.strategy
    }

    /// Seed of the generator this actor draws from.
    pub fn generator_seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Number of `explore` calls so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
