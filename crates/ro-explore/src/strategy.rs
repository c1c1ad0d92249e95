//! Exploration strategies: when to ignore the policy and act at random.

use ro_core::{Action, GeneratorHandle, sample_random};
use ro_policy::Policy;

use crate::epsilon::check_unit;
use crate::{EpsilonProvider, ExploreResult, RandomCache};

/// Decides, per call, between a uniformly random action and the policy's
/// choice.
///
/// Strategies are owned by exactly one actor and may keep mutable state
/// (caches, counters) without synchronization.
pub trait ExplorationStrategy: Send {
    fn explore<P>(&mut self, state: &P::State, policy: &P, rng: &mut GeneratorHandle) -> Action
    where
        P: Policy + ?Sized;
}

// ── Greedy ────────────────────────────────────────────────────────────────────

/// Never explores: always defers to the policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl ExplorationStrategy for Greedy {
    #[inline]
    fn explore<P>(&mut self, state: &P::State, policy: &P, rng: &mut GeneratorHandle) -> Action
    where
        P: Policy + ?Sized,
    {
        policy.sample(state, rng)
    }
}

// ── EpsilonGreedy ─────────────────────────────────────────────────────────────

/// Acts uniformly at random over the policy's action space with probability
/// epsilon, otherwise follows the policy.
///
/// The coin flips come from a [`RandomCache`] refilled from the actor's
/// generator, one batch at a time.  Epsilon is read from the provider on
/// every call, indexed by the number of previous calls.
#[derive(Debug)]
pub struct EpsilonGreedy<E> {
    provider: E,
    cache:    RandomCache,
    step:     u64,
}

impl<E: EpsilonProvider> EpsilonGreedy<E> {
    /// Fails if the provider's initial epsilon lies outside `[0, 1]` or if
    /// `batch_size` is zero.
    ///
    /// Only step 0 is checked for arbitrary providers.  Later values outside
    /// `[0, 1]` are clamped into it, and NaN counts as 0.  An
    /// [`EpsilonSchedule`](crate::EpsilonSchedule) should be validated as a
    /// whole first (see [`ExplorationConfig::build`](crate::ExplorationConfig::build)).
    pub fn new(provider: E, batch_size: usize) -> ExploreResult<Self> {
        check_unit(provider.epsilon(0))?;
        Ok(Self { provider, cache: RandomCache::new(batch_size)?, step: 0 })
    }

    /// Epsilon that the next call will use, after clamping.
    pub fn epsilon(&self) -> f64 {
        clamp_unit(self.provider.epsilon(self.step))
    }

    /// Number of `explore` calls so far.
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn cache(&self) -> &RandomCache {
        &self.cache
    }

    pub fn provider(&self) -> &E {
        &self.provider
    }
}

impl<E: EpsilonProvider> ExplorationStrategy for EpsilonGreedy<E> {
    fn explore<P>(&mut self, state: &P::State, policy: &P, rng: &mut GeneratorHandle) -> Action
    where
        P: Policy + ?Sized,
    {
        let coin = self.cache.next(rng);
        let epsilon = clamp_unit(self.provider.epsilon(self.step));
        self.step += 1;

        if coin < epsilon {
            sample_random(policy.action_space(), rng)
        } else {
            policy.sample(state, rng)
        }
    }
}

// Out-of-range provider values saturate; NaN never explores.
fn clamp_unit(epsilon: f64) -> f64 {
    if epsilon.is_nan() { 0.0 } else { epsilon.clamp(0.0, 1.0) }
}
