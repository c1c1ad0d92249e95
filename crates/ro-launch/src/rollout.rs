//! A reference training entry body: run one episode.

use ro_core::Environment;
use ro_explore::{Actor, ExplorationStrategy};
use ro_policy::Policy;

/// Summary of one episode.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RolloutStats {
    pub steps:        u64,
    pub total_reward: f64,
    pub terminated:   bool,
    pub truncated:    bool,
}

impl RolloutStats {
    /// Whether the environment ended the episode (as opposed to `max_steps`).
    pub fn finished(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Reset `env`, then alternate `actor.explore` and `env.step` until the
/// environment terminates or truncates, or `max_steps` steps have run.
pub fn rollout<P, X, E>(actor: &mut Actor<P, X>, env: &mut E, max_steps: u64) -> RolloutStats
where
    P: Policy<State = E::State>,
    X: ExplorationStrategy,
    E: Environment,
{
    let mut stats = RolloutStats::default();
    let mut state = env.reset();
    while stats.steps < max_steps {
        let action = actor.explore(&state);
        let step = env.step(&action);
        stats.steps += 1;
        stats.total_reward += step.reward;
        stats.terminated = step.terminated;
        stats.truncated = step.truncated;
        if step.is_done() {
            break;
        }
        state = step.next_state;
    }
    stats
}
