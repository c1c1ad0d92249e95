//! The environment contract consumed by rollout workers.

use crate::Action;

/// Result of one environment transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<S> {
    pub next_state: S,
    pub reward:     f64,
    /// The episode reached a terminal state.
    pub terminated: bool,
    /// The episode was cut short (e.g. time limit) without reaching a
    /// terminal state.
    pub truncated:  bool,
}

impl<S> Step<S> {
    /// `true` if the episode is over for either reason.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// An environment instance driven by exactly one worker.
///
/// Dynamics are entirely the implementor's concern.  Instances reach workers
/// either by cloning a reference instance or by calling a factory, so there
/// is no constructor in the trait.
pub trait Environment: Send {
    type State;

    /// Start a new episode and return its initial state.
    fn reset(&mut self) -> Self::State;

    /// Apply `action` and advance one step.
    fn step(&mut self, action: &Action) -> Step<Self::State>;
}
