//! The `Policy` and `Approximator` traits: the extension points for
//! decision-making code.

use ro_core::{Action, ActionSpace, GeneratorHandle};

use crate::SharedParams;

/// Pluggable decision policy.
///
/// Produces an action for a state, drawing any randomness it needs from the
/// caller's [`GeneratorHandle`] so that behavior is reproducible per worker.
///
/// # Thread safety
///
/// Each worker builds its own policy instance, so implementations only need
/// to be `Send`.  Learnable state must live behind [`SharedParams`], which
/// workers only read.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysFirst { space: ActionSpace, params: SharedParams }
///
/// impl Policy for AlwaysFirst {
///     type State = ();
///     fn sample(&self, _: &(), _: &mut GeneratorHandle) -> Action {
///         Action::Discrete(vec![0; self.space.n_vars()])
///     }
///     fn action_space(&self) -> &ActionSpace { &self.space }
///     fn parameters(&self) -> &SharedParams { &self.params }
/// }
/// ```
pub trait Policy: Send {
    type State;

    /// Choose an action for `state`.
    fn sample(&self, state: &Self::State, rng: &mut GeneratorHandle) -> Action;

    /// The domain the policy acts in.  Random exploration samples from here.
    fn action_space(&self) -> &ActionSpace;

    /// The externally owned parameters backing this policy.
    fn parameters(&self) -> &SharedParams;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    type State = P::State;

    #[inline]
    fn sample(&self, state: &Self::State, rng: &mut GeneratorHandle) -> Action {
        (**self).sample(state, rng)
    }

    #[inline]
    fn action_space(&self) -> &ActionSpace {
        (**self).action_space()
    }

    #[inline]
    fn parameters(&self) -> &SharedParams {
        (**self).parameters()
    }
}

/// A function approximator: maps a state to a vector of outputs.
///
/// How the outputs are read (scores, weights, logits, means) is up to the
/// policy wrapping it.  Forward evaluation must not mutate shared state,
/// since one approximator is shared by every worker.
pub trait Approximator: Send + Sync {
    type State;

    fn predict(&self, state: &Self::State) -> Vec<f64>;

    fn parameters(&self) -> &SharedParams;
}
