//! Configuration-level selection of a reference policy.

use std::sync::Arc;

use ro_core::ActionSpace;

use crate::{
    Approximator, CategoricalPolicy, DirectPolicy, GaussianPolicy, Policy, PolicyResult,
    SoftmaxPolicy,
};

/// Which reference policy to wrap around an approximator.
///
/// Custom policies bypass this enum entirely: implement [`Policy`] and hand
/// the launcher a factory that builds it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum PolicyKind {
    Direct,
    Categorical,
    Softmax,
    Gaussian { std: f64 },
}

impl PolicyKind {
    /// Build the selected policy over `approx` acting in `space`.
    ///
    /// Fails with `IncompatibleSpace` when the policy cannot act in `space`
    /// and with `Config` on an invalid Gaussian `std`.
    pub fn build<A>(
        self,
        approx: Arc<A>,
        space: ActionSpace,
    ) -> PolicyResult<Box<dyn Policy<State = A::State>>>
    where
        A: Approximator + 'static,
        A::State: 'static,
    {
        Ok(match self {
            PolicyKind::Direct => Box::new(DirectPolicy::new(approx, space)),
            PolicyKind::Categorical => Box::new(CategoricalPolicy::new(approx, space)?),
            PolicyKind::Softmax => Box::new(SoftmaxPolicy::new(approx, space)?),
            PolicyKind::Gaussian { std } => Box::new(GaussianPolicy::new(approx, space, std)?),
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Direct => "direct",
            PolicyKind::Categorical => "categorical",
            PolicyKind::Softmax => "softmax",
            PolicyKind::Gaussian { .. } => "gaussian",
        }
    }
}
