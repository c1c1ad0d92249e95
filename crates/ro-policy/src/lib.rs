//! `ro-policy`: policy and function-approximator contracts.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`model`]       | `Policy` and `Approximator` traits                         |
//! | [`params`]      | `SharedParams`: versioned, externally owned parameters     |
//! | [`direct`]      | `DirectPolicy`: argmax / clamped outputs, no randomness    |
//! | [`categorical`] | `CategoricalPolicy`, `SoftmaxPolicy`                       |
//! | [`gaussian`]    | `GaussianPolicy`: clamped normal noise around the output   |
//! | [`kind`]        | `PolicyKind`: pick a reference policy from configuration   |
//! | [`error`]       | `PolicyError`, `PolicyResult<T>`                           |
//!
//! # Design notes
//!
//! Policies never own learnable state.  Parameters live in a [`SharedParams`]
//! cell owned by the training side; every worker's policy reads the latest
//! published snapshot, and nothing on the rollout path writes to it.

pub mod categorical;
pub mod direct;
pub mod error;
pub mod gaussian;
pub mod kind;
pub mod model;
pub mod params;

#[cfg(test)]
mod tests;

pub use categorical::{CategoricalPolicy, SoftmaxPolicy, softmax};
pub use direct::DirectPolicy;
pub use error::{PolicyError, PolicyResult};
pub use gaussian::GaussianPolicy;
pub use kind::PolicyKind;
pub use model::{Approximator, Policy};
pub use params::SharedParams;
