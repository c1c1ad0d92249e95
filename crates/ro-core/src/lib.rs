//! `ro-core`: foundational types for the rollout framework.
//!
//! This crate is a dependency of every other `ro-*` crate.  It has no `ro-*`
//! dependencies and few external ones (`rand`, `rand_chacha`, `thiserror`,
//! `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`ids`]     | `WorkerId`                                                 |
//! | [`rng`]     | `SeedRegistry`, `RandomEngine` (global), `GeneratorHandle` |
//! | [`space`]   | `ActionSpace`, `Shape`, `Action`, `sample_random`          |
//! | [`env`]     | `Environment` trait, `Step`                                |
//! | [`error`]   | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, actions and spaces. |

pub mod env;
pub mod error;
pub mod ids;
pub mod rng;
pub mod space;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use env::{Environment, Step};
pub use error::{CoreError, CoreResult};
pub use ids::WorkerId;
pub use rng::{GeneratorHandle, RandomEngine, SeedRegistry, seed_lineage};
pub use space::{Action, ActionSpace, Shape, sample_random};
