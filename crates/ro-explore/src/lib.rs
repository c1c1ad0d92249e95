//! `ro-explore`: exploration strategies and the actor that applies them.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`epsilon`]  | `EpsilonProvider` trait, `EpsilonSchedule`                    |
//! | [`cache`]    | `RandomCache`: batched uniform draws with a cursor            |
//! | [`strategy`] | `ExplorationStrategy` trait, `EpsilonGreedy`, `Greedy`        |
//! | [`config`]   | `ExplorationConfig`                                           |
//! | [`actor`]    | `Actor`: policy + strategy + generator for one worker         |
//! | [`error`]    | `ExploreError`, `ExploreResult<T>`                            |
//!
//! # Per-step cost
//!
//! Nothing in this crate locks or allocates on the `explore` path.  The
//! epsilon-greedy coin flip reads one pre-drawn value; the cache refills its
//! whole batch from the actor's own generator once every `batch_size` calls.

pub mod actor;
pub mod cache;
pub mod config;
pub mod epsilon;
pub mod error;
pub mod strategy;


pub use actor::Actor;
pub use cache::RandomCache;
pub use config::ExplorationConfig;
pub use epsilon::{EpsilonProvider, EpsilonSchedule};
pub use error::{ExploreError, ExploreResult};
pub use strategy::{EpsilonGreedy, ExplorationStrategy, Greedy};
