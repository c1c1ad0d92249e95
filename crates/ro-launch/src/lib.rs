//! `ro-launch`: per-worker allocation and the thread launcher.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`alloc`]    | `AllocationStrategy`, `StackAlloc`, `ThreadLocalAlloc`, `AllocStrategy`, `Lease` |
//! | [`source`]   | `EnvSource` (`Prototype`, `Factory`, `PerWorker`), `PolicyFactory`, `StrategyFactory` |
//! | [`config`]   | `LaunchConfig` and its defaults                                 |
//! | [`launcher`] | `Launcher` builder, `LaunchReport`                              |
//! | [`observer`] | `LaunchObserver` trait, `NoopObserver`                          |
//! | [`rollout`]  | `rollout`: a reference episode loop, `RolloutStats`             |
//! | [`error`]    | `LaunchError`, `WorkerFailure`, `LaunchResult<T>`               |
//!
//! # Worker lifecycle
//!
//! For each worker index the launcher spawns one named OS thread which:
//!
//! 1. draws a generator from the seed registry,
//! 2. builds its policy and exploration strategy from the factories,
//! 3. acquires an `Actor` and an environment through the size-selected
//!    allocation strategy,
//! 4. calls the training entry point with exclusive `&mut` access to both.
//!
//! The seed registry is touched once per worker, at startup.  Nothing else is
//! shared mutably between workers.

pub mod alloc;
pub mod config;
pub mod error;
pub mod launcher;
pub mod observer;
pub mod rollout;
pub mod source;


pub use alloc::{AllocStrategy, AllocationStrategy, Lease, LeaseGuard, StackAlloc, ThreadLocalAlloc};
pub use config::{DEFAULT_ALLOC_THRESHOLD, DEFAULT_RESERVED_HEADROOM, LaunchConfig};
pub use error::{FailureStage, LaunchError, LaunchResult, WorkerFailure};
pub use launcher::{LaunchReport, Launcher};
pub use observer::{LaunchObserver, NoopObserver};
pub use rollout::{RolloutStats, rollout};
pub use source::{EnvSource, Factory, PerWorker, PolicyFactory, Prototype, StrategyFactory};
