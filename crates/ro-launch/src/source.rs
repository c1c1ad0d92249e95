//! Where each worker's environment, policy and strategy come from.

use ro_core::{Environment, WorkerId};
use ro_explore::{ExplorationStrategy, ExploreResult};
use ro_policy::{Policy, PolicyResult};

// ── Environments ──────────────────────────────────────────────────────────────

/// Produces one environment per worker.  Shared by reference across all
/// worker threads.
pub trait EnvSource: Sync {
    type Env: Environment + 'static;

    fn make(&self, worker: WorkerId) -> Self::Env;
}

/// Every worker gets a clone of one reference instance.
#[derive(Clone, Debug)]
pub struct Prototype<E>(pub E);

impl<E> EnvSource for Prototype<E>
where
    E: Environment + Clone + Sync + 'static,
{
    type Env = E;

    fn make(&self, _worker: WorkerId) -> E {
        self.0.clone()
    }
}

/// Every worker calls a zero-argument factory.
#[derive(Clone, Debug)]
pub struct Factory<F>(pub F);

impl<F, E> EnvSource for Factory<F>
where
    F: Fn() -> E + Sync,
    E: Environment + 'static,
{
    type Env = E;

    fn make(&self, _worker: WorkerId) -> E {
        (self.0)()
    }
}

/// Factory that sees the worker index, for heterogeneous environments.
#[derive(Clone, Debug)]
pub struct PerWorker<F>(pub F);

impl<F, E> EnvSource for PerWorker<F>
where
    F: Fn(WorkerId) -> E + Sync,
    E: Environment + 'static,
{
    type Env = E;

    fn make(&self, worker: WorkerId) -> E {
        (self.0)(worker)
    }
}

// ── Policies and strategies ───────────────────────────────────────────────────

/// Builds one policy per worker.  Policies typically share an approximator
/// (and its parameters) through an `Arc` captured by the factory.
///
/// Implemented for `Fn(WorkerId) -> PolicyResult<P> + Sync` closures.
pub trait PolicyFactory: Sync {
    type Policy: Policy + 'static;

    fn build(&self, worker: WorkerId) -> PolicyResult<Self::Policy>;
}

impl<F, P> PolicyFactory for F
where
    F: Fn(WorkerId) -> PolicyResult<P> + Sync,
    P: Policy + 'static,
{
    type Policy = P;

    fn build(&self, worker: WorkerId) -> PolicyResult<P> {
        self(worker)
    }
}

/// Builds one exploration strategy per worker.
///
/// Implemented for `Fn(WorkerId) -> ExploreResult<X> + Sync` closures.
pub trait StrategyFactory: Sync {
    type Strategy: ExplorationStrategy + 'static;

    fn build(&self, worker: WorkerId) -> ExploreResult<Self::Strategy>;
}

impl<F, X> StrategyFactory for F
where
    F: Fn(WorkerId) -> ExploreResult<X> + Sync,
    X: ExplorationStrategy + 'static,
{
    type Strategy = X;

    fn build(&self, worker: WorkerId) -> ExploreResult<X> {
        self(worker)
    }
}
