//! The `Launcher` builder and its worker threads.

use std::any::Any;
use std::fmt;
use std::thread;

use ro_core::{RandomEngine, SeedRegistry, WorkerId};
use ro_explore::Actor;
use tracing::{debug, info, warn};

use crate::{
    AllocStrategy, AllocationStrategy, EnvSource, FailureStage, LaunchConfig, LaunchError,
    LaunchObserver, LaunchResult, NoopObserver, PolicyFactory, StrategyFactory, WorkerFailure,
};

/// Outcome of a launch in which every worker finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchReport {
    /// Number of workers launched (and joined).
    pub workers: usize,
    /// Generator seed of each worker, indexed by worker.
    pub seeds:   Vec<u64>,
}

/// Fluent builder that spawns one rollout worker per thread and joins them.
///
/// # Required inputs
///
/// - [`LaunchConfig`]: worker count, allocation thresholds, seed
/// - `PF: PolicyFactory`: builds each worker's policy
/// - `SF: StrategyFactory`: builds each worker's exploration strategy
/// - `ES: EnvSource`: builds each worker's environment
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                   |
/// |------------------|-------------------------------------------|
/// | `.registry(r)`   | The process-wide [`RandomEngine`] registry |
/// | `.setup(f)`      | No pre-launch hook                        |
/// | `.observer(o)`   | [`NoopObserver`]                          |
///
/// # Example
///
/// ```rust,ignore
/// let report = Launcher::new(config, policies, |_| exploration.build(), Prototype(env))
///     .setup(init_logging)
///     .launch(|actor, env, _worker| {
///         rollout(actor, env, 1_000);
///     })?;
/// ```
///
/// # Failures
///
/// Every worker runs to completion or failure; nothing is cancelled early.
/// If any worker fails (setup error or panic in the entry point) the launch
/// returns [`LaunchError::Workers`] naming each failed worker after all of
/// them have joined.
pub struct Launcher<'a, PF, SF, ES> {
    config:     LaunchConfig,
    policies:   PF,
    strategies: SF,
    envs:       ES,
    registry:   &'a SeedRegistry,
    setup:      Option<Box<dyn FnOnce() + 'a>>,
    observer:   &'a dyn LaunchObserver,
}

impl<'a, PF, SF, ES> Launcher<'a, PF, SF, ES>
where
    PF: PolicyFactory,
    SF: StrategyFactory,
    ES: EnvSource,
{
    /// Create a launcher with all required inputs.
    pub fn new(config: LaunchConfig, policies: PF, strategies: SF, envs: ES) -> Self {
        Self {
            config,
            policies,
            strategies,
            envs,
            registry: RandomEngine::registry(),
            setup:    None,
            observer: &NoopObserver,
        }
    }

    /// Draw worker generators from `registry` instead of the global one.
    pub fn registry(mut self, registry: &'a SeedRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Run `hook` on the calling thread before any worker starts.  This is
    /// where an application installs its logging subscriber.
    pub fn setup(mut self, hook: impl FnOnce() + 'a) -> Self {
        self.setup = Some(Box::new(hook));
        self
    }

    pub fn observer(mut self, observer: &'a dyn LaunchObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Spawn the workers, hand each its actor and environment via `train`,
    /// and join them all.
    pub fn launch<T>(self, train: T) -> LaunchResult<LaunchReport>
    where
        T: Fn(&mut Actor<PF::Policy, SF::Strategy>, &mut ES::Env, WorkerId) + Sync,
    {
        let Launcher { config, policies, strategies, envs, registry, setup, observer } = self;

        // ── Resolve inputs ─────────────────────────────────────────────────
        let workers = config.resolve_workers()?;
        let count = u32::try_from(workers)
            .map_err(|_| LaunchError::Config(format!("{workers} workers exceed the id range")))?;
        let ids: Vec<WorkerId> = (0..count).map(WorkerId).collect();

        if let Some(hook) = setup {
            hook();
        }
        if let Some(seed) = config.seed {
            registry.set_seed(seed);
        }

        let actor_alloc = AllocStrategy::for_type::<Actor<PF::Policy, SF::Strategy>>(
            config.actor_alloc_threshold,
        );
        let env_alloc = AllocStrategy::for_type::<ES::Env>(config.env_alloc_threshold);
        info!(workers, seed = ?config.seed, "launching rollout workers");
        debug!(actor = ?actor_alloc, env = ?env_alloc, "allocation strategies chosen");
        observer.on_launch_start(workers);

        // ── Spawn, then join every worker ──────────────────────────────────
        let worker = Worker {
            policies: &policies,
            strategies: &strategies,
            envs: &envs,
            registry,
            observer,
            actor_alloc,
            env_alloc,
            train: &train,
        };

        let outcomes: Vec<Result<u64, WorkerFailure>> = thread::scope(|scope| {
            let spawned: Vec<_> = ids
                .iter()
                .map(|&id| {
                    let worker = &worker;
                    let handle = thread::Builder::new()
                        .name(id.thread_name())
                        .spawn_scoped(scope, move || worker.run(id));
                    (id, handle)
                })
                .collect();

            spawned
                .into_iter()
                .map(|(id, handle)| match handle {
                    Ok(handle) => handle.join().unwrap_or_else(|payload| {
                        Err(WorkerFailure::new(id, FailureStage::Training, panic_message(&*payload)))
                    }),
                    Err(e) => Err(WorkerFailure::new(id, FailureStage::Spawn, e.to_string())),
                })
                .collect()
        });

        // ── Report ─────────────────────────────────────────────────────────
        let mut seeds = Vec::with_capacity(workers);
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(seed) => seeds.push(seed),
                Err(failure) => {
                    warn!(
                        worker = %failure.worker,
                        stage = %failure.stage,
                        message = %failure.message,
                        "rollout worker failed"
                    );
                    failures.push(failure);
                }
            }
        }
        if !failures.is_empty() {
            return Err(LaunchError::Workers { failures, launched: workers });
        }

        let report = LaunchReport { workers, seeds };
        observer.on_launch_end(&report);
        info!(workers, "all rollout workers joined");
        Ok(report)
    }
}

// ── Per-thread body ───────────────────────────────────────────────────────────

/// Everything a worker thread borrows from the launching thread.
struct Worker<'s, PF, SF, ES, T> {
    policies:    &'s PF,
    strategies:  &'s SF,
    envs:        &'s ES,
    registry:    &'s SeedRegistry,
    observer:    &'s dyn LaunchObserver,
    actor_alloc: AllocStrategy,
    env_alloc:   AllocStrategy,
    train:       &'s T,
}

impl<PF, SF, ES, T> Worker<'_, PF, SF, ES, T>
where
    PF: PolicyFactory,
    SF: StrategyFactory,
    ES: EnvSource,
    T: Fn(&mut Actor<PF::Policy, SF::Strategy>, &mut ES::Env, WorkerId) + Sync,
{
    /// Build this worker's resources and run the entry point.  Returns the
    /// worker's generator seed.
    fn run(&self, id: WorkerId) -> Result<u64, WorkerFailure> {
        let rng = self.registry.get_generator().map_err(|e| setup_failure(id, e))?;
        let seed = rng.seed();
        self.observer.on_worker_start(id, seed);
        debug!(worker = %id, seed, "worker started");

        let policy = self.policies.build(id).map_err(|e| setup_failure(id, e))?;
        let strategy = self.strategies.build(id).map_err(|e| setup_failure(id, e))?;

        let mut actor = self.actor_alloc.acquire(|| Actor::new(policy, strategy, rng));
        let mut env = self.env_alloc.acquire(|| self.envs.make(id));
        {
            let mut actor = actor.get_mut();
            let mut env = env.get_mut();
            (self.train)(&mut *actor, &mut *env, id);
        }

        self.observer.on_worker_end(id);
        debug!(worker = %id, "worker finished");
        Ok(seed)
    }
}

fn setup_failure(id: WorkerId, error: impl fmt::Display) -> WorkerFailure {
    WorkerFailure::new(id, FailureStage::Setup, error.to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
