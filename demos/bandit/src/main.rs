//! `bandit`: epsilon-greedy actors learning a Bernoulli multi-armed bandit.
//!
//! Each phase launches one actor per worker thread against its own bandit
//! instance.  Workers tally pulls and wins per arm; between phases the
//! "learner" (this `main`) merges the tallies and publishes new value
//! estimates, which every policy reads in the next phase.
//!
//! Run with:
//!   RUST_LOG=debug cargo run -p bandit --release

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ro_core::{Action, ActionSpace, Environment, GeneratorHandle, RandomEngine, Step, WorkerId};
use ro_explore::{EpsilonSchedule, ExplorationConfig};
use ro_launch::{LaunchConfig, Launcher, PerWorker, rollout};
use ro_policy::{Approximator, PolicyKind, SharedParams};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64   = 42;
/// Seed offset for the environments' payout streams.
const ENV_SEED:      u64   = 7_000;
const PHASES:        usize = 5;
const EPISODES:      usize = 20;
/// Pulls per episode.
const HORIZON:       u64   = 50;
/// Win probability of each arm.  Arm 3 is best.
const PAYOUTS: [f64; 5] = [0.20, 0.45, 0.50, 0.70, 0.30];

// ── Environment ───────────────────────────────────────────────────────────────

/// A stateless bandit: every pull pays 1 with the arm's probability.
struct Bandit {
    payouts: &'static [f64],
    rng:     GeneratorHandle,
    pulls:   u64,
}

impl Environment for Bandit {
    type State = ();

    fn reset(&mut self) {
        self.pulls = 0;
    }

    fn step(&mut self, action: &Action) -> Step<()> {
        let arm = action.as_discrete().and_then(|a| a.first().copied()).unwrap_or(0);
        let p = self.payouts.get(arm).copied().unwrap_or(0.0);
        let reward = if self.rng.uniform() < p { 1.0 } else { 0.0 };
        self.pulls += 1;
        Step { next_state: (), reward, terminated: false, truncated: self.pulls >= HORIZON }
    }
}

// ── Approximator ──────────────────────────────────────────────────────────────

/// Per-arm value estimates, published by the learner.
struct ValueTable {
    params: SharedParams,
}

impl Approximator for ValueTable {
    type State = ();

    fn predict(&self, _: &()) -> Vec<f64> {
        self.params.snapshot().to_vec()
    }

    fn parameters(&self) -> &SharedParams {
        &self.params
    }
}

// ── Learner tally ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct Tally {
    pulls: Vec<u64>,
    wins:  Vec<f64>,
}

impl Tally {
    fn new(arms: usize) -> Self {
        Self { pulls: vec![0; arms], wins: vec![0.0; arms] }
    }

    fn record(&mut self, arm: usize, reward: f64) {
        self.pulls[arm] += 1;
        self.wins[arm] += reward;
    }

    fn merge(&mut self, other: &Tally) {
        for (a, b) in self.pulls.iter_mut().zip(&other.pulls) {
            *a += b;
        }
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
    }

    /// Empirical win rate per arm, 0.5 for arms never pulled.
    fn estimates(&self) -> Vec<f64> {
        self.pulls
            .iter()
            .zip(&self.wins)
            .map(|(&n, &w)| if n == 0 { 0.5 } else { w / n as f64 })
            .collect()
    }
}

/// Merge a worker's tally into the phase total, ignoring lock poisoning.
fn fold_into(shared: &Mutex<Tally>, local: &Tally) {
    shared.lock().unwrap_or_else(PoisonError::into_inner).merge(local);
}

fn init_logging() {
    // Later phases find the subscriber already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let arms = PAYOUTS.len();
    let space = ActionSpace::discrete_uniform(1, arms)?;
    let table = Arc::new(ValueTable { params: SharedParams::new(vec![0.5; arms]) });

    let exploration = ExplorationConfig {
        epsilon:    EpsilonSchedule::exponential(0.5, 0.05, 0.995)?,
        batch_size: 256,
    };
    exploration.validate()?;

    RandomEngine::set_seed(SEED);
    let mut learned = Tally::new(arms);

    for phase in 0..PHASES {
        let phase_tally = Mutex::new(Tally::new(arms));

        let policies = |_: WorkerId| PolicyKind::Direct.build(Arc::clone(&table), space.clone());
        let strategies = |_: WorkerId| exploration.build();
        let envs = PerWorker(|id: WorkerId| Bandit {
            payouts: &PAYOUTS,
            rng:     GeneratorHandle::from_seed(ENV_SEED + (phase * 1_000) as u64 + u64::from(id.0)),
            pulls:   0,
        });

        let report = Launcher::new(LaunchConfig::default(), policies, strategies, envs)
            .setup(init_logging)
            .launch(|actor, env, _| {
                let mut local = Tally::new(arms);
                for _ in 0..EPISODES {
                    env.reset();
                    loop {
                        let action = actor.explore(&());
                        let arm = action.as_discrete().map_or(0, |a| a[0]);
                        let step = env.step(&action);
                        local.record(arm, step.reward);
                        if step.is_done() {
                            break;
                        }
                    }
                }
                // One more episode through the reference loop, for its stats.
                let stats = rollout(actor, env, HORIZON);
                tracing::debug!(reward = stats.total_reward, "evaluation episode");
                fold_into(&phase_tally, &local);
            })?;

        let phase_tally = phase_tally.into_inner().unwrap_or_else(PoisonError::into_inner);
        learned.merge(&phase_tally);
        table.params.publish(learned.estimates());

        info!(
            phase,
            workers = report.workers,
            version = table.params.version(),
            "published value estimates"
        );
    }

    let estimates = table.params.snapshot();
    println!("arm   payout  estimate  pulls");
    for (arm, (&p, &est)) in PAYOUTS.iter().zip(estimates.iter()).enumerate() {
        println!("{arm:>3}   {p:>6.2}  {est:>8.3}  {:>5}", learned.pulls[arm]);
    }
    let best = estimates
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map_or(0, |(i, _)| i);
    println!("best arm: {best}");
    Ok(())
}
