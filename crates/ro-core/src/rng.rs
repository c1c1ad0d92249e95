//! Deterministic generator lineage shared by all rollout workers.
//!
//! # Determinism strategy
//!
//! A [`SeedRegistry`] holds an optional base seed.  Once the base is set, a
//! ChaCha8 *deriver* seeded from it yields one `u64` per issued handle:
//!
//!   handle_k = ChaCha8(deriver.next_u64())   for k = 0, 1, 2, …
//!
//! This means:
//!
//! - A fixed base seed and a fixed call order always reproduce the same
//!   handles, bit for bit, on every platform (ChaCha8 output is portable).
//! - Each call advances the deriver exactly once under the registry lock, so
//!   concurrent callers receive distinct seeds with no repeats and no gaps.
//! - *Which* worker receives which seed follows the order in which the calls
//!   reach the lock.  Concurrent workers are only reproducible per worker if
//!   the caller serialises the `get_generator` calls.
//!
//! Before a base seed is set every handle is seeded from the operating
//! system's entropy source instead.
//!
//! `set_seed` is a **reset**, not an additive operation: calling it again
//! restarts the lineage from the new base, and handles issued afterwards
//! repeat the sequence a fresh registry would produce.
//!
//! The lock is taken once per worker at startup, never on the per-step path.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{CoreError, CoreResult};

// ── GeneratorHandle ───────────────────────────────────────────────────────────

/// An exclusively owned pseudorandom generator.
///
/// Not `Clone`: a handle is moved into the actor (or cache) that requested it
/// and never shared.  It is `Send`, so it may be created on one thread and
/// moved into a worker, but the owning worker is the only one that draws
/// from it.
///
/// Implements [`RngCore`], so every `rand` distribution accepts it directly.
#[derive(Debug)]
pub struct GeneratorHandle {
    rng:  ChaCha8Rng,
    seed: u64,
}

impl GeneratorHandle {
    /// Build a handle from an explicit seed.  Used by the registry and by
    /// tests that need a known stream.
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), seed }
    }

    /// The seed this handle was constructed from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One uniform draw in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.rng.r#gen()
    }

    /// Fill `out` with uniform draws in `[0, 1)`.
    ///
    /// Identical to calling [`uniform`](Self::uniform) `out.len()` times.
    pub fn fill_uniform(&mut self, out: &mut [f64]) {
        for slot in out.iter_mut() {
            *slot = self.rng.r#gen();
        }
    }

    /// A uniform draw from `range`, without importing [`Rng`].
    ///
    /// # Panics
    ///
    /// If `range` is empty.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.gen_range(range)
    }
}

impl RngCore for GeneratorHandle {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

// ── Seed lineage ──────────────────────────────────────────────────────────────

/// The infinite sequence of per-handle seeds derived from `base`.
///
/// `seed_lineage(b).nth(k)` is the seed of the `k`-th handle a registry
/// issues after `set_seed(b)`.
pub fn seed_lineage(base: u64) -> impl Iterator<Item = u64> {
    let mut deriver = ChaCha8Rng::seed_from_u64(base);
    std::iter::repeat_with(move || deriver.next_u64())
}

struct Lineage {
    base:    u64,
    deriver: ChaCha8Rng,
    issued:  u64,
}

impl Lineage {
    fn new(base: u64) -> Self {
        Self { base, deriver: ChaCha8Rng::seed_from_u64(base), issued: 0 }
    }

    fn next_seed(&mut self) -> u64 {
        self.issued += 1;
        self.deriver.next_u64()
    }
}

// ── SeedRegistry ──────────────────────────────────────────────────────────────

/// Seed registry: optional base seed plus the derivation sequence.
///
/// An ordinary value, so launchers and tests can own one explicitly.  The
/// process-wide instance lives behind [`RandomEngine`].
pub struct SeedRegistry {
    lineage: Mutex<Option<Lineage>>,
}

impl SeedRegistry {
    /// A registry with no base seed: handles come from OS entropy.
    pub const fn new() -> Self {
        Self { lineage: Mutex::new(None) }
    }

    /// A registry already seeded with `base`.
    pub fn seeded(base: u64) -> Self {
        Self { lineage: Mutex::new(Some(Lineage::new(base))) }
    }

    /// Set (or reset) the base seed and restart the derivation sequence.
    pub fn set_seed(&self, base: u64) {
        *self.lock() = Some(Lineage::new(base));
        debug!(base, "seed lineage reset");
    }

    /// Issue the next generator handle.
    ///
    /// # Errors
    ///
    /// [`CoreError::EntropyUnavailable`] if no base seed is set and the OS
    /// entropy source fails.
    pub fn get_generator(&self) -> CoreResult<GeneratorHandle> {
        if let Some(lineage) = self.lock().as_mut() {
            return Ok(GeneratorHandle::from_seed(lineage.next_seed()));
        }
        entropy_seed().map(GeneratorHandle::from_seed)
    }

    /// The current base seed, if one was set.
    pub fn base_seed(&self) -> Option<u64> {
        self.lock().as_ref().map(|l| l.base)
    }

    /// Number of handles derived since the last `set_seed` (0 when unseeded).
    pub fn issued(&self) -> u64 {
        self.lock().as_ref().map_or(0, |l| l.issued)
    }

    // The guarded data is a plain generator plus counters: a panic in another
    // holder cannot leave it half-updated, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Option<Lineage>> {
        self.lineage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SeedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn entropy_seed() -> CoreResult<u64> {
    let mut bytes = [0u8; 8];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CoreError::EntropyUnavailable(e.to_string()))?;
    Ok(u64::from_le_bytes(bytes))
}

// ── RandomEngine ──────────────────────────────────────────────────────────────

static GLOBAL: SeedRegistry = SeedRegistry::new();

/// The process-wide [`SeedRegistry`].
///
/// Lifecycle: unseeded at process start; `set_seed` (re)starts the lineage;
/// never torn down before exit.  Components should receive
/// [`GeneratorHandle`]s explicitly rather than call in here from hot paths.
pub struct RandomEngine;

impl RandomEngine {
    /// Set (or reset) the process-wide base seed.
    pub fn set_seed(base: u64) {
        GLOBAL.set_seed(base);
    }

    /// Issue the next process-wide generator handle.
    pub fn get_generator() -> CoreResult<GeneratorHandle> {
        GLOBAL.get_generator()
    }

    /// Borrow the process-wide registry itself.
    pub fn registry() -> &'static SeedRegistry {
        &GLOBAL
    }
}
