//! Parameter storage shared read-only between rollout workers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Handle to a parameter vector owned by the Learner.
///
/// Cloning the handle shares the same storage.  Workers call
/// [`snapshot`](Self::snapshot) to read; the Learner calls
/// [`publish`](Self::publish) between rollout phases to install a new vector.
/// Readers holding an older snapshot keep it alive until they drop it, so a
/// publish never mutates memory a worker is reading.
#[derive(Clone, Debug)]
pub struct SharedParams {
    inner: Arc<ParamCell>,
}

#[derive(Debug)]
struct ParamCell {
    values:  RwLock<Arc<[f64]>>,
    version: AtomicU64,
}

impl SharedParams {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            inner: Arc::new(ParamCell {
                values:  RwLock::new(values.into()),
                version: AtomicU64::new(0),
            }),
        }
    }

    /// An empty parameter set, for policies with nothing to learn.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The current parameter vector.
    pub fn snapshot(&self) -> Arc<[f64]> {
        let guard = self.inner.values.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Replace the parameter vector and bump the version.
    pub fn publish(&self, values: Vec<f64>) {
        let mut guard = self.inner.values.write().unwrap_or_else(PoisonError::into_inner);
        *guard = values.into();
        self.inner.version.fetch_add(1, Ordering::Release);
    }

    /// Number of `publish` calls so far.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if both handles point at the same storage.
    pub fn shares_with(&self, other: &SharedParams) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::empty()
    }
}
