//! Launch observer trait for progress reporting.

use ro_core::WorkerId;

use crate::LaunchReport;

/// Callbacks invoked by [`Launcher::launch`][crate::Launcher::launch].
///
/// Worker hooks run on the worker threads themselves, concurrently, so the
/// trait takes `&self` and requires `Sync`.  Every method defaults to a
/// no-op.
///
/// # Example: counting finished workers
///
/// ```rust,ignore
/// struct Finished(AtomicUsize);
///
/// impl LaunchObserver for Finished {
///     fn on_worker_end(&self, _worker: WorkerId) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait LaunchObserver: Sync {
    /// Called on the launching thread once the worker count is known, before
    /// any thread is spawned.
    fn on_launch_start(&self, _workers: usize) {}

    /// Called on the worker thread once its generator has been issued.
    fn on_worker_start(&self, _worker: WorkerId, _seed: u64) {}

    /// Called on the worker thread after the training entry point returns.
    /// Not called for workers that fail.
    fn on_worker_end(&self, _worker: WorkerId) {}

    /// Called on the launching thread after every worker joined successfully.
    fn on_launch_end(&self, _report: &LaunchReport) {}
}

/// A [`LaunchObserver`] that does nothing.
pub struct NoopObserver;

impl LaunchObserver for NoopObserver {}
