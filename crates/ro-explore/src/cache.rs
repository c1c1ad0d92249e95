//! Batched pre-drawn uniforms.

use ro_core::GeneratorHandle;
use tracing::trace;

use crate::{ExploreError, ExploreResult};

/// A fixed-size buffer of uniform `[0, 1)` draws plus a read cursor.
///
/// The cache is either *exhausted* (`cursor == batch_size`, the initial
/// state) or *filled*.  Reading from an exhausted cache first refills the
/// whole buffer from the supplied generator in one pass.
#[derive(Debug)]
pub struct RandomCache {
    values:  Box<[f64]>,
    cursor:  usize,
    refills: u64,
}

impl RandomCache {
    pub fn new(batch_size: usize) -> ExploreResult<Self> {
        if batch_size == 0 {
            return Err(ExploreError::EmptyBatch);
        }
        Ok(Self {
            values:  vec![0.0; batch_size].into_boxed_slice(),
            cursor:  batch_size,
            refills: 0,
        })
    }

    /// Next cached uniform, refilling from `rng` first if exhausted.
    pub fn next(&mut self, rng: &mut GeneratorHandle) -> f64 {
        if self.is_exhausted() {
            self.refill(rng);
        }
        let value = self.values[self.cursor];
        self.cursor += 1;
        value
    }

    fn refill(&mut self, rng: &mut GeneratorHandle) {
        rng.fill_uniform(&mut self.values);
        self.cursor = 0;
        self.refills += 1;
        trace!(batch = self.values.len(), refills = self.refills, "random cache refilled");
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.values.len()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn batch_size(&self) -> usize {
        self.values.len()
    }

    /// How many times the buffer has been (re)filled.
    #[inline]
    pub fn refills(&self) -> u64 {
        self.refills
    }
}
