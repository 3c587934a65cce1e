use std::num::NonZeroUsize;

use crate::{BufferErr, Result, sampling::SamplePolicy};

/// Immutable sizing and sampling parameters for a replay buffer.
///
/// `capacity` and `min_fill` should be long enough to prevent overfitting to
/// the replay data: if `min_fill` equals the training batch size, the first
/// batch would be updated on many times at the start of training.
#[derive(Debug, Clone, Copy)]
pub struct BufferConfig {
    dim: NonZeroUsize,
    capacity: NonZeroUsize,
    min_fill: NonZeroUsize,
    policy: SamplePolicy,
}

impl BufferConfig {
    /// Creates a new buffer configuration.
    ///
    /// # Args
    /// * `dim` - Dimension of the stored sample vectors.
    /// * `capacity` - Maximum number of records the buffer holds.
    /// * `min_fill` - Minimum number of records required before sampling.
    /// * `policy` - Whether draws are made with or without replacement.
    ///
    /// # Errors
    /// Returns `BufferErr::InvalidConfiguration` if `min_fill >= capacity`.
    pub fn new(
        dim: NonZeroUsize,
        capacity: NonZeroUsize,
        min_fill: NonZeroUsize,
        policy: SamplePolicy,
    ) -> Result<Self> {
        if min_fill >= capacity {
            return Err(BufferErr::InvalidConfiguration {
                min_fill: min_fill.get(),
                capacity: capacity.get(),
            });
        }

        Ok(Self {
            dim,
            capacity,
            min_fill,
            policy,
        })
    }

    /// Returns the dimension of the stored sample vectors.
    pub fn dim(&self) -> usize {
        self.dim.get()
    }

    /// Returns the maximum number of records the buffer holds.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the minimum number of records required before sampling.
    pub fn min_fill(&self) -> usize {
        self.min_fill.get()
    }

    /// Returns the buffer's draw policy.
    pub fn policy(&self) -> SamplePolicy {
        self.policy
    }
}
