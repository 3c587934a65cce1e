use std::path::Path;

use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView1, s};
use rand::Rng;

use crate::{
    BufferConfig, BufferErr, Result,
    sampling::SamplePolicy,
    snapshot::{self, SnapshotMeta},
};

/// A batch of sampler output: samples, log importance weights and the log
/// density the generator assigned to each sample when it was produced.
#[derive(Debug, Clone)]
pub struct ReplayBatch {
    pub x: Array2<f32>,
    pub log_w: Array1<f32>,
    pub log_q_old: Array1<f32>,
}

impl ReplayBatch {
    /// Creates a new `ReplayBatch`.
    ///
    /// # Args
    /// * `x` - Sample rows, one per record.
    /// * `log_w` - Log importance weight per record.
    /// * `log_q_old` - Generator log density per record.
    ///
    /// # Errors
    /// Returns `BufferErr::SizeMismatch` if the three leading dimensions
    /// disagree.
    pub fn new(x: Array2<f32>, log_w: Array1<f32>, log_q_old: Array1<f32>) -> Result<Self> {
        if log_w.len() != x.nrows() {
            return Err(BufferErr::SizeMismatch {
                a: "log_w",
                b: "x rows",
                got: log_w.len(),
                expected: x.nrows(),
            });
        }

        if log_q_old.len() != x.nrows() {
            return Err(BufferErr::SizeMismatch {
                a: "log_q_old",
                b: "x rows",
                got: log_q_old.len(),
                expected: x.nrows(),
            });
        }

        Ok(Self { x, log_w, log_q_old })
    }

    /// Returns the number of records in the batch.
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    /// Returns whether the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A drawn minibatch together with the buffer indices it came from.
///
/// The indices are what `ReplayBuffer::adjust` takes back once the caller has
/// recomputed weights under new generator parameters.
#[derive(Debug, Clone)]
pub struct SampledBatch {
    pub x: Array2<f32>,
    pub log_w: Array1<f32>,
    pub log_q_old: Array1<f32>,
    pub indices: Vec<usize>,
}

impl SampledBatch {
    /// Returns the number of records in the batch.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns whether the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Fixed-capacity circular store of weighted samples with importance-weighted
/// draws.
///
/// Eviction is strict ring-buffer overwrite; the weights only bias *sampling*.
/// Storage is three flat co-indexed backings (samples are row-major), so
/// inserts and weight corrections touch contiguous memory and never allocate
/// per record.
#[derive(Debug)]
pub struct ReplayBuffer<R: Rng> {
    config: BufferConfig,
    x: Vec<f32>,
    log_w: Vec<f32>,
    log_q_old: Vec<f32>,
    write_cursor: usize,
    is_full: bool,
    can_sample: bool,
    rng: R,
}

impl<R: Rng> ReplayBuffer<R> {
    /// Creates a new `ReplayBuffer` and fills it to its minimum length.
    ///
    /// The initial sampler is invoked repeatedly and its batches inserted
    /// until the buffer reaches `config.min_fill()` records. This loop has no
    /// timeout; the sampler is expected to keep producing batches.
    ///
    /// # Args
    /// * `config` - Validated sizing and draw-policy parameters.
    /// * `rng` - Random source used for all draws.
    /// * `initial_sampler` - Produces `(x, log_w, log_q_old)` batches; must
    ///   return non-empty batches no longer than the capacity.
    ///
    /// # Errors
    /// Returns `BufferErr::EmptyBatch` if the initial sampler produces an
    /// empty batch, or any error `add` reports for its output.
    pub fn new<F>(config: BufferConfig, rng: R, mut initial_sampler: F) -> Result<Self>
    where
        F: FnMut() -> ReplayBatch,
    {
        let capacity = config.capacity();

        let mut buffer = Self {
            x: vec![0.0; capacity * config.dim()],
            log_w: vec![0.0; capacity],
            log_q_old: vec![0.0; capacity],
            write_cursor: 0,
            is_full: false,
            can_sample: false,
            config,
            rng,
        };

        let mut rounds = 0usize;
        while !buffer.can_sample {
            let batch = initial_sampler();
            if batch.is_empty() {
                return Err(BufferErr::EmptyBatch {
                    what: "initial sampler",
                });
            }

            buffer.add(batch)?;
            rounds += 1;
        }

        info!(
            "replay buffer ready: rounds={rounds} records={} min_fill={}",
            buffer.len(),
            buffer.config.min_fill()
        );

        Ok(buffer)
    }

    /// Inserts a batch, overwriting the oldest slots once the buffer is full.
    ///
    /// Records land at `(write_cursor + i) % capacity`; the cursor then
    /// advances by the batch size modulo capacity. The `is_full` and
    /// `can_sample` flags are monotonic and only re-evaluated while the
    /// buffer has not yet filled.
    ///
    /// # Args
    /// * `batch` - The records to insert. An empty batch is a no-op.
    ///
    /// # Errors
    /// Returns `BufferErr::SizeMismatch` if the sample width differs from the
    /// configured dimension, or `BufferErr::InvalidBatch` if the batch is
    /// longer than the capacity (a longer batch would alias its own slots
    /// through the wrap-around).
    pub fn add(&mut self, batch: ReplayBatch) -> Result<()> {
        let capacity = self.config.capacity();
        let dim = self.config.dim();
        let b = batch.len();

        if batch.x.ncols() != dim {
            return Err(BufferErr::SizeMismatch {
                a: "batch x columns",
                b: "buffer dim",
                got: batch.x.ncols(),
                expected: dim,
            });
        }

        if b > capacity {
            return Err(BufferErr::InvalidBatch {
                what: "insertion batch",
                got: b,
                limit: capacity,
            });
        }

        if b == 0 {
            return Ok(());
        }

        for i in 0..b {
            let slot = (self.write_cursor + i) % capacity;
            let row = &mut self.x[slot * dim..(slot + 1) * dim];
            for (dst, &src) in row.iter_mut().zip(batch.x.row(i)) {
                *dst = src;
            }

            self.log_w[slot] = batch.log_w[i];
            self.log_q_old[slot] = batch.log_q_old[i];
        }

        let advanced = self.write_cursor + b;
        if !self.is_full {
            self.is_full = advanced >= capacity;
            self.can_sample = self.can_sample || advanced >= self.config.min_fill();
        }
        self.write_cursor = advanced % capacity;

        if advanced >= capacity {
            debug!("write cursor wrapped: cursor={}", self.write_cursor);
        }

        Ok(())
    }

    /// Draws a weighted minibatch of copies from the live window.
    ///
    /// The live window is the whole buffer once full, otherwise the first
    /// `len()` slots. Buffer contents are not mutated; the RNG state is.
    ///
    /// # Args
    /// * `batch_size` - Number of records to draw.
    ///
    /// # Errors
    /// Returns `BufferErr::BufferNotReady` before the minimum fill is
    /// reached, `BufferErr::InvalidBatch` if a without-replacement draw asks
    /// for more records than the live window holds, or
    /// `BufferErr::DegenerateWeights` if the stored weights cannot be drawn
    /// from.
    pub fn sample(&mut self, batch_size: usize) -> Result<SampledBatch> {
        if !self.can_sample {
            return Err(BufferErr::BufferNotReady {
                len: self.len(),
                min_fill: self.config.min_fill(),
            });
        }

        let window = self.len();
        let policy = self.config.policy();

        if policy == SamplePolicy::WithoutReplacement && batch_size > window {
            return Err(BufferErr::InvalidBatch {
                what: "sample batch",
                got: batch_size,
                limit: window,
            });
        }

        let indices = policy.draw(&mut self.rng, &self.log_w[..window], batch_size)?;
        Ok(self.gather(indices))
    }

    /// Draws `batch_size * n_batches` records in one weighted pass and
    /// partitions them positionally into `n_batches` chunks.
    ///
    /// # Errors
    /// Fails under the same conditions as `sample` for the combined size.
    pub fn sample_n_batches(
        &mut self,
        batch_size: usize,
        n_batches: usize,
    ) -> Result<Vec<SampledBatch>> {
        let drawn = self.sample(batch_size * n_batches)?;

        let batches = (0..n_batches)
            .map(|chunk| {
                let range = chunk * batch_size..(chunk + 1) * batch_size;
                SampledBatch {
                    x: drawn.x.slice(s![range.clone(), ..]).to_owned(),
                    log_w: drawn.log_w.slice(s![range.clone()]).to_owned(),
                    log_q_old: drawn.log_q_old.slice(s![range.clone()]).to_owned(),
                    indices: drawn.indices[range].to_vec(),
                }
            })
            .collect();

        Ok(batches)
    }

    /// Applies weight corrections after the generator's parameters changed.
    ///
    /// `log_w_delta` is added to the stored log weight (a multiplicative
    /// correction in weight space); `log_q_new` replaces the stored log
    /// density. Entries with an infinite delta or a NaN density are silently
    /// dropped, so one degenerate correction does not abort an otherwise
    /// valid update. Cursor and flags are untouched.
    ///
    /// # Args
    /// * `log_w_delta` - Additive log-weight correction per index.
    /// * `log_q_new` - Replacement log density per index.
    /// * `indices` - Buffer slots to correct, as returned by `sample`.
    ///
    /// # Errors
    /// Returns `BufferErr::SizeMismatch` if the three inputs are not
    /// co-sized.
    ///
    /// # Panics
    /// If an index is outside the buffer's capacity.
    pub fn adjust(
        &mut self,
        log_w_delta: ArrayView1<f32>,
        log_q_new: ArrayView1<f32>,
        indices: &[usize],
    ) -> Result<()> {
        if log_w_delta.len() != indices.len() {
            return Err(BufferErr::SizeMismatch {
                a: "log_w_delta",
                b: "indices",
                got: log_w_delta.len(),
                expected: indices.len(),
            });
        }

        if log_q_new.len() != indices.len() {
            return Err(BufferErr::SizeMismatch {
                a: "log_q_new",
                b: "indices",
                got: log_q_new.len(),
                expected: indices.len(),
            });
        }

        let mut dropped = 0usize;
        for ((&delta, &log_q), &idx) in log_w_delta.iter().zip(log_q_new.iter()).zip(indices) {
            if delta.is_infinite() || log_q.is_nan() {
                dropped += 1;
                continue;
            }

            self.log_w[idx] += delta;
            self.log_q_old[idx] = log_q;
        }

        if dropped > 0 {
            debug!("adjust dropped degenerate corrections: dropped={dropped}");
        }

        Ok(())
    }

    /// Writes the full buffer state to a snapshot file.
    ///
    /// # Errors
    /// Returns `BufferErr::Io` on write failure.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let meta = SnapshotMeta {
            capacity: self.config.capacity(),
            dim: self.config.dim(),
            write_cursor: self.write_cursor,
            is_full: self.is_full,
            can_sample: self.can_sample,
        };

        snapshot::write(path, &meta, [&self.x, &self.log_w, &self.log_q_old])?;
        debug!("replay buffer saved: path={}", path.display());

        Ok(())
    }

    /// Restores buffer state from a snapshot file.
    ///
    /// # Errors
    /// Returns `BufferErr::IncompatibleState` if the snapshot's capacity or
    /// dimension differ from this buffer's configuration, or `BufferErr::Io`
    /// on read failure.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let (meta, x, log_w, log_q_old) = snapshot::read(path)?;

        if meta.capacity != self.config.capacity() {
            return Err(BufferErr::IncompatibleState {
                what: "capacity",
                got: meta.capacity,
                expected: self.config.capacity(),
            });
        }

        if meta.dim != self.config.dim() {
            return Err(BufferErr::IncompatibleState {
                what: "dim",
                got: meta.dim,
                expected: self.config.dim(),
            });
        }

        if meta.write_cursor >= meta.capacity {
            return Err(BufferErr::IncompatibleState {
                what: "write_cursor",
                got: meta.write_cursor,
                expected: meta.capacity,
            });
        }

        self.x = x;
        self.log_w = log_w;
        self.log_q_old = log_q_old;
        self.write_cursor = meta.write_cursor;
        self.is_full = meta.is_full;
        self.can_sample = meta.can_sample;

        debug!("replay buffer loaded: path={}", path.display());
        Ok(())
    }

    /// Returns the number of live records (the whole capacity once full).
    pub fn len(&self) -> usize {
        if self.is_full {
            self.config.capacity()
        } else {
            self.write_cursor
        }
    }

    /// Returns whether the buffer holds no records yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the buffer's maximum number of records.
    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    /// Returns the dimension of the stored sample vectors.
    pub fn dim(&self) -> usize {
        self.config.dim()
    }

    /// Returns whether every slot has been written at least once.
    pub fn is_full(&self) -> bool {
        self.is_full
    }

    /// Returns whether the buffer has reached its minimum sampling length.
    pub fn can_sample(&self) -> bool {
        self.can_sample
    }

    fn gather(&self, indices: Vec<usize>) -> SampledBatch {
        let dim = self.config.dim();

        let mut x = Vec::with_capacity(indices.len() * dim);
        let mut log_w = Vec::with_capacity(indices.len());
        let mut log_q_old = Vec::with_capacity(indices.len());

        for &idx in &indices {
            x.extend_from_slice(&self.x[idx * dim..(idx + 1) * dim]);
            log_w.push(self.log_w[idx]);
            log_q_old.push(self.log_q_old[idx]);
        }

        SampledBatch {
            x: Array2::from_shape_vec((indices.len(), dim), x).unwrap(),
            log_w: Array1::from_vec(log_w),
            log_q_old: Array1::from_vec(log_q_old),
            indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use ndarray::{Array1, Array2, array};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn config(dim: usize, capacity: usize, min_fill: usize, policy: SamplePolicy) -> BufferConfig {
        BufferConfig::new(
            NonZeroUsize::new(dim).unwrap(),
            NonZeroUsize::new(capacity).unwrap(),
            NonZeroUsize::new(min_fill).unwrap(),
            policy,
        )
        .unwrap()
    }

    fn constant_batch(b: usize, dim: usize, value: f32, log_w: f32) -> ReplayBatch {
        ReplayBatch::new(
            Array2::from_elem((b, dim), value),
            Array1::from_elem(b, log_w),
            Array1::from_elem(b, 1.0),
        )
        .unwrap()
    }

    fn filled_buffer(
        dim: usize,
        capacity: usize,
        min_fill: usize,
        policy: SamplePolicy,
    ) -> ReplayBuffer<StdRng> {
        ReplayBuffer::new(config(dim, capacity, min_fill, policy), StdRng::seed_from_u64(42), || {
            constant_batch(2, dim, 1.0, 0.0)
        })
        .unwrap()
    }

    #[test]
    fn batch_rejects_mismatched_leading_dims() {
        let result = ReplayBatch::new(
            Array2::zeros((3, 2)),
            Array1::zeros(2),
            Array1::zeros(3),
        );

        assert!(matches!(result, Err(BufferErr::SizeMismatch { .. })));
    }

    #[test]
    fn construction_fills_to_minimum_length() {
        const CAPACITY: usize = 10;
        const MIN_FILL: usize = 4;

        let buffer = filled_buffer(3, CAPACITY, MIN_FILL, SamplePolicy::WithoutReplacement);

        assert!(buffer.can_sample());
        assert!(buffer.len() >= MIN_FILL);
        assert!(!buffer.is_full());
    }

    #[test]
    fn construction_rejects_empty_initial_batches() {
        let result = ReplayBuffer::new(
            config(2, 6, 3, SamplePolicy::WithoutReplacement),
            StdRng::seed_from_u64(0),
            || constant_batch(0, 2, 0.0, 0.0),
        );

        assert!(matches!(result, Err(BufferErr::EmptyBatch { .. })));
    }

    #[test]
    fn circular_overwrite_scenario() {
        // capacity=6, min_fill=3, dim=2: construction inserts two batches of
        // two (4 >= 3), a third batch wraps the cursor to zero and fills the
        // buffer, a fourth lands in slots 0 and 1.
        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        assert_eq!(buffer.write_cursor, 4);

        buffer.add(constant_batch(2, 2, 1.0, 0.0)).unwrap();
        assert_eq!(buffer.write_cursor, 0);
        assert!(buffer.is_full());
        assert!(buffer.can_sample());
        assert_eq!(buffer.len(), 6);

        buffer
            .add(ReplayBatch::new(array![[9.0, 9.0], [9.0, 9.0]], array![0.5, 0.5], array![2.0, 2.0]).unwrap())
            .unwrap();
        assert_eq!(buffer.write_cursor, 2);
        assert!(buffer.is_full());
        assert_eq!(buffer.len(), 6);

        assert_eq!(&buffer.x[0..4], &[9.0, 9.0, 9.0, 9.0]);
        assert_eq!(&buffer.log_w[0..2], &[0.5, 0.5]);
        assert_eq!(&buffer.log_q_old[0..2], &[2.0, 2.0]);
        // slot 2 onwards untouched
        assert_eq!(&buffer.x[4..6], &[1.0, 1.0]);
    }

    #[test]
    fn add_rejects_batch_longer_than_capacity() {
        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        let result = buffer.add(constant_batch(7, 2, 0.0, 0.0));

        assert!(matches!(
            result,
            Err(BufferErr::InvalidBatch { got: 7, limit: 6, .. })
        ));
    }

    #[test]
    fn add_rejects_wrong_sample_width() {
        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        let result = buffer.add(constant_batch(2, 3, 0.0, 0.0));

        assert!(matches!(result, Err(BufferErr::SizeMismatch { .. })));
    }

    #[test]
    fn add_accepts_empty_batch_as_noop() {
        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        let cursor = buffer.write_cursor;

        buffer.add(constant_batch(0, 2, 0.0, 0.0)).unwrap();
        assert_eq!(buffer.write_cursor, cursor);
    }

    #[test]
    fn sample_requires_minimum_fill() {
        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        buffer.can_sample = false;

        let result = buffer.sample(2);
        assert!(matches!(result, Err(BufferErr::BufferNotReady { .. })));
    }

    #[test]
    fn sample_without_replacement_is_bounded_by_window() {
        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        let window = buffer.len();

        let result = buffer.sample(window + 1);
        assert!(matches!(result, Err(BufferErr::InvalidBatch { .. })));
    }

    #[test]
    fn sample_without_replacement_returns_distinct_indices() {
        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        let drawn = buffer.sample(4).unwrap();

        let mut indices = drawn.indices.clone();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 4);
    }

    #[test]
    fn sample_returns_copies_of_stored_records() {
        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithReplacement);
        buffer
            .add(ReplayBatch::new(array![[7.0, 8.0]], array![3.0], array![-1.5]).unwrap())
            .unwrap();

        let drawn = buffer.sample(16).unwrap();
        assert_eq!(drawn.len(), 16);

        for (row, &idx) in drawn.indices.iter().enumerate() {
            assert!(idx < buffer.len());
            assert_eq!(drawn.log_w[row], buffer.log_w[idx]);
            assert_eq!(drawn.log_q_old[row], buffer.log_q_old[idx]);
            assert_eq!(drawn.x[[row, 0]], buffer.x[idx * 2]);
            assert_eq!(drawn.x[[row, 1]], buffer.x[idx * 2 + 1]);
        }
    }

    #[test]
    fn sample_n_batches_partitions_positionally() {
        const BATCH_SIZE: usize = 2;
        const N_BATCHES: usize = 3;

        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithReplacement);
        let batches = buffer.sample_n_batches(BATCH_SIZE, N_BATCHES).unwrap();

        assert_eq!(batches.len(), N_BATCHES);
        for batch in &batches {
            assert_eq!(batch.len(), BATCH_SIZE);
            assert_eq!(batch.x.nrows(), BATCH_SIZE);
            assert_eq!(batch.log_w.len(), BATCH_SIZE);
            assert_eq!(batch.log_q_old.len(), BATCH_SIZE);
        }
    }

    #[test]
    fn adjust_applies_additive_weight_and_replaces_density() {
        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        let before = buffer.log_w[1];

        buffer
            .adjust(array![0.25].view(), array![-4.0].view(), &[1])
            .unwrap();

        assert_eq!(buffer.log_w[1], before + 0.25);
        assert_eq!(buffer.log_q_old[1], -4.0);
    }

    #[test]
    fn adjust_filters_degenerate_entries() {
        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        let log_w_before = buffer.log_w.clone();
        let log_q_before = buffer.log_q_old.clone();

        // slot 0 gets an infinite delta, slot 1 a NaN density, slot 2 is fine
        buffer
            .adjust(
                array![f32::INFINITY, 0.5, 1.0].view(),
                array![1.0, f32::NAN, -2.0].view(),
                &[0, 1, 2],
            )
            .unwrap();

        assert_eq!(buffer.log_w[0], log_w_before[0]);
        assert_eq!(buffer.log_q_old[0], log_q_before[0]);
        assert_eq!(buffer.log_w[1], log_w_before[1]);
        assert_eq!(buffer.log_q_old[1], log_q_before[1]);

        assert_eq!(buffer.log_w[2], log_w_before[2] + 1.0);
        assert_eq!(buffer.log_q_old[2], -2.0);
    }

    #[test]
    fn adjust_rejects_missized_inputs() {
        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        let result = buffer.adjust(array![0.1, 0.2].view(), array![0.0].view(), &[0]);

        assert!(matches!(result, Err(BufferErr::SizeMismatch { .. })));
    }

    #[test]
    fn snapshot_round_trips_full_state() {
        let path = std::env::temp_dir().join("ais_replay_round_trip.snap");

        let mut buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        buffer
            .add(ReplayBatch::new(array![[3.0, 4.0]], array![0.7], array![-0.3]).unwrap())
            .unwrap();
        buffer.save(&path).unwrap();

        let mut restored = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        restored.load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(restored.x, buffer.x);
        assert_eq!(restored.log_w, buffer.log_w);
        assert_eq!(restored.log_q_old, buffer.log_q_old);
        assert_eq!(restored.write_cursor, buffer.write_cursor);
        assert_eq!(restored.is_full, buffer.is_full);
        assert_eq!(restored.can_sample, buffer.can_sample);
    }

    #[test]
    fn load_rejects_mismatched_capacity() {
        let path = std::env::temp_dir().join("ais_replay_capacity_mismatch.snap");

        let buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        buffer.save(&path).unwrap();

        let mut other = filled_buffer(2, 8, 3, SamplePolicy::WithoutReplacement);
        let result = other.load(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            result,
            Err(BufferErr::IncompatibleState { what: "capacity", got: 6, expected: 8 })
        ));
    }

    #[test]
    fn load_rejects_mismatched_dim() {
        let path = std::env::temp_dir().join("ais_replay_dim_mismatch.snap");

        let buffer = filled_buffer(2, 6, 3, SamplePolicy::WithoutReplacement);
        buffer.save(&path).unwrap();

        let mut other = filled_buffer(3, 6, 3, SamplePolicy::WithoutReplacement);
        let result = other.load(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            result,
            Err(BufferErr::IncompatibleState { what: "dim", .. })
        ));
    }
}
