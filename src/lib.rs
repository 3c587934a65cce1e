pub mod buffer;
pub mod config;
pub mod error;
pub mod sampling;
mod snapshot;

pub use buffer::{ReplayBatch, ReplayBuffer, SampledBatch};
pub use config::BufferConfig;
pub use error::{BufferErr, Result};
pub use sampling::SamplePolicy;
