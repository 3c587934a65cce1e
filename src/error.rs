use std::{error::Error, fmt, io};

use rand::distr::weighted::Error as WeightError;

/// The replay buffer's result type.
pub type Result<T> = std::result::Result<T, BufferErr>;

/// Replay buffer failures.
#[derive(Debug)]
pub enum BufferErr {
    InvalidConfiguration {
        min_fill: usize,
        capacity: usize,
    },
    BufferNotReady {
        len: usize,
        min_fill: usize,
    },
    InvalidBatch {
        what: &'static str,
        got: usize,
        limit: usize,
    },
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyBatch {
        what: &'static str,
    },
    IncompatibleState {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    DegenerateWeights(WeightError),
    Io(io::Error),
}

impl fmt::Display for BufferErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferErr::InvalidConfiguration { min_fill, capacity } => write!(
                f,
                "minimum fill {min_fill} must be smaller than capacity {capacity}"
            ),
            BufferErr::BufferNotReady { len, min_fill } => write!(
                f,
                "buffer holds {len} records, sampling requires at least {min_fill}"
            ),
            BufferErr::InvalidBatch { what, got, limit } => {
                write!(f, "invalid batch: {what} {got} exceeds limit {limit}")
            }
            BufferErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            BufferErr::EmptyBatch { what } => write!(f, "{what} produced an empty batch"),
            BufferErr::IncompatibleState {
                what,
                got,
                expected,
            } => write!(
                f,
                "incompatible snapshot: {what} is {got}, buffer expects {expected}"
            ),
            BufferErr::DegenerateWeights(e) => write!(f, "weighted draw rejected: {e}"),
            BufferErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for BufferErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BufferErr::Io(e) => Some(e),
            BufferErr::DegenerateWeights(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BufferErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<WeightError> for BufferErr {
    fn from(value: WeightError) -> Self {
        Self::DegenerateWeights(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<BufferErr> for io::Error {
    fn from(value: BufferErr) -> Self {
        match value {
            BufferErr::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
