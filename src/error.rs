use std::error::Error;
use std::fmt;

/// Errors raised while indexing, building or converting nested arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MdaError {
    /// An index exceeds the length of the container at `axis`.
    OutOfRange {
        axis: usize,
        index: usize,
        len: usize,
    },
    /// More indices than levels: a scalar was reached while indices remained.
    InvalidIndexDepth { depth: usize, got: usize },
    /// Fewer indices than levels: the target slot holds a sub-array, not a scalar.
    PartialIndex { depth: usize, got: usize },
    /// Input that cannot be represented as a nested array (or fails validation).
    MalformedInput { reason: String },
    /// A flat buffer does not fill the requested shape.
    ShapeMismatch { shape: Vec<usize>, len: usize },
    /// A shape specification is unusable (e.g. no axes).
    InvalidShape {
        shape: Vec<usize>,
        reason: &'static str,
    },
}

impl MdaError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        MdaError::MalformedInput {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MdaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MdaError::OutOfRange { axis, index, len } => write!(
                f,
                "index {} out of range for axis {} with length {}",
                index, axis, len
            ),
            MdaError::InvalidIndexDepth { depth, got } => write!(
                f,
                "invalid index depth: array has {} levels but {} indices were given",
                depth, got
            ),
            MdaError::PartialIndex { depth, got } => write!(
                f,
                "cannot assign a scalar with {} of {} indices: slot holds a sub-array",
                got, depth
            ),
            MdaError::MalformedInput { reason } => write!(f, "malformed input: {}", reason),
            MdaError::ShapeMismatch { shape, len } => {
                write!(f, "invalid shape {:?} for buffer of length {}", shape, len)
            }
            MdaError::InvalidShape { shape, reason } => {
                write!(f, "invalid shape {:?}: {}", shape, reason)
            }
        }
    }
}

impl Error for MdaError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MdaError>;
