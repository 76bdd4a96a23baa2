//! Error types for answer verification
//!
//! Every failure the grader can observe is represented here so that callers
//! (and tests) can match on outcomes instead of parsing printed text.

use thiserror::Error;

/// Result type alias for grading operations.
pub type Result<T> = std::result::Result<T, GradeError>;

/// Errors produced while building answers, loading catalogs or grading.
#[derive(Error, Debug)]
pub enum GradeError {
    /// The learner's device does not match the exercise.
    #[error("The device is incorrectly defined: {0}")]
    DeviceMismatch(#[from] DeviceMismatch),

    /// The aggregated output is not close to the expected output.
    #[error("The output is incorrect")]
    OutputMismatch,

    /// Outputs could not be aligned for an element-wise comparison.
    #[error("shape mismatch: objects cannot be broadcast to a single shape ({actual:?} vs {expected:?})")]
    ShapeMismatch {
        /// Shape of the learner's aggregated output.
        actual: Vec<usize>,
        /// Shape of the expected output.
        expected: Vec<usize>,
    },

    /// The learner's circuit could not be executed.
    #[error("circuit execution failed: {0}")]
    Execution(#[from] ExecutionError),

    /// The exercise catalog is invalid or an entry is missing.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Reading a catalog file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A catalog document could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GradeError {
    /// Create a shape mismatch error from two shapes.
    pub fn shape_mismatch(actual: &[usize], expected: &[usize]) -> Self {
        Self::ShapeMismatch {
            actual: actual.to_vec(),
            expected: expected.to_vec(),
        }
    }

    /// Create a catalog error.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }
}

/// Reasons a device handle fails to match an expected device.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceMismatch {
    /// The device name differs from the expected one.
    #[error("expected device '{expected}', got '{actual}'")]
    NameMismatch {
        /// Name expected by the exercise.
        expected: String,
        /// Name reported by the device.
        actual: String,
    },

    /// The device exposes the wrong number of wires.
    #[error("expected {expected} wires, got {actual}")]
    WireCountMismatch {
        /// Wire count expected by the exercise.
        expected: usize,
        /// Wire count reported by the device.
        actual: usize,
    },

    /// The device does not expose a required attribute.
    #[error("device does not expose '{0}'")]
    MissingAttribute(&'static str),
}

/// Failures raised by a learner's circuit callable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The callable cannot be invoked with the supplied arguments.
    #[error("callable does not accept {0}")]
    Signature(String),

    /// The callable ran and reported a failure.
    #[error("{0}")]
    Failed(String),
}

impl ExecutionError {
    /// Create a failure from any message.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}
