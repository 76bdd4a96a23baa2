//! Answer verification for quantum computing exercises
//!
//! This crate checks a learner's circuit submission against a known-correct
//! exercise: the device must have the expected backend name and wire count,
//! and the circuit's numeric output must be close to the expected values.
//! It also includes the course's exercise catalog and a LaTeX formatter for
//! state vectors.

pub mod error;
pub mod device;
pub mod output;
pub mod answer;
pub mod exercise;
pub mod grading;
pub mod display;

pub use error::{DeviceMismatch, ExecutionError, GradeError, Result};

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::answer::{circuit, parametrized, Answer, CircuitParams, Invocation, QNode};
    pub use crate::device::{Device, DeviceHandle, DeviceSpec, Wire, Wires};
    pub use crate::display::format_state_vector;
    pub use crate::error::{DeviceMismatch, ExecutionError, GradeError};
    pub use crate::exercise::{Catalog, Exercise};
    pub use crate::grading::{check_device, check_output, grade, Grader, GraderConfig, DevicePolicy, GradeReport, Verdict};
    pub use crate::output::{Output, Tolerance};
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
