//! Answer verification
//!
//! Grading runs in three steps: every answer's device is checked against the
//! exercise, the answers' outputs are stacked in submission order, and the
//! stack is compared with the expected output.

pub mod device_check;
pub mod output_check;
pub mod grader;

pub use device_check::{check_device, verify_device};
pub use output_check::{check_output, verify_output};
pub use grader::{grade, DeviceFinding, DevicePolicy, GradeReport, Grader, GraderConfig, Submission, Verdict};
