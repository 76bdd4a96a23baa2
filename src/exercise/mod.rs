//! Exercises and the exercise catalog
//!
//! An exercise fixes what a correct submission looks like: the device it must
//! run on and the numbers it must produce.

pub mod catalog;

pub use catalog::Catalog;

use serde::{Deserialize, Serialize};

use crate::device::DeviceSpec;
use crate::output::Output;

/// A gradable exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    name: String,
    expected_device: DeviceSpec,
    expected_output: Output,
}

impl Exercise {
    /// Create a new exercise
    pub fn new(name: impl Into<String>, expected_device: DeviceSpec, expected_output: impl Into<Output>) -> Self {
        Exercise {
            name: name.into(),
            expected_device,
            expected_output: expected_output.into(),
        }
    }

    /// Display name of the exercise
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device a correct answer runs on
    pub fn expected_device(&self) -> &DeviceSpec {
        &self.expected_device
    }

    /// Output a correct answer produces
    pub fn expected_output(&self) -> &Output {
        &self.expected_output
    }
}
