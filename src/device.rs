//! Device handles
//!
//! A device is the execution backend a learner builds their circuit on. The
//! grader only ever looks at two of its attributes: the backend name and the
//! wires it exposes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single addressable wire on a device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Wire {
    /// Wire addressed by position
    Index(usize),
    /// Wire addressed by a custom label
    Label(String),
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wire::Index(i) => write!(f, "{}", i),
            Wire::Label(label) => write!(f, "{}", label),
        }
    }
}

/// Ordered collection of wires exposed by a device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wires(Vec<Wire>);

impl Wires {
    /// Wires `0..count`
    pub fn range(count: usize) -> Self {
        Wires((0..count).map(Wire::Index).collect())
    }

    /// Wires with custom labels, in the given order
    pub fn labeled<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Wires(labels.into_iter().map(|l| Wire::Label(l.into())).collect())
    }

    /// Number of wires
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Wire> {
        self.0.iter()
    }
}

impl From<Vec<Wire>> for Wires {
    fn from(wires: Vec<Wire>) -> Self {
        Wires(wires)
    }
}

impl<'a> IntoIterator for &'a Wires {
    type Item = &'a Wire;
    type IntoIter = std::slice::Iter<'a, Wire>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Trait for execution backends a learner can submit
///
/// Attributes are optional because a handle supplied by an external backend
/// may not expose them; a missing attribute never matches an expectation.
pub trait DeviceHandle: fmt::Debug {
    /// Backend name, e.g. `default.qubit`
    fn name(&self) -> Option<&str>;

    /// Wires the backend exposes
    fn wires(&self) -> Option<&Wires>;
}

/// A concrete device description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    name: String,
    wires: Wires,
}

impl Device {
    /// Create a device with `num_wires` integer-indexed wires
    pub fn new(name: impl Into<String>, num_wires: usize) -> Self {
        Device {
            name: name.into(),
            wires: Wires::range(num_wires),
        }
    }

    /// Create a device with an explicit wire collection
    pub fn with_wires(name: impl Into<String>, wires: Wires) -> Self {
        Device {
            name: name.into(),
            wires,
        }
    }
}

impl DeviceHandle for Device {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn wires(&self) -> Option<&Wires> {
        Some(&self.wires)
    }
}

/// The device an exercise expects learners to use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSpec {
    /// Expected backend name
    pub name: String,
    /// Expected number of wires
    pub num_wires: usize,
}

impl DeviceSpec {
    pub fn new(name: impl Into<String>, num_wires: usize) -> Self {
        DeviceSpec {
            name: name.into(),
            num_wires,
        }
    }
}

impl fmt::Display for DeviceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} wires)", self.name, self.num_wires)
    }
}
