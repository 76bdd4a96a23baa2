//! Learner submissions
//!
//! An [`Answer`] pairs the device a learner created with the output of their
//! circuit. The circuit is invoked exactly once, when the answer is built, with
//! an argument combination fixed by an [`Invocation`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::device::DeviceHandle;
use crate::error::{ExecutionError, Result};
use crate::output::Output;

/// Trainable parameters passed to a parametrized circuit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircuitParams(Vec<f64>);

impl CircuitParams {
    pub fn new(values: Vec<f64>) -> Self {
        CircuitParams(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for CircuitParams {
    fn from(values: Vec<f64>) -> Self {
        CircuitParams(values)
    }
}

impl<const N: usize> From<[f64; N]> for CircuitParams {
    fn from(values: [f64; N]) -> Self {
        CircuitParams(values.to_vec())
    }
}

/// How a circuit is called
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Invocation {
    /// Called without arguments
    NoArgs,
    /// Called with a shot count only
    Shots(u32),
    /// Called with circuit parameters only
    Params(CircuitParams),
    /// Called with both circuit parameters and a shot count
    ShotsAndParams {
        params: CircuitParams,
        shots: u32,
    },
}

impl Invocation {
    /// Resolve the invocation from optional shots and parameters
    pub fn resolve(shots: Option<u32>, params: Option<CircuitParams>) -> Self {
        match (shots, params) {
            (None, None) => Invocation::NoArgs,
            (Some(shots), None) => Invocation::Shots(shots),
            (None, Some(params)) => Invocation::Params(params),
            (Some(shots), Some(params)) => Invocation::ShotsAndParams { params, shots },
        }
    }

    pub fn shots(&self) -> Option<u32> {
        match self {
            Invocation::Shots(shots) | Invocation::ShotsAndParams { shots, .. } => Some(*shots),
            _ => None,
        }
    }

    pub fn params(&self) -> Option<&CircuitParams> {
        match self {
            Invocation::Params(params) | Invocation::ShotsAndParams { params, .. } => Some(params),
            _ => None,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::NoArgs => write!(f, "no arguments"),
            Invocation::Shots(shots) => write!(f, "shots={}", shots),
            Invocation::Params(params) => write!(f, "{} circuit parameters", params.len()),
            Invocation::ShotsAndParams { params, shots } => {
                write!(f, "{} circuit parameters and shots={}", params.len(), shots)
            }
        }
    }
}

/// A learner's circuit, callable with a resolved invocation
pub trait QNode {
    fn call(&self, invocation: &Invocation) -> std::result::Result<Output, ExecutionError>;
}

impl<F> QNode for F
where
    F: Fn(&Invocation) -> std::result::Result<Output, ExecutionError>,
{
    fn call(&self, invocation: &Invocation) -> std::result::Result<Output, ExecutionError> {
        self(invocation)
    }
}

/// Adapt a circuit that takes no parameters.
///
/// The shot count, if any, is forwarded; passing circuit parameters is a
/// signature error.
pub fn circuit<F>(f: F) -> impl QNode
where
    F: Fn(Option<u32>) -> std::result::Result<Output, ExecutionError>,
{
    move |invocation: &Invocation| match invocation {
        Invocation::NoArgs => f(None),
        Invocation::Shots(shots) => f(Some(*shots)),
        other => Err(ExecutionError::Signature(other.to_string())),
    }
}

/// Adapt a circuit that requires parameters.
///
/// Calling it without parameters is a signature error.
pub fn parametrized<F>(f: F) -> impl QNode
where
    F: Fn(&CircuitParams, Option<u32>) -> std::result::Result<Output, ExecutionError>,
{
    move |invocation: &Invocation| match invocation {
        Invocation::Params(params) => f(params, None),
        Invocation::ShotsAndParams { params, shots } => f(params, Some(*shots)),
        other => Err(ExecutionError::Signature(other.to_string())),
    }
}

/// A learner's submission for one exercise
#[derive(Debug)]
pub struct Answer {
    device: Box<dyn DeviceHandle>,
    invocation: Invocation,
    output: Output,
}

impl Answer {
    /// Build an answer, invoking `qnode` once.
    ///
    /// The argument combination is selected by which of `shots` and `params`
    /// are present.
    pub fn new<D, Q>(device: D, qnode: Q, shots: Option<u32>, params: Option<CircuitParams>) -> Result<Self>
    where
        D: DeviceHandle + 'static,
        Q: QNode,
    {
        Self::with_invocation(device, qnode, Invocation::resolve(shots, params))
    }

    /// Build an answer from an already resolved invocation
    pub fn with_invocation<D, Q>(device: D, qnode: Q, invocation: Invocation) -> Result<Self>
    where
        D: DeviceHandle + 'static,
        Q: QNode,
    {
        debug!(%invocation, "executing learner circuit");
        let output = qnode.call(&invocation)?;
        debug!(shape = ?output.shape(), "circuit produced output");

        Ok(Answer {
            device: Box::new(device),
            invocation,
            output,
        })
    }

    pub fn device(&self) -> &dyn DeviceHandle {
        self.device.as_ref()
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    pub fn shots(&self) -> Option<u32> {
        self.invocation.shots()
    }

    pub fn params(&self) -> Option<&CircuitParams> {
        self.invocation.params()
    }

    /// The output computed when the answer was built
    pub fn output(&self) -> &Output {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;
    use std::cell::Cell;

    #[test]
    fn test_invocation_resolve() {
        assert_eq!(Invocation::resolve(None, None), Invocation::NoArgs);
        assert_eq!(Invocation::resolve(Some(100), None), Invocation::Shots(100));
        assert_eq!(
            Invocation::resolve(None, Some(vec![0.5].into())),
            Invocation::Params(vec![0.5].into())
        );
        let both = Invocation::resolve(Some(10), Some(vec![0.1, 0.2].into()));
        assert_eq!(both.shots(), Some(10));
        assert_eq!(both.params().map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_qnode_called_once() {
        let calls = Cell::new(0);
        let qnode = |_: &Invocation| {
            calls.set(calls.get() + 1);
            Ok::<_, ExecutionError>(Output::scalar(1.0))
        };

        let answer = Answer::new(Device::new("default.qubit", 1), &qnode, None, None).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(answer.output(), &Output::scalar(1.0));
    }

    #[test]
    fn test_shots_and_params_store_output() {
        let qnode = parametrized(|params, shots| {
            let shots = shots.unwrap_or(1) as f64;
            Ok(Output::from(params.as_slice().iter().map(|p| p * shots).collect::<Vec<f64>>()))
        });

        let answer = Answer::new(Device::new("default.qubit", 1), qnode, Some(2), Some([0.25, 0.5].into())).unwrap();
        assert_eq!(answer.shots(), Some(2));
        assert_eq!(answer.output(), &Output::from(vec![0.5, 1.0]));
    }

    #[test]
    fn test_signature_errors() {
        let no_params = circuit(|_| Ok(Output::scalar(0.0)));
        let err = Answer::new(Device::new("default.qubit", 1), no_params, None, Some([1.0].into()));
        assert!(err.is_err());

        let needs_params = parametrized(|_, _| Ok(Output::scalar(0.0)));
        let err = Answer::new(Device::new("default.qubit", 1), needs_params, Some(5), None);
        assert!(err.is_err());
    }
}
