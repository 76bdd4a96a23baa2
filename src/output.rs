//! Numeric outputs and closeness comparison
//!
//! Circuit results are held as n-dimensional arrays of complex numbers. A
//! scalar result (an expectation value, say) is a zero-dimensional array.
//! Comparison follows the usual `allclose` rules: both operands are broadcast
//! to a common shape and every pair must satisfy
//! `|a - b| <= atol + rtol * |b|`.

use std::fmt;

use ndarray::{ArrayD, ArrayView, Array1, Axis, IxDyn};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{GradeError, Result};

/// Absolute and relative tolerances for numeric closeness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Relative tolerance, scaled by the magnitude of the expected value.
    pub rtol: f64,
    /// Absolute tolerance.
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

impl Tolerance {
    /// Create a tolerance from explicit relative and absolute bounds
    pub fn new(rtol: f64, atol: f64) -> Self {
        Tolerance { rtol, atol }
    }

    /// Check whether `actual` is close to `expected`.
    ///
    /// The test is asymmetric: only the magnitude of `expected` scales the
    /// relative bound. NaN never matches and infinities match only
    /// themselves.
    pub fn is_close(&self, actual: Complex64, expected: Complex64) -> bool {
        if actual.is_finite() && expected.is_finite() {
            (actual - expected).norm() <= self.atol + self.rtol * expected.norm()
        } else {
            actual == expected
        }
    }
}

/// The numeric result of executing a circuit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Output(ArrayD<Complex64>);

impl Output {
    /// Wrap an n-dimensional array
    pub fn new(values: ArrayD<Complex64>) -> Self {
        Output(values)
    }

    /// A zero-dimensional output holding a single value
    pub fn scalar(value: impl Into<Complex64>) -> Self {
        Output(ArrayD::from_elem(IxDyn(&[]), value.into()))
    }

    /// A one-dimensional output from complex amplitudes
    pub fn from_amplitudes(values: Vec<Complex64>) -> Self {
        Output(Array1::from_vec(values).into_dyn())
    }

    /// A one-dimensional output from real values
    pub fn from_reals(values: &[f64]) -> Self {
        Output(Array1::from_iter(values.iter().map(|&x| Complex64::new(x, 0.0))).into_dyn())
    }

    /// Shape of the underlying array (empty for a scalar)
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    /// Whether this output is zero-dimensional
    pub fn is_scalar(&self) -> bool {
        self.0.ndim() == 0
    }

    /// Total number of values
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the output holds no values at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying array
    pub fn values(&self) -> &ArrayD<Complex64> {
        &self.0
    }

    /// Consume the output and return the underlying array
    pub fn into_values(self) -> ArrayD<Complex64> {
        self.0
    }

    /// Stack outputs along a new leading axis.
    ///
    /// Every output must have the same shape. An empty slice yields an
    /// empty one-dimensional output.
    pub fn stack(outputs: &[Output]) -> Result<Output> {
        let Some(first) = outputs.first() else {
            return Ok(Output(ArrayD::zeros(IxDyn(&[0]))));
        };

        if let Some(other) = outputs.iter().find(|o| o.shape() != first.shape()) {
            return Err(GradeError::shape_mismatch(first.shape(), other.shape()));
        }

        let views: Vec<ArrayView<'_, Complex64, IxDyn>> = outputs.iter().map(|o| o.0.view()).collect();
        ndarray::stack(Axis(0), &views)
            .map(Output)
            .map_err(|_| GradeError::shape_mismatch(first.shape(), first.shape()))
    }

    /// Compare against `expected` under `tolerance`, broadcasting shapes.
    ///
    /// Returns `Ok(false)` when some element is too far away and an error
    /// when the shapes cannot be broadcast together.
    pub fn all_close(&self, expected: &Output, tolerance: &Tolerance) -> Result<bool> {
        let shape = broadcast_shape(self.shape(), expected.shape())
            .ok_or_else(|| GradeError::shape_mismatch(self.shape(), expected.shape()))?;

        let actual = self
            .0
            .broadcast(IxDyn(&shape))
            .ok_or_else(|| GradeError::shape_mismatch(self.shape(), &shape))?;
        let wanted = expected
            .0
            .broadcast(IxDyn(&shape))
            .ok_or_else(|| GradeError::shape_mismatch(expected.shape(), &shape))?;

        Ok(actual
            .iter()
            .zip(wanted.iter())
            .all(|(a, b)| tolerance.is_close(*a, *b)))
    }
}

/// Compute the common shape two arrays broadcast to, if any.
///
/// Shapes are aligned on their trailing axes; an axis of length one
/// stretches to match the other operand.
pub fn broadcast_shape(a: &[usize], b: &[usize]) -> Option<Vec<usize>> {
    let ndim = a.len().max(b.len());
    let mut shape = vec![0; ndim];

    for i in 0..ndim {
        let da = if i < ndim - a.len() { 1 } else { a[i - (ndim - a.len())] };
        let db = if i < ndim - b.len() { 1 } else { b[i - (ndim - b.len())] };

        shape[i] = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => return None,
        };
    }

    Some(shape)
}

impl From<f64> for Output {
    fn from(value: f64) -> Self {
        Output::scalar(value)
    }
}

impl From<Complex64> for Output {
    fn from(value: Complex64) -> Self {
        Output::scalar(value)
    }
}

impl From<Vec<Complex64>> for Output {
    fn from(values: Vec<Complex64>) -> Self {
        Output::from_amplitudes(values)
    }
}

impl From<Vec<f64>> for Output {
    fn from(values: Vec<f64>) -> Self {
        Output::from_reals(&values)
    }
}

impl From<Array1<Complex64>> for Output {
    fn from(values: Array1<Complex64>) -> Self {
        Output(values.into_dyn())
    }
}

impl From<Array1<f64>> for Output {
    fn from(values: Array1<f64>) -> Self {
        Output(values.mapv(|x| Complex64::new(x, 0.0)).into_dyn())
    }
}

impl From<ArrayD<Complex64>> for Output {
    fn from(values: ArrayD<Complex64>) -> Self {
        Output(values)
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nested(f, self.0.view())
    }
}

// Nested bracket rendering, one level per axis
fn write_nested(f: &mut fmt::Formatter<'_>, view: ArrayView<'_, Complex64, IxDyn>) -> fmt::Result {
    if view.ndim() == 0 {
        return match view.iter().next() {
            Some(value) => write!(f, "{}", value),
            None => Ok(()),
        };
    }

    write!(f, "[")?;
    for (i, sub) in view.outer_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_nested(f, sub)?;
    }
    write!(f, "]")
}
