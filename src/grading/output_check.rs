//! Output matching

use tracing::warn;

use crate::error::{GradeError, Result};
use crate::output::{Output, Tolerance};

/// Compare an output with the expected one.
///
/// Fails with [`GradeError::OutputMismatch`] when some element is outside
/// `tolerance`, or with [`GradeError::ShapeMismatch`] when the two cannot be
/// compared element-wise at all.
pub fn verify_output(actual: &Output, expected: &Output, tolerance: &Tolerance) -> Result<()> {
    if actual.all_close(expected, tolerance)? {
        Ok(())
    } else {
        Err(GradeError::OutputMismatch)
    }
}

/// Boolean form of [`verify_output`].
///
/// Comparison errors are reported on stdout and count as a mismatch.
pub fn check_output(actual: &Output, expected: &Output, tolerance: &Tolerance) -> bool {
    match verify_output(actual, expected, tolerance) {
        Ok(()) => true,
        Err(GradeError::OutputMismatch) => false,
        Err(e) => {
            warn!(error = %e, "output comparison failed");
            println!("Error during execution: {}", e);
            false
        }
    }
}
