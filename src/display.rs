//! LaTeX rendering of state vectors
//!
//! Produces a display-math string such as
//! `$$\left|\psi\right\rangle = 0.707107 \left|0\right\rangle + 0.707107 \left|3\right\rangle$$`
//! suitable for a Markdown cell. Only the formatting lives here; showing the
//! result is up to the caller.

use std::fmt;

use num_complex::Complex64;

/// Wrapper that renders amplitudes as a ket expansion
#[derive(Debug, Clone, Copy)]
pub struct StateVectorLatex<'a>(pub &'a [Complex64]);

impl fmt::Display for StateVectorLatex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r"$$\left|\psi\right\rangle =")?;
        for (i, amplitude) in self.0.iter().enumerate() {
            let sep = if i == 0 { " " } else { " + " };
            write!(f, r"{}{} \left|{}\right\rangle", sep, format_amplitude(*amplitude), i)?;
        }
        write!(f, "$$")
    }
}

/// Render a state vector as a LaTeX ket expansion
pub fn format_state_vector(amplitudes: &[Complex64]) -> String {
    StateVectorLatex(amplitudes).to_string()
}

/// Render one amplitude.
///
/// Zero parts are omitted; the imaginary part always carries its sign.
pub fn format_amplitude(amplitude: Complex64) -> String {
    let real = if amplitude.re != 0.0 {
        format!("{:.6}", amplitude.re)
    } else {
        String::new()
    };
    let imag = if amplitude.im != 0.0 {
        format!("{:+.6}i", amplitude.im)
    } else {
        String::new()
    };

    if real.is_empty() && imag.is_empty() {
        "0".to_string()
    } else {
        real + &imag
    }
}
