//! Tolerance-based comparison against both references.
//!
//! Every coordinate is checked against the matrix-multiply reference first,
//! then the convolution reference, in the comparable (signed f64)
//! representation. The traversal is fail-fast: the first violation aborts
//! with a report naming the failing reference, the coordinate, and the
//! observed and expected values.

use crate::element::Element;
use crate::primitives::Matrix;
use thiserror::Error;

/// Relative-error threshold used for the pass/fail decision.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// A numerical mismatch or an unusable comparison input.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum VerifyError {
    #[error("mismatch against the matrix-multiply reference at ({row}, {col}): {got} vs. {expected}")]
    MatmulMismatch {
        row: usize,
        col: usize,
        got: f64,
        expected: f64,
    },

    #[error("mismatch against the convolution reference at ({row}, {col}): {got} vs. {expected}")]
    ConvMismatch {
        row: usize,
        col: usize,
        got: f64,
        expected: f64,
    },

    #[error("result shapes differ: {0}")]
    ShapeMismatch(&'static str),
}

/// Pass/fail criterion for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    relative: f64,
}

impl Tolerance {
    /// A tolerance on |test - reference| / |reference|. An error exactly at
    /// the threshold passes; only strictly greater fails.
    #[must_use]
    pub fn relative(threshold: f64) -> Self {
        Self {
            relative: threshold,
        }
    }

    /// The configured threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.relative
    }

    /// Whether `got` is out of tolerance against `expected`.
    ///
    /// A reference of exactly zero makes the relative ratio undefined; the
    /// comparison then falls back to an absolute check against the same
    /// threshold, so a non-trivially-wrong value against a zero reference
    /// still fails rather than dividing by zero.
    #[must_use]
    pub fn exceeded(&self, got: f64, expected: f64) -> bool {
        let diff = (got - expected).abs();
        if expected == 0.0 {
            diff > self.relative
        } else {
            diff / expected.abs() > self.relative
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::relative(DEFAULT_TOLERANCE)
    }
}

/// Compares the kernel's unpacked output against both reference results.
///
/// # Errors
///
/// Returns the first out-of-tolerance coordinate, tagged with the reference
/// it violated, or a shape mismatch if the three matrices disagree on
/// dimensions.
pub fn verify<T: Element>(
    test: &Matrix<T>,
    gemm_ref: &Matrix<T>,
    conv_ref: &Matrix<T>,
    tolerance: Tolerance,
) -> Result<(), VerifyError> {
    if test.shape() != gemm_ref.shape() {
        return Err(VerifyError::ShapeMismatch(
            "kernel output and matrix-multiply reference",
        ));
    }
    if test.shape() != conv_ref.shape() {
        return Err(VerifyError::ShapeMismatch(
            "kernel output and convolution reference",
        ));
    }

    let (n, m) = test.shape();
    for row in 0..n {
        for col in 0..m {
            let got = test.get(row, col).comparable();

            let expected = gemm_ref.get(row, col).comparable();
            if tolerance.exceeded(got, expected) {
                return Err(VerifyError::MatmulMismatch {
                    row,
                    col,
                    got,
                    expected,
                });
            }

            let expected = conv_ref.get(row, col).comparable();
            if tolerance.exceeded(got, expected) {
                return Err(VerifyError::ConvMismatch {
                    row,
                    col,
                    got,
                    expected,
                });
            }
        }
    }
    Ok(())
}
