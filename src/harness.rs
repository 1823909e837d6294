//! End-to-end orchestration of one verification pass.
//!
//! Configuration -> data generation -> pack -> kernel -> unpack -> reference
//! engines -> verifier, strictly in sequence within the calling thread. All
//! buffers are owned by the pass and dropped when it returns; nothing is
//! retried.

use crate::config::{ConfigError, HarnessConfig};
use crate::element::Element;
use crate::generate::InputGenerator;
use crate::kernel::MatmulKernel;
use crate::layout::{LayoutError, PackedBuffer};
use crate::primitives::Matrix;
use crate::reference::{conv1x1_reference, gemm_reference};
use crate::verify::{verify, Tolerance, VerifyError};
use thiserror::Error;

/// Any failure of a verification pass.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error("shape error: {0}")]
    Shape(&'static str),
}

/// Runs one complete verification pass of `kernel` under `config`.
///
/// # Errors
///
/// Fails on the first violated divisibility rule, codec precondition, or
/// out-of-tolerance coordinate; see [`HarnessError`].
pub fn run_verification<T: Element, K: MatmulKernel<T>>(
    config: &HarnessConfig,
    kernel: &K,
    tolerance: Tolerance,
) -> Result<(), HarnessError> {
    config.validate()?;
    let gemm = config.gemm();

    let mut generator = InputGenerator::with_seed(config.seed);
    let a: Matrix<T> = generator.matrix(gemm.n, gemm.k);
    let b: Matrix<T> = generator.matrix(gemm.k, gemm.m);

    let lhs = PackedBuffer::pack(config.tiling.width_k, a.as_slice())?;
    let rhs = PackedBuffer::pack(config.tiling.width_m, b.as_slice())?;
    let mut out = PackedBuffer::zeroed(config.tiling.width_m, gemm.n * gemm.m)?;

    kernel.invoke(&lhs, &rhs, &mut out, gemm);

    let test = Matrix::from_vec(gemm.n, gemm.m, out.unpack()).map_err(HarnessError::Shape)?;
    let gemm_ref = gemm_reference(&a, &b).map_err(HarnessError::Shape)?;
    let conv_ref = conv1x1_reference(&a, &b, &config.conv).map_err(HarnessError::Shape)?;

    verify(&test, &gemm_ref, &conv_ref, tolerance)?;
    Ok(())
}
