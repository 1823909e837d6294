//! Ground-truth reference engines.
//!
//! Two independently coded computations over the same logical inputs: a
//! dense matrix multiply and a 1x1 convolution in batch/spatial/channel
//! form. Both are correctness references only, triple-nested with no
//! blocking; the kernel under test is compared against each separately so a
//! mismatch report identifies which view disagrees.

use crate::config::ConvShape;
use crate::element::Element;
use crate::primitives::Matrix;

/// Dense matrix multiply: out[i][j] = sum over k of a[i][k] * b[k][j].
///
/// Accumulates in the element's widened accumulator domain.
///
/// # Errors
///
/// Returns an error if the inner dimensions don't match.
pub fn gemm_reference<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
) -> Result<Matrix<T>, &'static str> {
    let (n, k) = a.shape();
    let (b_rows, m) = b.shape();
    if k != b_rows {
        return Err("Inner dimensions must match for matrix multiplication");
    }

    let mut out = Matrix::zeros(n, m);
    for i in 0..n {
        for j in 0..m {
            let mut acc = T::Acc::default();
            for kk in 0..k {
                acc = acc + a.get(i, kk).mul_wide(b.get(kk, j));
            }
            out.set(i, j, T::from_acc(acc));
        }
    }
    Ok(out)
}

/// 1x1 convolution (stride 1, no padding) over the same flat buffers,
/// indexed through batch/spatial/channel addressing.
///
/// `a` holds the activations, one input-channel vector per pixel in
/// batch-major order; `b` holds the channels_in x channels_out weights.
/// With N = batch * rows * cols this computes the same product as
/// [`gemm_reference`], through a different addressing scheme.
///
/// # Errors
///
/// Returns an error if the buffers don't match the convolution shape.
pub fn conv1x1_reference<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    shape: &ConvShape,
) -> Result<Matrix<T>, &'static str> {
    let ConvShape {
        batch,
        rows,
        cols,
        channels_in,
        channels_out,
    } = *shape;

    if a.shape() != (batch * rows * cols, channels_in) {
        return Err("Activation buffer does not match the convolution shape");
    }
    if b.shape() != (channels_in, channels_out) {
        return Err("Weight buffer does not match the convolution shape");
    }

    let activations = a.as_slice();
    let weights = b.as_slice();
    let mut out = vec![T::zero(); batch * rows * cols * channels_out];

    for image in 0..batch {
        for row in 0..rows {
            for col in 0..cols {
                let pixel = (image * rows + row) * cols + col;
                let in_base = pixel * channels_in;
                let out_base = pixel * channels_out;
                for co in 0..channels_out {
                    let mut acc = T::Acc::default();
                    for ci in 0..channels_in {
                        acc = acc + activations[in_base + ci].mul_wide(weights[ci * channels_out + co]);
                    }
                    out[out_base + co] = T::from_acc(acc);
                }
            }
        }
    }

    Matrix::from_vec(batch * rows * cols, channels_out, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::InputGenerator;

    #[test]
    fn test_gemm_known_values() {
        // 2x3 * 3x2 = 2x2
        let a = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("2*3=6");
        let b = Matrix::from_vec(3, 2, vec![7.0_f32, 8.0, 9.0, 10.0, 11.0, 12.0]).expect("3*2=6");
        let c = gemm_reference(&a, &b).expect("inner dimensions match");

        assert_eq!(c.shape(), (2, 2));
        // c[0,0] = 1*7 + 2*9 + 3*11 = 58
        assert!((c.get(0, 0) - 58.0).abs() < 1e-6);
        assert!((c.get(0, 1) - 64.0).abs() < 1e-6);
        assert!((c.get(1, 0) - 139.0).abs() < 1e-6);
        assert!((c.get(1, 1) - 154.0).abs() < 1e-6);
    }

    #[test]
    fn test_gemm_dimension_mismatch() {
        let a = Matrix::<f32>::zeros(2, 3);
        let b = Matrix::<f32>::zeros(2, 2);
        assert!(gemm_reference(&a, &b).is_err());
    }

    #[test]
    fn test_gemm_all_ones_yields_k() {
        let a = Matrix::<i32>::ones(4, 4);
        let b = Matrix::<i32>::ones(4, 4);
        let c = gemm_reference(&a, &b).expect("inner dimensions match");
        assert!(c.as_slice().iter().all(|&x| x == 4));
    }

    #[test]
    fn test_conv_agrees_with_gemm_integral() {
        let shape = ConvShape {
            batch: 2,
            rows: 3,
            cols: 2,
            channels_in: 5,
            channels_out: 4,
        };
        let gemm = shape.gemm();
        let mut generator = InputGenerator::with_seed(11);
        let a: Matrix<i32> = generator.matrix(gemm.n, gemm.k);
        let b: Matrix<i32> = generator.matrix(gemm.k, gemm.m);

        let dense = gemm_reference(&a, &b).expect("inner dimensions match");
        let conv = conv1x1_reference(&a, &b, &shape).expect("buffers match shape");
        // Integral accumulation is exact, so the two engines agree exactly.
        assert_eq!(dense, conv);
    }

    #[test]
    fn test_conv_agrees_with_gemm_real() {
        let shape = ConvShape {
            batch: 1,
            rows: 4,
            cols: 4,
            channels_in: 8,
            channels_out: 8,
        };
        let gemm = shape.gemm();
        let mut generator = InputGenerator::with_seed(11);
        let a: Matrix<f32> = generator.matrix(gemm.n, gemm.k);
        let b: Matrix<f32> = generator.matrix(gemm.k, gemm.m);

        let dense = gemm_reference(&a, &b).expect("inner dimensions match");
        let conv = conv1x1_reference(&a, &b, &shape).expect("buffers match shape");
        for i in 0..gemm.n {
            for j in 0..gemm.m {
                let d = dense.get(i, j);
                let c = conv.get(i, j);
                assert!(
                    (d - c).abs() <= 1e-5 * d.abs(),
                    "engines diverge at ({i}, {j}): {d} vs. {c}"
                );
            }
        }
    }

    #[test]
    fn test_conv_shape_mismatch() {
        let shape = ConvShape {
            batch: 2,
            rows: 2,
            cols: 2,
            channels_in: 4,
            channels_out: 4,
        };
        let a = Matrix::<f32>::zeros(7, 4); // N should be 8
        let b = Matrix::<f32>::zeros(4, 4);
        assert!(conv1x1_reference(&a, &b, &shape).is_err());
    }

    #[test]
    fn test_conv_all_ones_yields_channels_in() {
        let shape = ConvShape {
            batch: 4,
            rows: 1,
            cols: 1,
            channels_in: 4,
            channels_out: 4,
        };
        let a = Matrix::<u16>::ones(4, 4);
        let b = Matrix::<u16>::ones(4, 4);
        let c = conv1x1_reference(&a, &b, &shape).expect("buffers match shape");
        assert!(c.as_slice().iter().all(|&x| x == 4));
    }
}
