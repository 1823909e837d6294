//! The kernel call boundary.
//!
//! The kernel under test is an external collaborator reached through a fixed
//! functional interface over packed buffers. The adapter performs no
//! validation and no transformation, and consumes no status beyond the
//! output buffer contents; a fault inside the kernel is out of scope for the
//! harness.

use crate::config::{GemmShape, TilingSpec};
use crate::element::Element;
use crate::layout::PackedBuffer;

/// A layout-specialized matrix-multiplication kernel.
///
/// `lhs` is A (N x K) packed with the K memory width; `rhs` is B (K x M) and
/// `out` is C (N x M), both packed with the M memory width. The call blocks
/// for as long as the kernel needs; there is no timeout and no cancellation.
pub trait MatmulKernel<T: Element> {
    fn invoke(
        &self,
        lhs: &PackedBuffer<T>,
        rhs: &PackedBuffer<T>,
        out: &mut PackedBuffer<T>,
        dims: GemmShape,
    );
}

/// Adapts a closure into a kernel, so tests can inject arbitrary (including
/// faulty) kernel behavior.
pub struct FnKernel<F>(pub F);

impl<T, F> MatmulKernel<T> for FnKernel<F>
where
    T: Element,
    F: Fn(&PackedBuffer<T>, &PackedBuffer<T>, &mut PackedBuffer<T>, GemmShape),
{
    fn invoke(
        &self,
        lhs: &PackedBuffer<T>,
        rhs: &PackedBuffer<T>,
        out: &mut PackedBuffer<T>,
        dims: GemmShape,
    ) {
        (self.0)(lhs, rhs, out, dims);
    }
}

/// Software stand-in for the accelerator: computes the product directly in
/// the packed domain, word by word over outer row tiles, the way the
/// hardware streams its memory bus.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedKernel {
    tiling: TilingSpec,
}

impl SimulatedKernel {
    #[must_use]
    pub fn new(tiling: TilingSpec) -> Self {
        Self { tiling }
    }
}

impl<T: Element> MatmulKernel<T> for SimulatedKernel {
    fn invoke(
        &self,
        lhs: &PackedBuffer<T>,
        rhs: &PackedBuffer<T>,
        out: &mut PackedBuffer<T>,
        dims: GemmShape,
    ) {
        let GemmShape { n, k, m } = dims;
        let width_k = lhs.width();
        let width_m = out.width();
        let k_words = k / width_k;
        let m_words = m / width_m;

        for tile_start in (0..n).step_by(self.tiling.outer_tile_n.max(1)) {
            let tile_end = (tile_start + self.tiling.outer_tile_n.max(1)).min(n);
            for i in tile_start..tile_end {
                for jw in 0..m_words {
                    let mut acc = vec![T::Acc::default(); width_m];
                    for kw in 0..k_words {
                        let a_word = lhs.word(i * k_words + kw);
                        for (lane_k, &a_val) in a_word.iter().enumerate() {
                            let kk = kw * width_k + lane_k;
                            let b_word = rhs.word(kk * m_words + jw);
                            for (lane, &b_val) in b_word.iter().enumerate() {
                                acc[lane] = acc[lane] + a_val.mul_wide(b_val);
                            }
                        }
                    }
                    let out_word = out.word_mut(i * m_words + jw);
                    for (lane, &value) in acc.iter().enumerate() {
                        out_word[lane] = T::from_acc(value);
                    }
                }
            }
        }
    }
}
