//! Problem shapes, tiling constraints, and their validation.
//!
//! All sizing is resolved once at startup into a [`HarnessConfig`] that is
//! passed explicitly to every downstream component; there are no global
//! dimension constants. A shape is expressed in two equivalent views: the
//! convolution view ([`ConvShape`], the five integers accepted on the
//! command line) and the matrix-multiply view ([`GemmShape`]) derived from
//! it. Both views describe the same element counts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected before any computation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("K must be divisible by the memory width in K (K = {k}, width = {width})")]
    KNotDivisibleByWidth { k: usize, width: usize },

    #[error("M must be divisible by the memory width in M (M = {m}, width = {width})")]
    MNotDivisibleByWidth { m: usize, width: usize },

    #[error("N must be divisible by the outer tile size in N (N = {n}, tile = {tile})")]
    NNotDivisibleByTile { n: usize, tile: usize },

    #[error("M must be divisible by the outer tile size in M (M = {m}, tile = {tile})")]
    MNotDivisibleByTile { m: usize, tile: usize },
}

/// Convolution view of the problem: a 1x1 convolution over `batch` images of
/// `rows` x `cols` pixels, mapping `channels_in` to `channels_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvShape {
    pub batch: usize,
    pub rows: usize,
    pub cols: usize,
    pub channels_in: usize,
    pub channels_out: usize,
}

impl ConvShape {
    /// The equivalent matrix-multiply view: every pixel becomes one row of
    /// the flattened activation matrix.
    #[must_use]
    pub fn gemm(&self) -> GemmShape {
        GemmShape {
            n: self.batch * self.rows * self.cols,
            k: self.channels_in,
            m: self.channels_out,
        }
    }
}

/// Matrix-multiply view of the problem: C (N x M) = A (N x K) * B (K x M).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemmShape {
    pub n: usize,
    pub k: usize,
    pub m: usize,
}

/// The kernel's memory widths and outer tiling granularity.
///
/// A (N x K) is packed with `width_k`; B (K x M) and the output C (N x M)
/// are packed with `width_m`, matching the kernel's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilingSpec {
    pub width_k: usize,
    pub width_m: usize,
    pub outer_tile_n: usize,
    pub outer_tile_m: usize,
}

impl Default for TilingSpec {
    fn default() -> Self {
        Self {
            width_k: 8,
            width_m: 8,
            outer_tile_n: 32,
            outer_tile_m: 32,
        }
    }
}

/// Fully resolved configuration for one verification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub conv: ConvShape,
    pub tiling: TilingSpec,
    pub seed: u64,
}

impl Default for HarnessConfig {
    /// The compiled-in shape used when no dimensions are given on the
    /// command line: N = 32, K = 16, M = 32.
    fn default() -> Self {
        Self::with_shape(ConvShape {
            batch: 2,
            rows: 4,
            cols: 4,
            channels_in: 16,
            channels_out: 32,
        })
    }
}

impl HarnessConfig {
    /// A configuration for `conv` with the default tiling and seed.
    #[must_use]
    pub fn with_shape(conv: ConvShape) -> Self {
        Self {
            conv,
            tiling: TilingSpec::default(),
            seed: crate::generate::DEFAULT_SEED,
        }
    }

    /// The matrix-multiply view of the configured shape.
    #[must_use]
    pub fn gemm(&self) -> GemmShape {
        self.conv.gemm()
    }

    /// Checks the shape against the kernel's memory-width and tiling
    /// granularity. Runs before any buffer is allocated.
    ///
    /// # Errors
    ///
    /// Returns the first violated divisibility rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GemmShape { n, k, m } = self.gemm();
        let tiling = self.tiling;
        // A zero width or tile divides nothing, including these shapes.
        if tiling.width_k == 0 || k % tiling.width_k != 0 {
            return Err(ConfigError::KNotDivisibleByWidth {
                k,
                width: tiling.width_k,
            });
        }
        if tiling.width_m == 0 || m % tiling.width_m != 0 {
            return Err(ConfigError::MNotDivisibleByWidth {
                m,
                width: tiling.width_m,
            });
        }
        if tiling.outer_tile_n == 0 || n % tiling.outer_tile_n != 0 {
            return Err(ConfigError::NNotDivisibleByTile {
                n,
                tile: tiling.outer_tile_n,
            });
        }
        if tiling.outer_tile_m == 0 || m % tiling.outer_tile_m != 0 {
            return Err(ConfigError::MNotDivisibleByTile {
                m,
                tile: tiling.outer_tile_m,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(conv: ConvShape, tiling: TilingSpec) -> HarnessConfig {
        HarnessConfig {
            conv,
            tiling,
            seed: 0,
        }
    }

    #[test]
    fn test_default_config_validates() {
        let config = HarnessConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(
            config.gemm(),
            GemmShape {
                n: 32,
                k: 16,
                m: 32
            }
        );
    }

    #[test]
    fn test_views_describe_same_element_counts() {
        let conv = ConvShape {
            batch: 3,
            rows: 5,
            cols: 7,
            channels_in: 16,
            channels_out: 8,
        };
        let gemm = conv.gemm();
        // A: one row per pixel, one column per input channel.
        assert_eq!(gemm.n * gemm.k, 3 * 5 * 7 * 16);
        // B: weights, C: one row per pixel, one column per output channel.
        assert_eq!(gemm.k * gemm.m, 16 * 8);
        assert_eq!(gemm.n * gemm.m, 3 * 5 * 7 * 8);
    }

    #[test]
    fn test_rejects_k_not_divisible_by_width() {
        let c = config(
            ConvShape {
                batch: 1,
                rows: 8,
                cols: 4,
                channels_in: 3,
                channels_out: 32,
            },
            TilingSpec::default(),
        );
        assert_eq!(
            c.validate(),
            Err(ConfigError::KNotDivisibleByWidth { k: 3, width: 8 })
        );
    }

    #[test]
    fn test_rejects_m_not_divisible_by_width() {
        let c = config(
            ConvShape {
                batch: 1,
                rows: 8,
                cols: 4,
                channels_in: 8,
                channels_out: 12,
            },
            TilingSpec::default(),
        );
        assert_eq!(
            c.validate(),
            Err(ConfigError::MNotDivisibleByWidth { m: 12, width: 8 })
        );
    }

    #[test]
    fn test_rejects_n_not_divisible_by_outer_tile() {
        let c = config(
            ConvShape {
                batch: 1,
                rows: 3,
                cols: 1,
                channels_in: 8,
                channels_out: 32,
            },
            TilingSpec::default(),
        );
        assert_eq!(
            c.validate(),
            Err(ConfigError::NNotDivisibleByTile { n: 3, tile: 32 })
        );
    }

    #[test]
    fn test_rejects_m_not_divisible_by_outer_tile() {
        let c = config(
            ConvShape {
                batch: 1,
                rows: 8,
                cols: 4,
                channels_in: 8,
                channels_out: 8,
            },
            TilingSpec::default(),
        );
        assert_eq!(
            c.validate(),
            Err(ConfigError::MNotDivisibleByTile { m: 8, tile: 32 })
        );
    }

    #[test]
    fn test_custom_tiling_accepts_small_shapes() {
        let tiling = TilingSpec {
            width_k: 4,
            width_m: 4,
            outer_tile_n: 4,
            outer_tile_m: 4,
        };
        let c = config(
            ConvShape {
                batch: 4,
                rows: 1,
                cols: 1,
                channels_in: 4,
                channels_out: 4,
            },
            tiling,
        );
        assert_eq!(c.validate(), Ok(()));
    }
}
