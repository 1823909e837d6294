//! Cotejar: numerical verification harness for layout-specialized compute kernels.
//!
//! Cotejar validates the output of an externally-supplied, layout-specialized
//! matrix-multiplication / 1x1-convolution kernel against independently coded
//! CPU references. The harness owns deterministic test-data generation, the
//! codec between the flat row-major logical layout and the kernel's tiled
//! memory-width layout, the opaque kernel call boundary, and tolerance-based
//! comparison with position-addressable failure reporting.
//!
//! # Quick Start
//!
//! ```
//! use cotejar::prelude::*;
//!
//! let config = HarnessConfig::default();
//! let kernel = SimulatedKernel::new(config.tiling);
//! run_verification::<f32, _>(&config, &kernel, Tolerance::default()).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: The flat row-major [`primitives::Matrix`] logical layout
//! - [`element`]: Supported numeric domains and their comparable representation
//! - [`config`]: Problem shapes, tiling constraints, and their validation
//! - [`generate`]: Seeded, reproducible input generation
//! - [`layout`]: Pack/unpack codec between logical and memory-width layout
//! - [`reference`]: Dense matmul and 1x1 convolution ground-truth engines
//! - [`kernel`]: The opaque kernel call boundary and a simulated kernel
//! - [`verify`]: Relative-error comparison against both references
//! - [`harness`]: End-to-end orchestration of one verification pass

pub mod config;
pub mod element;
pub mod generate;
pub mod harness;
pub mod kernel;
pub mod layout;
pub mod primitives;
pub mod reference;
pub mod verify;

/// Common imports for harness consumers.
pub mod prelude {
    pub use crate::config::{ConfigError, ConvShape, GemmShape, HarnessConfig, TilingSpec};
    pub use crate::element::{Domain, Element};
    pub use crate::generate::{InputGenerator, DEFAULT_SEED};
    pub use crate::harness::{run_verification, HarnessError};
    pub use crate::kernel::{FnKernel, MatmulKernel, SimulatedKernel};
    pub use crate::layout::{LayoutError, PackedBuffer};
    pub use crate::primitives::Matrix;
    pub use crate::reference::{conv1x1_reference, gemm_reference};
    pub use crate::verify::{verify, Tolerance, VerifyError};
}
