//! Core compute primitives.
//!
//! [`Matrix`] is the harness's logical layout: a flat row-major buffer with
//! explicit dimensions. The packed wire format lives in [`crate::layout`].

mod matrix;

pub use matrix::Matrix;
