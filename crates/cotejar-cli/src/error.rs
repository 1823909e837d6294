//! Error types for cotejar-cli.
//!
//! Every failure class carries its own exit code so automated runners can
//! tell a usage or configuration problem (1), a matrix-multiply-reference
//! mismatch (1), and a convolution-reference mismatch (2) apart.

use cotejar::prelude::{ConfigError, LayoutError, VerifyError};
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Wrong number of positional arguments, or unparsable ones
    #[error("Usage: cotejar <BATCH> <ROWS> <COLS> <CHANNELS_IN> <CHANNELS_OUT>")]
    Usage,

    /// Shape failed a divisibility rule
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Codec precondition breach
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Kernel output out of tolerance against a reference
    #[error("Mismatch detected: {0}")]
    Verify(#[from] VerifyError),

    /// Internal shape bookkeeping error
    #[error("Shape error: {0}")]
    Shape(&'static str),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> u8 {
        match self {
            Self::Usage | Self::Config(_) | Self::Layout(_) | Self::Shape(_) => 1,
            Self::Verify(VerifyError::ConvMismatch { .. }) => 2,
            Self::Verify(_) => 1,
        }
    }
}
