//! cotejar - kernel verification harness CLI
//!
//! Runs one verification pass of the layout-specialized matmul/conv kernel
//! against both CPU references.
//!
//! Usage:
//!   cotejar                       # built-in default shape
//!   cotejar 2 4 4 16 32           # batch rows cols channels-in channels-out
//!
//! Exit codes: 0 = both references verified; 1 = usage, configuration, or
//! matrix-multiply-reference mismatch; 2 = convolution-reference mismatch.

use clap::Parser;
use std::process::ExitCode;

mod error;
mod output;

use cotejar::prelude::*;
use error::{CliError, Result};

/// cotejar - verify a layout-specialized matmul/conv kernel
///
/// Give no dimensions for the built-in default shape, or exactly five:
/// batch, rows, cols, input channels, output channels.
#[derive(Parser)]
#[command(name = "cotejar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Batch extent
    #[arg(value_name = "BATCH")]
    batch: Option<usize>,

    /// Spatial rows
    #[arg(value_name = "ROWS")]
    rows: Option<usize>,

    /// Spatial columns
    #[arg(value_name = "COLS")]
    cols: Option<usize>,

    /// Input channels (GEMM K)
    #[arg(value_name = "CHANNELS_IN")]
    channels_in: Option<usize>,

    /// Output channels (GEMM M)
    #[arg(value_name = "CHANNELS_OUT")]
    channels_out: Option<usize>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            eprintln!("{}", CliError::Usage);
            return ExitCode::from(1);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Resolve the configuration once, from defaults or from all five arguments.
fn resolve_config(cli: &Cli) -> Result<HarnessConfig> {
    match (
        cli.batch,
        cli.rows,
        cli.cols,
        cli.channels_in,
        cli.channels_out,
    ) {
        (None, None, None, None, None) => Ok(HarnessConfig::default()),
        (Some(batch), Some(rows), Some(cols), Some(channels_in), Some(channels_out)) => {
            Ok(HarnessConfig::with_shape(ConvShape {
                batch,
                rows,
                cols,
                channels_in,
                channels_out,
            }))
        }
        _ => Err(CliError::Usage),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    config.validate()?;
    let gemm = config.gemm();
    let conv = config.conv;

    output::section("Problem");
    output::kv(
        "GEMM (N, K, M)",
        format!("({}, {}, {})", gemm.n, gemm.k, gemm.m),
    );
    output::kv(
        "Conv (B, H, W, Cin, Cout)",
        format!(
            "({}, {}, {}, {}, {})",
            conv.batch, conv.rows, conv.cols, conv.channels_in, conv.channels_out
        ),
    );

    let mut generator = InputGenerator::with_seed(config.seed);
    let a: Matrix<f32> = generator.matrix(gemm.n, gemm.k);
    let b: Matrix<f32> = generator.matrix(gemm.k, gemm.m);

    let lhs = PackedBuffer::pack(config.tiling.width_k, a.as_slice())?;
    let rhs = PackedBuffer::pack(config.tiling.width_m, b.as_slice())?;
    let mut out = PackedBuffer::zeroed(config.tiling.width_m, gemm.n * gemm.m)?;

    println!("Running simulation...");
    let kernel = SimulatedKernel::new(config.tiling);
    kernel.invoke(&lhs, &rhs, &mut out, gemm);

    println!("Verifying results...");
    let test = Matrix::from_vec(gemm.n, gemm.m, out.unpack()).map_err(CliError::Shape)?;
    let gemm_ref = gemm_reference(&a, &b).map_err(CliError::Shape)?;
    let conv_ref = conv1x1_reference(&a, &b, &conv).map_err(CliError::Shape)?;
    verify(&test, &gemm_ref, &conv_ref, Tolerance::default())?;

    output::pass("Matrix-matrix multiplication successfully verified.");
    output::pass("Conv2D 1x1 successfully verified.");
    Ok(())
}
