//! Binary entry point for the `bpack` command-line tool.
//!
//! Handles post-parse validation (automatic output-filename resolution,
//! overwrite refusal) and operation dispatch (compress, decompress, test,
//! list).
//!
//! # Control flow
//!
//! 1. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 2. [`run`] dispatches to the appropriate I/O operation and returns an
//!    exit code (0 = success, non-zero = error).

use std::path::{Path, PathBuf};

use bpack::cli::constants::{BPK_EXTENSION, COMPRESSOR_NAME};
use bpack::cli::{parse_args, OpMode, ParsedArgs};
use bpack::displaylevel;
use bpack::io::{compress_file, decompress_file, display_file_info};

/// Resolve the output filename when the command line did not give one.
///
/// Compression appends the `.bpk` extension; decompression strips it and
/// fails when the input does not carry it (there is nothing sensible to
/// strip).
fn resolve_output(op_mode: OpMode, input: &str) -> anyhow::Result<PathBuf> {
    match op_mode {
        OpMode::Compress => {
            let out = format!("{}{}", input, BPK_EXTENSION);
            displaylevel!(2, "Compressed filename will be : {} \n", out);
            Ok(PathBuf::from(out))
        }
        OpMode::Decompress => match input.strip_suffix(BPK_EXTENSION) {
            Some(base) => {
                displaylevel!(2, "Decoding file {} \n", base);
                Ok(PathBuf::from(base))
            }
            None => anyhow::bail!(
                "cannot determine an output filename for {} (no {} suffix)",
                input,
                BPK_EXTENSION
            ),
        },
        // Test and list modes write nothing.
        OpMode::Test | OpMode::List => Ok(PathBuf::new()),
    }
}

/// Execute the operation selected by argument parsing.
fn run(args: ParsedArgs) -> anyhow::Result<()> {
    let input = args
        .input_filename
        .expect("parse_args guarantees an input file");
    let input_path = Path::new(&input);

    match args.op_mode {
        OpMode::List => return display_file_info(input_path),
        OpMode::Test => {
            decompress_file(input_path, None)?;
            return Ok(());
        }
        OpMode::Compress | OpMode::Decompress => {}
    }

    let output_path = match args.output_filename {
        Some(name) => PathBuf::from(name),
        None => resolve_output(args.op_mode, &input)?,
    };

    if output_path.exists() && !args.force_overwrite {
        anyhow::bail!(
            "{} already exists; use -f to overwrite",
            output_path.display()
        );
    }

    match args.op_mode {
        OpMode::Compress => {
            compress_file(input_path, &output_path, args.scheme)?;
        }
        OpMode::Decompress => {
            decompress_file(input_path, Some(&output_path))?;
        }
        OpMode::Test | OpMode::List => unreachable!(),
    }
    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}: {}", COMPRESSOR_NAME, e);
            std::process::exit(1);
        }
    };

    // Help / version flags set exit_early; exit 0 without any I/O.
    if args.exit_early {
        std::process::exit(0);
    }

    if let Err(e) = run(args) {
        eprintln!("{}: {:#}", COMPRESSOR_NAME, e);
        std::process::exit(1);
    }
}
