//! Command-line argument parsing for the `bpack` binary.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Both return a [`ParsedArgs`] value capturing every option and filename
//! discovered during the parse.
//!
//! Short options may be aggregated (e.g. `-df`).  A bare `--` marks the end
//! of options; subsequent arguments are treated as file paths regardless of
//! whether they start with `-`.  Bad or unrecognised options return an `Err`
//! with a human-readable message that begins with `"bad usage: "`.

use anyhow::anyhow;

use crate::cli::constants::{set_display_level, COMPRESSOR_NAME};
use crate::io::Scheme;

// ── Operation mode ────────────────────────────────────────────────────────────

/// Operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Compress the input file (default).
    Compress,
    /// Decompress the input file.
    Decompress,
    /// Decompress and verify the checksum without writing any output.
    Test,
    /// Print container metadata for the input file.
    List,
}

// ── Public output type ────────────────────────────────────────────────────────

/// Complete set of options and filenames produced by the parsing loop.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Resolved operation mode.
    pub op_mode: OpMode,
    /// Compression scheme used when compressing.
    pub scheme: Scheme,
    /// Overwrite an existing destination file without failing.
    pub force_overwrite: bool,
    /// Input filename.
    pub input_filename: Option<String>,
    /// Output filename (resolved from the input name when absent).
    pub output_filename: Option<String>,
    /// When `true`, a --version / --help flag was processed; the caller
    /// should exit 0 without performing any I/O operation.
    pub exit_early: bool,
    /// Program name (argv[0]), used by help output.
    pub exe_name: String,
}

// ── Help text ─────────────────────────────────────────────────────────────────

/// Print the usage summary.
pub fn print_usage(exe_name: &str) {
    println!("Usage: {} [OPTIONS] INPUT [OUTPUT]", exe_name);
    println!();
    println!("Compress or decompress a single file with the {} block codec.", COMPRESSOR_NAME);
    println!();
    println!("Options:");
    println!("  -z, --compress    compress INPUT (default operation)");
    println!("  -d, --decompress  decompress INPUT");
    println!("  -t, --test        decompress and verify INPUT without writing output");
    println!("  -l, --list        print container metadata for INPUT");
    println!("      --rle         use the run-length scheme when compressing");
    println!("      --lz          use the dictionary-match scheme (default)");
    println!("  -f, --force       overwrite the destination file if it exists");
    println!("  -v, --verbose     increase verbosity");
    println!("  -q, --quiet       suppress warnings");
    println!("  -h, --help        print this help and exit");
    println!("  -V, --version     print the version and exit");
}

fn print_version() {
    println!("{} v{}", COMPRESSOR_NAME, crate::version_string());
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` (skipping argv[0]).
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    let exe_name = std::env::args().next().unwrap_or_else(|| COMPRESSOR_NAME.to_owned());
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&exe_name, &argv)
}

/// Parse an explicit argument list.
///
/// `exe_name` is argv[0] (used for help text); `argv` is argv[1..].  This
/// variant is callable from tests without touching `std::env`.
pub fn parse_args_from(exe_name: &str, argv: &[String]) -> anyhow::Result<ParsedArgs> {
    let mut args = ParsedArgs {
        op_mode: OpMode::Compress,
        scheme: Scheme::Lz,
        force_overwrite: false,
        input_filename: None,
        output_filename: None,
        exit_early: false,
        exe_name: exe_name.to_owned(),
    };
    let mut display_level: u32 = 2;
    let mut options_ended = false;

    for arg in argv {
        if options_ended || !arg.starts_with('-') || arg == "-" {
            push_filename(&mut args, arg)?;
            continue;
        }

        match arg.as_str() {
            "--" => options_ended = true,
            "--compress" => args.op_mode = OpMode::Compress,
            "--decompress" | "--uncompress" => args.op_mode = OpMode::Decompress,
            "--test" => args.op_mode = OpMode::Test,
            "--list" => args.op_mode = OpMode::List,
            "--lz" => args.scheme = Scheme::Lz,
            "--rle" => args.scheme = Scheme::Rle,
            "--force" => args.force_overwrite = true,
            "--verbose" => display_level += 1,
            "--quiet" => display_level = display_level.saturating_sub(1),
            "--help" => {
                print_usage(exe_name);
                args.exit_early = true;
            }
            "--version" => {
                print_version();
                args.exit_early = true;
            }
            long if long.starts_with("--") => {
                return Err(anyhow!("bad usage: unknown option '{}'", long));
            }
            short => {
                // Aggregated short options: each character after '-' is one flag.
                for c in short.chars().skip(1) {
                    match c {
                        'z' => args.op_mode = OpMode::Compress,
                        'd' => args.op_mode = OpMode::Decompress,
                        't' => args.op_mode = OpMode::Test,
                        'l' => args.op_mode = OpMode::List,
                        'f' => args.force_overwrite = true,
                        'v' => display_level += 1,
                        'q' => display_level = display_level.saturating_sub(1),
                        'h' => {
                            print_usage(exe_name);
                            args.exit_early = true;
                        }
                        'V' => {
                            print_version();
                            args.exit_early = true;
                        }
                        _ => return Err(anyhow!("bad usage: unknown option '-{}'", c)),
                    }
                }
            }
        }
    }

    set_display_level(display_level);

    if !args.exit_early && args.input_filename.is_none() {
        return Err(anyhow!("bad usage: no input file given"));
    }
    Ok(args)
}

fn push_filename(args: &mut ParsedArgs, name: &str) -> anyhow::Result<()> {
    if args.input_filename.is_none() {
        args.input_filename = Some(name.to_owned());
    } else if args.output_filename.is_none() {
        args.output_filename = Some(name.to_owned());
    } else {
        return Err(anyhow!("bad usage: too many file arguments ('{}')", name));
    }
    Ok(())
}
