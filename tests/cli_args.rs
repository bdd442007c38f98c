// Unit tests for the hand-rolled argument parser.
//
// parse_args_from takes an explicit argv slice, so these tests never touch
// std::env or the filesystem.

use bpack::cli::{parse_args_from, OpMode};
use bpack::Scheme;

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[test]
fn defaults_to_lz_compress() {
    let args = parse_args_from("bpack", &argv(&["in.txt"])).unwrap();
    assert_eq!(args.op_mode, OpMode::Compress);
    assert_eq!(args.scheme, Scheme::Lz);
    assert!(!args.force_overwrite);
    assert_eq!(args.input_filename.as_deref(), Some("in.txt"));
    assert_eq!(args.output_filename, None);
    assert!(!args.exit_early);
}

#[test]
fn decompress_flag() {
    let args = parse_args_from("bpack", &argv(&["-d", "in.bpk", "out.txt"])).unwrap();
    assert_eq!(args.op_mode, OpMode::Decompress);
    assert_eq!(args.input_filename.as_deref(), Some("in.bpk"));
    assert_eq!(args.output_filename.as_deref(), Some("out.txt"));
}

#[test]
fn aggregated_short_options() {
    let args = parse_args_from("bpack", &argv(&["-df", "in.bpk"])).unwrap();
    assert_eq!(args.op_mode, OpMode::Decompress);
    assert!(args.force_overwrite);
}

#[test]
fn long_options() {
    let args = parse_args_from(
        "bpack",
        &argv(&["--rle", "--force", "--test", "in.bpk"]),
    )
    .unwrap();
    assert_eq!(args.op_mode, OpMode::Test);
    assert_eq!(args.scheme, Scheme::Rle);
    assert!(args.force_overwrite);
}

#[test]
fn list_mode() {
    let args = parse_args_from("bpack", &argv(&["-l", "in.bpk"])).unwrap();
    assert_eq!(args.op_mode, OpMode::List);
}

#[test]
fn double_dash_ends_options() {
    let args = parse_args_from("bpack", &argv(&["--", "-weird-name"])).unwrap();
    assert_eq!(args.input_filename.as_deref(), Some("-weird-name"));
}

#[test]
fn unknown_long_option_is_bad_usage() {
    let err = parse_args_from("bpack", &argv(&["--frobnicate", "in"])).unwrap_err();
    assert!(err.to_string().starts_with("bad usage: "));
}

#[test]
fn unknown_short_option_is_bad_usage() {
    let err = parse_args_from("bpack", &argv(&["-x", "in"])).unwrap_err();
    assert!(err.to_string().starts_with("bad usage: "));
}

#[test]
fn missing_input_is_bad_usage() {
    let err = parse_args_from("bpack", &argv(&[])).unwrap_err();
    assert!(err.to_string().contains("no input file"));
}

#[test]
fn too_many_files_is_bad_usage() {
    let err = parse_args_from("bpack", &argv(&["a", "b", "c"])).unwrap_err();
    assert!(err.to_string().starts_with("bad usage: "));
}

#[test]
fn help_sets_exit_early_without_input() {
    let args = parse_args_from("bpack", &argv(&["--help"])).unwrap();
    assert!(args.exit_early);
}

#[test]
fn last_scheme_flag_wins() {
    let args = parse_args_from("bpack", &argv(&["--rle", "--lz", "in"])).unwrap();
    assert_eq!(args.scheme, Scheme::Lz);
}
