//! CLI front-end: argument parsing and display infrastructure.

pub mod args;
pub mod constants;

pub use args::{parse_args, parse_args_from, print_usage, OpMode, ParsedArgs};
