//! CLI argument parsing, exported from the library so integration tests can
//! exercise it.

use std::path::PathBuf;

/// Fully-parsed CLI arguments for a compile-and-run request.
#[derive(Debug)]
pub struct CliArgs {
    pub path: PathBuf,
    /// Stop after lowering and print the IR module to stdout.
    pub dump_ir: bool,
    /// Reserved; prints a placeholder.
    pub dump_ast: bool,
}

/// Result of `parse_args`.
#[derive(Debug)]
pub enum ParseArgsResult {
    /// Normal compile-and-run request.
    Args(CliArgs),
    /// `--help` was present (or no arguments were given); print usage, exit 0.
    Help,
    /// `--version` was present; print the version string and exit 0.
    Version,
}

/// Parses command-line arguments (the full `std::env::args()` slice
/// including `argv[0]`).
pub fn parse_args(args: &[String]) -> Result<ParseArgsResult, String> {
    if args.len() <= 1 {
        return Ok(ParseArgsResult::Help);
    }

    let mut path: Option<PathBuf> = None;
    let mut dump_ir = false;
    let mut dump_ast = false;

    for arg in &args[1..] {
        match arg.as_str() {
            "--help" | "-h" => return Ok(ParseArgsResult::Help),
            "--version" | "-v" => return Ok(ParseArgsResult::Version),
            "--dump-ir" => dump_ir = true,
            "--dump-ast" => dump_ast = true,
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            file => path = Some(PathBuf::from(file)),
        }
    }

    let path = path.ok_or_else(|| "No input file specified".to_owned())?;
    Ok(ParseArgsResult::Args(CliArgs {
        path,
        dump_ir,
        dump_ast,
    }))
}

/// Returns the usage/help text for the CLI.
pub fn help_text() -> &'static str {
    "Zero Compiler\n\
     \n\
     Usage:\n\
     \x20 zeroc <file.zero>            Compile and execute\n\
     \x20 zeroc --dump-ir <file.zero>  Dump IR\n\
     \x20 zeroc --dump-ast <file.zero> Dump AST (placeholder)\n\
     \x20 zeroc --help, -h             Show this help\n\
     \x20 zeroc --version, -v          Show version\n"
}

/// Returns the version string for the CLI.
pub fn version_text() -> &'static str {
    concat!("zeroc ", env!("CARGO_PKG_VERSION"), "\n")
}
