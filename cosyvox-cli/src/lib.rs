//! Shared plumbing for the cosyvox command-line tools.
//!
//! The three bins (`enroll-voice`, `tts-worker`, `tts-worker2`) share one
//! stdout contract that parent processes scrape by line prefix:
//!
//! - `SUCCESS` / `SUCCESS:<payload>` / `SUCCESS - <N> bytes` on the final
//!   line of a successful run, exit code 0.
//! - `ERROR:<message>` on any failure, exit code 1. A usage failure also
//!   prints a `Usage:` line.
//! - Human-readable diagnostic lines may precede the status line; callers
//!   must match on prefix, not position.
//!
//! Everything that is part of that contract goes to stdout. Tracing output
//! goes to stderr so it can never be mistaken for a status line.

use std::string::FromUtf8Error;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

/// Maximum characters shown in the input-text preview diagnostic.
pub const PREVIEW_CHARS: usize = 40;

/// Failures a CLI run can end with, one variant per branch of the stdout
/// `ERROR:` taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration or service failure from the cosyvox client.
    #[error(transparent)]
    Service(#[from] cosyvox::VoxError),

    /// The `--base64` input was not valid base64.
    #[error("Base64 decode failed: {0}")]
    Decode(#[source] base64::DecodeError),

    /// The `--base64` input decoded to bytes that are not UTF-8 text.
    #[error("Base64 decode failed: decoded bytes are not valid UTF-8: {0}")]
    Utf8(#[source] FromUtf8Error),

    /// The audio file could not be written.
    #[error("Failed to write {path}: {source}")]
    WriteOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Decode a base64 argument into UTF-8 text.
///
/// Used by `tts-worker2` so callers can smuggle arbitrary text through shells
/// and process spawners without quoting hazards.
///
/// ## Errors
///
/// Returns [`CliError::Decode`] for invalid base64 and [`CliError::Utf8`]
/// when the decoded bytes are not valid UTF-8.
pub fn decode_base64_text(encoded: &str) -> Result<String, CliError> {
    let bytes = BASE64.decode(encoded).map_err(CliError::Decode)?;
    String::from_utf8(bytes).map_err(CliError::Utf8)
}

/// Truncate text to `max_chars` characters for a diagnostic line, appending
/// `...` when something was cut. Operates on characters, never bytes, so
/// multi-byte input stays intact.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Print the `ERROR:` status line and terminate with exit code 1.
///
/// Callers that only check zero/non-zero keep working; finer-grained exit
/// codes are deliberately not used.
pub fn exit_with_error(message: impl std::fmt::Display) -> ! {
    println!("ERROR:{message}");
    std::process::exit(1);
}

/// Print the missing-arguments error plus a usage line, then terminate with
/// exit code 1. No network activity has happened when this runs.
pub fn exit_with_usage(usage: &str) -> ! {
    println!("ERROR:Missing arguments");
    println!("Usage: {usage}");
    std::process::exit(1);
}

/// Parse argv for a bin, keeping every failure on the stdout contract.
///
/// `--help` and `--version` keep clap's own behavior (stdout, exit 0). A
/// missing required argument prints the fixed missing-arguments error plus
/// the usage line. Any other parse failure (unknown flag, stray trailing
/// argument) prints an `ERROR:` line carrying clap's one-line description,
/// then the usage line. All failure paths exit 1; nothing reaches stderr.
pub fn parse_args<T: clap::Parser>(usage: &str) -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            ErrorKind::MissingRequiredArgument => exit_with_usage(usage),
            _ => {
                let rendered = err.to_string();
                let message = rendered
                    .lines()
                    .next()
                    .map(|line| line.strip_prefix("error: ").unwrap_or(line))
                    .unwrap_or("Invalid arguments");
                println!("ERROR:{message}");
                println!("Usage: {usage}");
                std::process::exit(1);
            }
        },
    }
}

/// Install the tracing subscriber for a CLI run.
///
/// Filtering follows `RUST_LOG`; output goes to stderr to keep stdout
/// reserved for the status-line contract.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
