//! imgnum CLI
//!
//! Image → Integer → Image. Every command prints a short report on stdout;
//! logs go to stderr.
//!
//! # Commands
//!
//! - `encode <image> <output.imgnum>`
//! - `decode <input.imgnum> <output image>`
//! - `decimal <input.imgnum> <output.txt>` (can be gigantic)
//! - `info <input.imgnum>`
//! - `hash <input.imgnum>`
//! - `verify <input.imgnum> <image>`
//! - `seal <input.imgnum> <output.seal>`
//! - `checkseal <input.imgnum> <input.seal>`
//! - `batchseal <folder> [--recursive] [--index <path>]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;
mod render;

pub use error::CliExitCode;

const AFTER_HELP: &str = "\
Notes:
  Pixel order: top-left -> bottom-right (row-major).
  Colors are stored as RGB 8-bit (3 bytes per pixel). Alpha is discarded.
  A .imgnum file stores a minimal integer payload plus the total byte count
  needed to restore leading zeros.";

/// Store images as one big integer; fingerprint and seal them.
#[derive(Parser)]
#[command(name = "imgnum")]
#[command(version)]
#[command(about = "Image -> Integer -> Image: containers, fingerprints and seals")]
#[command(after_help = AFTER_HELP)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten an image to RGB and store it as a container
    Encode {
        input: PathBuf,
        output: PathBuf,
    },
    /// Restore a container to an image (format from the output extension)
    Decode {
        input: PathBuf,
        output: PathBuf,
    },
    /// Write the payload integer in base 10 (WARNING: can be gigantic)
    Decimal {
        input: PathBuf,
        output: PathBuf,
        /// Refuse payloads larger than this many bytes
        #[arg(long, value_name = "BYTES")]
        max_bytes: Option<u64>,
    },
    /// Show header fields, integer size and fingerprint
    Info {
        input: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the fingerprint of the reconstructed pixel stream
    Hash {
        input: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare a container with an image file
    Verify {
        input: PathBuf,
        image: PathBuf,
    },
    /// Write a seal certificate for a container
    Seal {
        input: PathBuf,
        output: PathBuf,
    },
    /// Check a seal certificate against a container
    #[command(alias = "check-seal")]
    Checkseal {
        input: PathBuf,
        seal: PathBuf,
    },
    /// Seal every container in a folder and write a CSV index
    #[command(alias = "batch-seal")]
    Batchseal {
        folder: PathBuf,
        /// Descend into subfolders
        #[arg(long)]
        recursive: bool,
        /// Index path (default: <folder>/imgnum_index.csv)
        #[arg(long, value_name = "PATH")]
        index: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too
            let code = if e.use_stderr() {
                CliExitCode::Usage
            } else {
                CliExitCode::Success
            };
            let _ = e.print();
            return code.into();
        }
    };

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match commands::dispatch(cli.command) {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            CliExitCode::Error.into()
        }
    }
}
