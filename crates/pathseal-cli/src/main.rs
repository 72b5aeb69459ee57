//! Pathseal command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Create a master key
//! pathseal keygen --out master.key
//!
//! # Seal a file under a path; any prefix of the path can open it
//! pathseal encrypt --key master.key --input photo.jpg --output photo.seal --path /foo/bar/photo.jpg
//! pathseal decrypt --key master.key --input photo.seal --output photo.jpg --path /foo
//!
//! # Show the header without decrypting
//! pathseal inspect --input photo.seal
//! ```

use std::{io, path::PathBuf};

use clap::{Parser, Subcommand};
use pathseal_client::SymmetricAlgorithm;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod keyfile;

/// Pathseal data protector
#[derive(Parser, Debug)]
#[command(name = "pathseal")]
#[command(about = "Seal and open files with a path-derived key hierarchy")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a master key file
    Keygen {
        /// Where to write the key (must not exist)
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Seal a file into a container
    Encrypt {
        #[command(flatten)]
        transform: TransformOpts,
    },

    /// Open a container
    Decrypt {
        #[command(flatten)]
        transform: TransformOpts,
    },

    /// Show a container's header
    Inspect {
        /// Container to read
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct TransformOpts {
    /// Master key file
    #[arg(short, long)]
    key: PathBuf,

    /// File to read
    #[arg(short, long)]
    input: PathBuf,

    /// File to write
    #[arg(short, long)]
    output: PathBuf,

    /// Path the data is sealed under, e.g. /foo/bar/test.jpg
    #[arg(short, long)]
    path: Option<String>,

    /// Bulk cipher (xchacha20poly1305, aes256gcm)
    #[arg(long, default_value = "xchacha20poly1305")]
    cipher: SymmetricAlgorithm,
}

impl From<TransformOpts> for commands::TransformArgs {
    fn from(opts: TransformOpts) -> Self {
        Self {
            key: opts.key,
            input: opts.input,
            output: opts.output,
            path: opts.path,
            cipher: opts.cipher,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let mut stdout = io::stdout().lock();
    match args.command {
        Command::Keygen { out } => commands::keygen(&out, &mut stdout),
        Command::Encrypt { transform } => commands::encrypt(&transform.into(), &mut stdout),
        Command::Decrypt { transform } => commands::decrypt(&transform.into(), &mut stdout),
        Command::Inspect { input } => commands::inspect(&input, &mut stdout),
    }
}
