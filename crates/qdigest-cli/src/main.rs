//! Quantum digest command-line interface.
//!
//! Thin caller of `qdigest-core`: it computes digests and verifies a
//! password against a stored digest. It never persists credentials and
//! never logs the plaintext password.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{hash, verify};

/// qdigest - deterministic quantum-circuit password digests
#[derive(Parser)]
#[command(name = "qdigest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the digest for a password
    Hash {
        /// Password to digest (read from stdin if omitted)
        password: Option<String>,

        /// Sampler seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Number of measurement shots
        #[arg(long, default_value = "1024")]
        shots: u32,

        /// Register width in qubits (positive multiple of 4)
        #[arg(short, long, default_value = "20")]
        qubits: usize,

        /// Output format (plain, json)
        #[arg(short, long, default_value = "plain")]
        format: String,
    },

    /// Recompute a password's digest and compare it to a stored one
    Verify {
        /// Password to check (read from stdin if omitted)
        password: Option<String>,

        /// Expected digest string
        #[arg(short, long)]
        digest: String,

        /// Sampler seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Register width in qubits (positive multiple of 4)
        #[arg(short, long, default_value = "20")]
        qubits: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Hash {
            password,
            seed,
            shots,
            qubits,
            format,
        } => hash::execute(password.as_deref(), seed, shots, qubits, &format),

        Commands::Verify {
            password,
            digest,
            seed,
            qubits,
        } => verify::execute(password.as_deref(), &digest, seed, qubits),
    }
}
