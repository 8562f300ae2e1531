// Desktop/tooling crate: unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod cargo;
mod sim;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Math quiz development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the hardware, simulator and no_std builds, then clippy and rustfmt
    Check,
    /// Run all tests (unit, integration, doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Run the desktop simulator
    Sim {
        /// Build the simulator in release mode
        #[arg(short, long)]
        release: bool,
        /// Directory holding correct_answer.wav and wrong_answer.wav
        /// (passed as QUIZ_ASSETS; defaults to the cues linked into the binary)
        #[arg(long)]
        assets: Option<std::path::PathBuf>,
        /// Log filter passed as RUST_LOG
        #[arg(long, default_value = "info")]
        log: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Sim {
            release,
            assets,
            log,
        } => sim::run(release, assets.as_deref(), &log),
    }
}
