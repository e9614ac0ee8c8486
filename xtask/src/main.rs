mod cmd;
mod repo;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Repository maintenance tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the local quality gate (fetch/check/test/fmt/clippy/build).
    Preflight,
    /// Run `mersenne-agent generate` against a known limit and verify the output.
    Smoke {
        /// Exponent limit to scan (defaults to 31)
        #[arg(long, default_value_t = 31)]
        limit: u32,
    },
}

fn main() {
    if let Err(err) = real_main() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Preflight => {
            cmd::preflight::run()?;
        }
        Command::Smoke { limit } => {
            cmd::smoke::run(limit)?;
        }
    }
    Ok(())
}
