//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::{build_launch_args, resolve_config_path, LaunchProfile, TransportMode};
use crate::server::config::ConfigOverrides;

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    RunServer(LaunchProfile),
    Cli(CliCommand),
}

/// Top-level optional CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Run a single Mersenne prime scan and print the result.
    #[command(about = "Generate Mersenne primes up to an exponent limit")]
    Generate(GenerateArgs),
}

/// Arguments for `generate`.
#[derive(Debug, Clone, Args)]
#[command(
    after_help = "Exponents above 61 are clamped to 61. Large limits take a long time: trial division of 2^61-1 runs roughly 1.5 billion iterations."
)]
pub struct GenerateArgs {
    /// Largest exponent p to test (2^p - 1).
    pub limit: u32,
    /// Print the full report as JSON instead of a summary line.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Mersenne prime generator agent (A2A / MCP)",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Select a2a (default) or stdio.
    #[arg(long, value_enum, default_value_t = TransportMode::A2a)]
    pub transport: TransportMode,
    /// Path to config.toml (overrides MERSENNE_CONFIG_PATH).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Bind host for the A2A server.
    #[arg(long)]
    pub host: Option<String>,
    /// Bind port for the A2A server.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
    /// Model name advertised on the agent card.
    #[arg(long = "model", env = "MODEL_NAME")]
    pub model_name: Option<String>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override)?;
        let overrides = ConfigOverrides {
            host: self.host,
            port: self.port,
            model_name: self.model_name,
        };
        let launch_args = build_launch_args(self.transport, config_path.as_ref(), &overrides);

        Ok(LaunchProfile {
            config_path,
            transport: self.transport,
            overrides,
            launch_args,
        })
    }

    /// Parse CLI args into either server launch mode or utility command mode.
    pub fn into_command(self) -> Result<ParsedCommand> {
        match self.command {
            Some(command) => Ok(ParsedCommand::Cli(command)),
            None => Ok(ParsedCommand::RunServer(self.build()?)),
        }
    }
}
