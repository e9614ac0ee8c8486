//! Entry point for the Mersenne prime agent.
use std::process::ExitCode;

use clap::Parser;
use mersenne_agent::{
    cli::{execute_cli_command, CliCommand, LaunchProfile, LaunchProfileArgs, ParsedCommand},
    lib::telemetry,
    server::{
        config::ServerConfig,
        runtime::{self, RuntimeExit},
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LaunchProfileArgs::parse();
    let command = args.into_command().map_err(RuntimeExit::from_error)?;

    match command {
        ParsedCommand::RunServer(profile) => run_server(profile).await,
        ParsedCommand::Cli(command) => handle_cli_command(command).await,
    }
}

async fn run_server(profile: LaunchProfile) -> Result<(), RuntimeExit> {
    let config = ServerConfig::load(profile.config_path.clone(), profile.overrides.clone())
        .map_err(RuntimeExit::config)?;
    runtime::run_server(profile, config).await
}

async fn handle_cli_command(command: CliCommand) -> Result<(), RuntimeExit> {
    let message = tokio::task::spawn_blocking(move || execute_cli_command(command))
        .await
        .map_err(RuntimeExit::from_error)?
        .map_err(RuntimeExit::from_error)?;
    println!("{message}");
    Ok(())
}
