//! CLI entrypoint module structure.
use anyhow::Result;

use crate::tools::mersenne::{self, GenerateMersennePrimesRequest};

pub mod args;
pub mod profile;

pub use args::{CliCommand, GenerateArgs, LaunchProfileArgs, ParsedCommand};
pub use profile::{build_launch_args, resolve_config_path, LaunchProfile, TransportMode};

/// Execute CLI command mode and return a user-facing result payload.
pub fn execute_cli_command(command: CliCommand) -> Result<String> {
    match command {
        CliCommand::Generate(args) => {
            let report = mersenne::run_tool(GenerateMersennePrimesRequest::new(args.limit), "cli");
            if args.json {
                Ok(serde_json::to_string_pretty(&report)?)
            } else {
                Ok(mersenne::describe(&report))
            }
        }
    }
}
