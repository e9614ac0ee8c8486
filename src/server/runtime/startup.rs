use std::process::ExitCode;

use anyhow::Error;
use rmcp::ServiceExt;

use crate::{
    cli::{LaunchProfile, TransportMode},
    lib::telemetry::{emit_runtime_mode, RuntimeModeTelemetry},
    server::{
        a2a::{self, A2aState},
        config::ServerConfig,
        runtime::{build_instructions, MersenneMcpServer},
    },
    tools::ToolRegistry,
};

/// Exit code used when configuration cannot be loaded or validated.
pub const CONFIG_EXIT_CODE: u8 = 78;

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    /// Configuration failures exit with [`CONFIG_EXIT_CODE`].
    pub fn config(err: impl Into<Error>) -> Self {
        Self {
            exit_code: ExitCode::from(CONFIG_EXIT_CODE),
            ..Self::from_error(err)
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

/// Start the agent on the transport selected by the launch profile.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let registry = ToolRegistry::with_builtin_tools();
    let config_path = config
        .source_path
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());

    emit_runtime_mode(&RuntimeModeTelemetry {
        transport: profile.transport.as_str(),
        host: &config.server.host,
        port: config.server.port,
        config_path: config_path.as_deref(),
        model_name: &config.agent.model_name,
        agent_name: &config.agent.name,
        tools: &registry.names(),
        launch_args: &profile.launch_args,
    });

    match profile.transport {
        TransportMode::A2a => run_a2a(config, registry).await,
        TransportMode::Stdio => {
            let instructions = build_instructions(&profile, &config);
            run_stdio(MersenneMcpServer::new(instructions)).await
        }
    }
}

async fn run_a2a(config: ServerConfig, registry: ToolRegistry) -> Result<(), RuntimeExit> {
    a2a::serve(A2aState::with_registry(config, registry))
        .await
        .map_err(RuntimeExit::from_error)
}

async fn run_stdio(server: MersenneMcpServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    tracing::info!(target: "mersenne_agent::runtime", transport = "stdio", "MCP session started");
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}
