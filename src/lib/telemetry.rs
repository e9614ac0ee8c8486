//! Telemetry initialization and tool-call span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper recording the start and finish of one tool call.
pub struct ToolCallSpan {
    span: Span,
    started_at: Instant,
    call_id: Uuid,
    tool: &'static str,
}

impl ToolCallSpan {
    /// Start a span for `tool`, reached through `surface` (`a2a`, `mcp`, `cli`).
    pub fn start(tool: &'static str, surface: &'static str) -> Self {
        let call_id = Uuid::new_v4();
        let span = info_span!(
            target: "mersenne_agent::mersenne",
            "tool_call",
            %call_id,
            tool,
            surface
        );
        Self {
            span,
            started_at: Instant::now(),
            call_id,
            tool,
        }
    }

    /// Close the span with the outcome of a Mersenne scan.
    pub fn finish(self, effective_limit: u32, found: usize) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "mersenne_agent::mersenne",
            call_id = %self.call_id,
            tool = self.tool,
            effective_limit,
            found,
            elapsed_ms = elapsed_ms,
            "Completed tool call"
        );
    }
}

/// Payload for logging runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct RuntimeModeTelemetry<'a> {
    pub transport: &'a str,
    pub host: &'a str,
    pub port: u16,
    pub config_path: Option<&'a str>,
    pub model_name: &'a str,
    pub agent_name: &'a str,
    pub tools: &'a [&'static str],
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "mersenne_agent::runtime",
        transport = telemetry.transport,
        host = telemetry.host,
        port = telemetry.port,
        config_path = telemetry.config_path.unwrap_or("<defaults>"),
        model_name = telemetry.model_name,
        agent_name = telemetry.agent_name,
        tools = ?telemetry.tools,
        launch_args = ?telemetry.launch_args,
        "Starting Mersenne prime agent"
    );
}
