//! Mersenne-prime tool shared by the A2A, MCP and CLI surfaces.

pub mod generator;
pub mod request;

use serde_json::Value;

pub use generator::{effective_limit, format_elapsed, generate_mersenne_primes, MersenneReport};
pub use request::GenerateMersennePrimesRequest;

use crate::{
    lib::{errors::ToolCallError, telemetry::ToolCallSpan},
    tools::registry::{RegisteredTool, ToolOutput},
};

pub const GENERATE_TOOL_ID: &str = "generate_mersenne_primes";
pub const GENERATE_TOOL_DESCRIPTION: &str =
    "Generate Mersenne primes up to a given exponent limit and measure execution time.";

/// Run a scan inside a tool-call span.
pub fn run_tool(request: GenerateMersennePrimesRequest, surface: &'static str) -> MersenneReport {
    let span = ToolCallSpan::start(GENERATE_TOOL_ID, surface);
    let report = request.run();
    span.finish(report.effective_limit, report.mersenne_primes.len());
    report
}

/// One-line description of a report, suitable for a chat reply.
pub fn describe(report: &MersenneReport) -> String {
    if report.mersenne_primes.is_empty() {
        return format!(
            "Found no Mersenne primes with exponent <= {}. {}",
            report.effective_limit, report.summary
        );
    }
    let found = report.mersenne_primes.len();
    format!(
        "Found {found} Mersenne {} with exponent <= {}: {}. {}",
        if found == 1 { "prime" } else { "primes" },
        report.effective_limit,
        report.mersenne_primes.join(", "),
        report.summary
    )
}

fn handle_generate(args: &Value, surface: &'static str) -> Result<ToolOutput, ToolCallError> {
    let request: GenerateMersennePrimesRequest =
        serde_json::from_value(args.clone()).map_err(|err| ToolCallError::InvalidArguments {
            tool: GENERATE_TOOL_ID,
            message: err.to_string(),
        })?;
    let report = run_tool(request, surface);
    let data = serde_json::to_value(&report).map_err(|err| ToolCallError::InvalidArguments {
        tool: GENERATE_TOOL_ID,
        message: err.to_string(),
    })?;
    Ok(ToolOutput {
        summary: describe(&report),
        data,
    })
}

/// Registry entry for `generate_mersenne_primes`.
pub fn registered_tool() -> RegisteredTool {
    RegisteredTool {
        name: GENERATE_TOOL_ID,
        title: "Generate Mersenne Primes",
        description: GENERATE_TOOL_DESCRIPTION,
        tags: &["math", "primes", "benchmark"],
        examples: &["Generate Mersenne primes up to exponent 31."],
        handler: handle_generate,
    }
}
