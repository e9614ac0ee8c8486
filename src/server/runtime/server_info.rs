use crate::{cli::LaunchProfile, server::config::ServerConfig, tools::mersenne::GENERATE_TOOL_ID};

/// Build the instructions string shown to MCP clients.
pub fn build_instructions(profile: &LaunchProfile, config: &ServerConfig) -> String {
    format!(
        "{name}: {description} To generate Mersenne primes, use the {tool} tool with a `limit` exponent (max 61). Serving in {transport} mode; configured model: {model}.",
        name = config.agent.name,
        description = config.agent.description,
        tool = GENERATE_TOOL_ID,
        transport = profile.transport.as_str(),
        model = config.agent.model_name
    )
}
