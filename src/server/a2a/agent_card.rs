//! Agent Card generation for `.well-known/agent-card.json`.
//!
//! One skill is advertised per tool in the registry.

use super::types::{AgentCapabilities, AgentCard, AgentSkill, A2A_PROTOCOL_VERSION};
use crate::{server::config::ServerConfig, tools::ToolRegistry};

const TEXT_MODE: &str = "text/plain";
const JSON_MODE: &str = "application/json";

/// Build the Agent Card from the loaded configuration and registered tools.
pub fn build_agent_card(config: &ServerConfig, registry: &ToolRegistry) -> AgentCard {
    let modes = vec![TEXT_MODE.to_string(), JSON_MODE.to_string()];

    AgentCard {
        name: config.agent.name.clone(),
        description: format!(
            "{} Configured with model: {}.",
            config.agent.description.trim_end_matches('.'),
            config.agent.model_name
        ),
        url: config.server.advertised_url(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        protocol_version: A2A_PROTOCOL_VERSION.to_string(),
        preferred_transport: "JSONRPC".to_string(),
        capabilities: AgentCapabilities {
            streaming: false,
            push_notifications: false,
            state_transition_history: true,
        },
        default_input_modes: modes.clone(),
        default_output_modes: modes.clone(),
        skills: registry
            .iter()
            .map(|tool| AgentSkill {
                id: tool.name.to_string(),
                name: tool.title.to_string(),
                description: tool.description.to_string(),
                tags: tool.tags.iter().map(|tag| tag.to_string()).collect(),
                examples: tool.examples.iter().map(|ex| ex.to_string()).collect(),
                input_modes: modes.clone(),
                output_modes: modes.clone(),
            })
            .collect(),
    }
}
