use serde::Deserialize;

use crate::lib::{errors::ConfigError, primes::MAX_MERSENNE_EXPONENT};

pub const DEFAULT_AGENT_NAME: &str = "generate_mersenne_agent";
pub const DEFAULT_AGENT_DESCRIPTION: &str = "Generate Mersenne Primes in Rust.";
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash";
pub const DEFAULT_LIMIT: u32 = 31;
pub const DEFAULT_MAX_TASKS: usize = 1024;

/// Identity and defaults advertised by the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSection {
    pub name: String,
    pub description: String,
    /// Model name carried for discovery; no model is invoked.
    pub model_name: String,
    /// Limit used when a message names no exponent bound.
    pub default_limit: u32,
    /// Finished A2A tasks kept for `tasks/get` before the oldest are dropped.
    pub max_tasks: usize,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            name: DEFAULT_AGENT_NAME.to_string(),
            description: DEFAULT_AGENT_DESCRIPTION.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            default_limit: DEFAULT_LIMIT,
            max_tasks: DEFAULT_MAX_TASKS,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawAgentSection {
    pub name: Option<String>,
    pub description: Option<String>,
    pub model_name: Option<String>,
    pub default_limit: Option<u32>,
    pub max_tasks: Option<usize>,
}

pub fn parse_agent_section(
    raw: Option<RawAgentSection>,
    model_override: Option<String>,
) -> Result<AgentSection, ConfigError> {
    let agent_raw = raw.unwrap_or_default();
    let name = non_blank(agent_raw.name, "agent.name")?
        .unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string());
    let description = non_blank(agent_raw.description, "agent.description")?
        .unwrap_or_else(|| DEFAULT_AGENT_DESCRIPTION.to_string());
    let model_name = match model_override.filter(|value| !value.trim().is_empty()) {
        Some(model) => model,
        None => non_blank(agent_raw.model_name, "agent.model_name")?
            .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
    };
    let default_limit = agent_raw.default_limit.unwrap_or(DEFAULT_LIMIT);
    if default_limit > MAX_MERSENNE_EXPONENT {
        return Err(ConfigError::InvalidField {
            field: "agent.default_limit",
            message: format!("Use a limit of at most {MAX_MERSENNE_EXPONENT}"),
        });
    }

    let max_tasks = agent_raw.max_tasks.unwrap_or(DEFAULT_MAX_TASKS);
    if max_tasks == 0 {
        return Err(ConfigError::InvalidField {
            field: "agent.max_tasks",
            message: "Keep at least one task".into(),
        });
    }

    Ok(AgentSection {
        name,
        description,
        model_name,
        default_limit,
        max_tasks,
    })
}

fn non_blank(value: Option<String>, field: &'static str) -> Result<Option<String>, ConfigError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidField {
            field,
            message: "Value must not be blank".into(),
        }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}
