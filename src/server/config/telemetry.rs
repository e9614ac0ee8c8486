use tracing::{debug, info};

use super::{ServerConfig, CONFIG_ENV_KEY};

pub fn log_config_source(path: Option<&std::path::Path>) {
    match path {
        Some(path) => info!(
            target: "mersenne_agent::config",
            path = %path.display(),
            "Loading configuration file"
        ),
        None => debug!(
            target: "mersenne_agent::config",
            env = CONFIG_ENV_KEY,
            "No configuration file given; using built-in defaults"
        ),
    }
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "mersenne_agent::config",
        path = %config
            .source_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<defaults>".into()),
        host = %config.server.host,
        port = config.server.port,
        advertised_url = %config.server.advertised_url(),
        agent_name = %config.agent.name,
        model_name = %config.agent.model_name,
        default_limit = config.agent.default_limit,
        "Configuration loaded successfully"
    );
}
