//! Load and validate server configuration.
//!
//! Values are layered once at startup: built-in defaults, then an optional
//! TOML file, then CLI/environment overrides (`PORT`, `MODEL_NAME`). The
//! resulting [`ServerConfig`] is passed explicitly to everything that needs it.
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod agent;
pub mod server;
pub mod telemetry;

pub use agent::{
    parse_agent_section, AgentSection, RawAgentSection, DEFAULT_AGENT_DESCRIPTION,
    DEFAULT_AGENT_NAME, DEFAULT_LIMIT, DEFAULT_MAX_TASKS, DEFAULT_MODEL_NAME,
};
pub use server::{
    parse_server_section, RawServerSection, ServerSection, DEFAULT_HOST, DEFAULT_PORT,
};

pub const CONFIG_ENV_KEY: &str = "MERSENNE_CONFIG_PATH";

/// Top-level configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub agent: AgentSection,
    pub source_path: Option<PathBuf>,
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model_name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct RawServerConfig {
    server: Option<RawServerSection>,
    agent: Option<RawAgentSection>,
}

impl ServerConfig {
    /// Build configuration from defaults, an optional file, and overrides.
    pub fn load(path: Option<PathBuf>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        telemetry::log_config_source(path.as_deref());

        let raw = match &path {
            Some(path) => Self::read_file(path.clone())?,
            None => RawServerConfig::default(),
        };

        let config = Self::from_raw(raw, overrides, path.clone()).map_err(|err| {
            error!(
                target: "mersenne_agent::config",
                path = ?path,
                reason = %err,
                "Failed to validate configuration"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    /// Load configuration from a specific path without overrides.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        Self::load(Some(path), ConfigOverrides::default())
    }

    fn read_file(path: PathBuf) -> Result<RawServerConfig, ConfigError> {
        info!(
            target: "mersenne_agent::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "mersenne_agent::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "mersenne_agent::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })
    }

    fn from_raw(
        raw: RawServerConfig,
        overrides: ConfigOverrides,
        path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let server = parse_server_section(raw.server, overrides.host, overrides.port)?;
        let agent = parse_agent_section(raw.agent, overrides.model_name)?;

        Ok(Self {
            server,
            agent,
            source_path: path,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::lib::errors::ConfigError;

    use super::{ConfigOverrides, ServerConfig};

    fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn load_valid_config() {
        let config = ServerConfig::load_from_path(fixture_path("config_valid.toml"))
            .expect("config_valid.toml should load");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.server.advertised_url(), "http://localhost:8787/");
        assert_eq!(config.agent.name, "generate_mersenne_agent");
        assert_eq!(config.agent.model_name, "gemini-2.5-pro");
        assert_eq!(config.agent.default_limit, 19);
        assert_eq!(config.agent.max_tasks, 256);
        assert_eq!(config.source_path, Some(fixture_path("config_valid.toml")));
    }

    #[test]
    fn no_file_yields_defaults() {
        let config =
            ServerConfig::load(None, ConfigOverrides::default()).expect("defaults should load");
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.server.port, 8102);
        assert_eq!(config.agent.model_name, "gemini-2.5-flash");
    }

    #[test]
    fn overrides_apply_on_top_of_file() {
        let overrides = ConfigOverrides {
            host: None,
            port: Some(9100),
            model_name: Some("override-model".into()),
        };
        let config = ServerConfig::load(Some(fixture_path("config_valid.toml")), overrides)
            .expect("config should load");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.agent.model_name, "override-model");
    }

    #[test]
    fn missing_file_returns_read_error() {
        let error = ServerConfig::load_from_path(fixture_path("does_not_exist.toml"))
            .expect_err("missing file should error");
        assert!(matches!(error, ConfigError::FileRead { .. }), "{error:?}");
    }

    #[test]
    fn wrongly_typed_port_returns_parse_error() {
        let error = ServerConfig::load_from_path(fixture_path("config_port_string.toml"))
            .expect_err("string port should error");
        match error {
            ConfigError::Parse { .. } | ConfigError::FileRead { .. } => {}
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_port_returns_error() {
        let error = ServerConfig::load_from_path(fixture_path("config_invalid_port.toml"))
            .expect_err("port 0 should error");

        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "server.port"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_model_returns_error() {
        let error = ServerConfig::load_from_path(fixture_path("config_blank_model.toml"))
            .expect_err("blank model_name should error");

        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "agent.model_name"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn file_written_at_runtime_is_read() {
        let dir = tempfile::tempdir().expect("can create temporary directory");
        let path = dir.path().join("agent.toml");
        std::fs::write(&path, "[server]\nport = 18102\n").expect("can write config");

        let config = ServerConfig::load_from_path(path).expect("config should load");
        assert_eq!(config.server.port, 18102);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
