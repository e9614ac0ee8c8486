use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8102;

/// Server socket settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Base URL advertised in the agent card; derived from host/port when unset.
    pub public_url: Option<String>,
}

impl ServerSection {
    /// URL that A2A clients should POST JSON-RPC requests to.
    pub fn advertised_url(&self) -> String {
        match &self.public_url {
            Some(url) => format!("{}/", url.trim_end_matches('/')),
            None => format!("http://{}:{}/", self.host, self.port),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_url: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub public_url: Option<String>,
}

pub fn parse_server_section(
    raw: Option<RawServerSection>,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<ServerSection, ConfigError> {
    let server_raw = raw.unwrap_or_default();
    let host = host_override
        .or(server_raw.host)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    if host.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            field: "server.host",
            message: "Host must not be empty".into(),
        });
    }
    let port = port_override.or(server_raw.port).unwrap_or(DEFAULT_PORT);
    validate_port(port)?;
    let public_url = server_raw
        .public_url
        .filter(|url| !url.trim().is_empty())
        .map(|url| validate_public_url(url.trim()))
        .transpose()?;
    Ok(ServerSection {
        host,
        port,
        public_url,
    })
}

fn validate_port(port: u16) -> Result<(), ConfigError> {
    if port != 0 {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        field: "server.port",
        message: "Use a port in the range 1-65535".into(),
    })
}

fn validate_public_url(url: &str) -> Result<String, ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(url.to_string());
    }

    Err(ConfigError::InvalidField {
        field: "server.public_url",
        message: format!("`{url}` must start with http:// or https://"),
    })
}
