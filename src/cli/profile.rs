//! LaunchProfile and config path resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::server::config::{ConfigOverrides, CONFIG_ENV_KEY};

/// Transport the agent listens on.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TransportMode {
    /// A2A JSON-RPC over HTTP.
    A2a,
    /// MCP over stdin/stdout.
    Stdio,
}

impl TransportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::A2a => "a2a",
            TransportMode::Stdio => "stdio",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: Option<PathBuf>,
    pub transport: TransportMode,
    pub overrides: ConfigOverrides,
    pub launch_args: Vec<String>,
}

/// Resolve config path in the order: CLI override, then `MERSENNE_CONFIG_PATH`.
///
/// Returns `None` when neither is set; the built-in defaults apply then.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let Some(path) = override_path.or_else(|| env::var_os(CONFIG_ENV_KEY).map(PathBuf::from))
    else {
        return Ok(None);
    };

    if path.is_absolute() {
        return Ok(Some(path));
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(Some(cwd.join(path)))
}

/// Build launch arguments suitable for reproduction/logging.
pub fn build_launch_args(
    transport: TransportMode,
    config: Option<&PathBuf>,
    overrides: &ConfigOverrides,
) -> Vec<String> {
    let mut args = vec![format!("--transport={}", transport.as_str())];
    if let Some(config) = config {
        args.push(format!("--config={}", config.display()));
    }
    if let Some(host) = &overrides.host {
        args.push(format!("--host={host}"));
    }
    if let Some(port) = overrides.port {
        args.push(format!("--port={port}"));
    }
    if let Some(model) = &overrides.model_name {
        args.push(format!("--model={model}"));
    }
    args
}
