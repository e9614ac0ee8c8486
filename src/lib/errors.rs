use std::path::PathBuf;

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration has invalid `{field}`: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures raised when dispatching a call through the tool registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolCallError {
    #[error("Unknown tool `{name}`")]
    UnknownTool { name: String },
    #[error("Invalid arguments for `{tool}`: {message}")]
    InvalidArguments { tool: &'static str, message: String },
}

/// JSON-RPC error codes used by the A2A endpoint.
pub mod jsonrpc_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const TASK_NOT_FOUND: i32 = -32001;
    pub const TASK_NOT_CANCELABLE: i32 = -32002;
}

/// A2A request failures, each mapped onto a JSON-RPC error code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum A2aError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Method not found: {0}")]
    MethodNotFound(String),
    #[error("Invalid params: {0}")]
    InvalidParams(String),
    #[error("Task not found: {0}")]
    TaskNotFound(String),
    #[error("Task {id} cannot be canceled in state {state}")]
    TaskNotCancelable { id: String, state: String },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl A2aError {
    pub const fn code(&self) -> i32 {
        match self {
            A2aError::Parse(_) => jsonrpc_codes::PARSE_ERROR,
            A2aError::InvalidRequest(_) => jsonrpc_codes::INVALID_REQUEST,
            A2aError::MethodNotFound(_) => jsonrpc_codes::METHOD_NOT_FOUND,
            A2aError::InvalidParams(_) => jsonrpc_codes::INVALID_PARAMS,
            A2aError::TaskNotFound(_) => jsonrpc_codes::TASK_NOT_FOUND,
            A2aError::TaskNotCancelable { .. } => jsonrpc_codes::TASK_NOT_CANCELABLE,
            A2aError::Internal(_) => jsonrpc_codes::INTERNAL_ERROR,
        }
    }
}
