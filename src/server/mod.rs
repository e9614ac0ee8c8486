//! Server surfaces (A2A over HTTP, MCP over stdio) and their configuration.

pub mod a2a;
pub mod config;
pub mod runtime;
