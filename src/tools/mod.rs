//! Tools exposed by the agent and helper functions for the MCP router.

pub mod mersenne;
pub mod registry;

use rmcp::handler::server::router::tool::ToolRouter;

pub use registry::{RegisteredTool, ToolHandler, ToolOutput, ToolRegistry};

pub type ServerToolRouter<S> = ToolRouter<S>;

/// Helper for building a tool router.
pub fn build_router<S>(builder: impl FnOnce() -> ServerToolRouter<S>) -> ServerToolRouter<S>
where
    S: Send + Sync + 'static,
{
    builder()
}
