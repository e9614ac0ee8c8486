use std::sync::Arc;

use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler},
    model::{ErrorData, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, Json,
};

use crate::tools::{
    self,
    mersenne::{self, GenerateMersennePrimesRequest, MersenneReport},
    ServerToolRouter,
};

/// MCP server exposing the Mersenne-prime tool.
#[derive(Clone)]
pub struct MersenneMcpServer {
    instructions: Arc<String>,
    tool_router: ServerToolRouter<Self>,
}

impl MersenneMcpServer {
    pub fn new(instructions: String) -> Self {
        Self {
            instructions: Arc::new(instructions),
            tool_router: tools::build_router(Self::tool_router),
        }
    }
}

#[tool_router(router = tool_router)]
impl MersenneMcpServer {
    #[tool(
        name = "generate_mersenne_primes",
        description = "Generate Mersenne primes up to a given exponent limit and measure execution time."
    )]
    async fn generate_mersenne_primes(
        &self,
        Parameters(request): Parameters<GenerateMersennePrimesRequest>,
    ) -> Result<Json<MersenneReport>, ErrorData> {
        tokio::task::spawn_blocking(move || mersenne::run_tool(request, "mcp"))
            .await
            .map(Json)
            .map_err(|err| ErrorData::internal_error(format!("tool call aborted: {err}"), None))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for MersenneMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }
}
