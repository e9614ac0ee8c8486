//! A2A HTTP server powered by axum.
//!
//! Serves:
//! - `GET /.well-known/agent-card.json`: Agent Card discovery (`agent.json` alias)
//! - `POST /`: JSON-RPC 2.0 endpoint
//! - `GET /health`: Health check

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use super::{
    agent_card::build_agent_card,
    handler,
    store::{new_task_store, TaskStore},
    types::{AgentCard, JsonRpcRequest, JsonRpcResponse, A2A_PROTOCOL_VERSION},
};
use crate::{lib::errors::A2aError, server::config::ServerConfig, tools::ToolRegistry};

/// Shared state for the A2A server.
#[derive(Clone)]
pub struct A2aState {
    pub task_store: TaskStore,
    pub registry: Arc<ToolRegistry>,
    pub config: Arc<ServerConfig>,
}

impl A2aState {
    /// State with the built-in tools and an empty task store.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_registry(config, ToolRegistry::with_builtin_tools())
    }

    pub fn with_registry(config: ServerConfig, registry: ToolRegistry) -> Self {
        Self {
            task_store: new_task_store(config.agent.max_tasks),
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }
}

/// Build the axum router for the A2A server.
pub fn build_router(state: A2aState) -> Router {
    Router::new()
        .route("/.well-known/agent-card.json", get(get_agent_card))
        .route("/.well-known/agent.json", get(get_agent_card))
        .route("/", post(handle_jsonrpc))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(state: A2aState) -> anyhow::Result<()> {
    let addr = state.config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind TCP port {addr}"))?;
    let local_addr: SocketAddr = listener
        .local_addr()
        .context("failed to read bound address")?;

    tracing::info!(
        target: "mersenne_agent::runtime",
        bind_addr = %local_addr,
        agent_card = %format!("http://{local_addr}/.well-known/agent-card.json"),
        advertised_url = %state.config.server.advertised_url(),
        "Started A2A mersenne prime server"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("A2A server terminated abnormally")?;

    tracing::info!(target: "mersenne_agent::runtime", "A2A server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(
            target: "mersenne_agent::runtime",
            error = %err,
            "Failed to listen for Ctrl-C; serving until the process is killed"
        );
        std::future::pending::<()>().await;
    }
}

/// GET /.well-known/agent-card.json: Agent Card discovery.
async fn get_agent_card(State(state): State<A2aState>) -> Json<AgentCard> {
    Json(build_agent_card(&state.config, &state.registry))
}

/// POST /: JSON-RPC 2.0 endpoint.
///
/// Body parsing happens here so malformed input still gets a JSON-RPC error
/// envelope instead of an HTTP rejection.
async fn handle_jsonrpc(State(state): State<A2aState>, body: Bytes) -> Json<JsonRpcResponse> {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(err) => {
            return Json(JsonRpcResponse::from_error(
                Value::Null,
                &A2aError::Parse(err.to_string()),
            ))
        }
    };
    let id = raw.get("id").cloned().unwrap_or(Value::Null);
    let req: JsonRpcRequest = match serde_json::from_value(raw) {
        Ok(req) => req,
        Err(err) => {
            return Json(JsonRpcResponse::from_error(
                id,
                &A2aError::InvalidRequest(err.to_string()),
            ))
        }
    };

    Json(handler::dispatch(req, &state).await)
}

/// GET /health: Health check.
async fn health_check(State(state): State<A2aState>) -> Json<Value> {
    let (tasks, task_capacity) = {
        let store = state.task_store.read().await;
        (store.len(), store.capacity())
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "A2A",
        "protocol_version": A2A_PROTOCOL_VERSION,
        "agent": state.config.agent.name,
        "model": state.config.agent.model_name,
        "tools": state.registry.names(),
        "tasks": tasks,
        "task_capacity": task_capacity,
    }))
}
