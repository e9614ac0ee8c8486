//! A2A (Agent-to-Agent) protocol surface.
//!
//! - Agent Card discovery (`.well-known/agent-card.json`)
//! - JSON-RPC 2.0 task API (`message/send`, `tasks/get`, `tasks/cancel`)
//! - HTTP server (axum)

pub mod agent_card;
pub mod handler;
pub mod server;
pub mod store;
pub mod types;

pub use agent_card::build_agent_card;
pub use handler::dispatch;
pub use store::{new_task_store, TaskStore, TaskTable};
pub use server::{build_router, serve, A2aState};
