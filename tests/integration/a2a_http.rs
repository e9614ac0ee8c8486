use std::path::PathBuf;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use mersenne_agent::server::{
    a2a::{build_router, A2aState},
    config::{ConfigOverrides, ServerConfig},
};

use crate::common::fixture;

fn fixture_router() -> Result<Router> {
    let config = ServerConfig::load(
        Some(PathBuf::from(fixture("tests/fixtures/config_valid.toml"))),
        ConfigOverrides::default(),
    )?;
    Ok(build_router(A2aState::new(config)))
}

async fn rpc(app: &Router, body: Value) -> Result<Value> {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn agent_card_reflects_loaded_config() -> Result<()> {
    let app = fixture_router()?;
    let request = Request::builder()
        .uri("/.well-known/agent-card.json")
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let card: Value = serde_json::from_slice(&bytes)?;

    assert_eq!(card["name"], "generate_mersenne_agent");
    assert_eq!(card["url"], "http://localhost:8787/");
    assert_eq!(card["protocolVersion"], "0.3.0");
    assert!(card["description"]
        .as_str()
        .is_some_and(|desc| desc.contains("gemini-2.5-pro")));
    assert_eq!(card["skills"][0]["id"], "generate_mersenne_primes");
    Ok(())
}

#[tokio::test]
async fn send_get_and_cancel_round_trip() -> Result<()> {
    let app = fixture_router()?;

    let sent = rpc(
        &app,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "message/send",
            "params": {
                "message": {
                    "role": "user",
                    "messageId": "m-1",
                    "parts": [{ "kind": "data", "data": { "limit": 13 } }]
                }
            }
        }),
    )
    .await?;
    let task = &sent["result"];
    assert_eq!(task["kind"], "task");
    assert_eq!(task["status"]["state"], "completed");
    let data = &task["artifacts"][0]["parts"][1]["data"];
    assert_eq!(data["exponents"], json!([2, 3, 5, 7, 13]));
    assert_eq!(data["mersenne_primes"], json!(["3", "7", "31", "127", "8191"]));
    let task_id = task["id"].as_str().expect("task id").to_string();

    let fetched = rpc(
        &app,
        json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tasks/get",
            "params": { "id": task_id, "historyLength": 1 }
        }),
    )
    .await?;
    assert_eq!(fetched["result"]["id"], task_id.as_str());
    let history = fetched["result"]["history"]
        .as_array()
        .expect("history array");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["role"], "agent");

    let canceled = rpc(
        &app,
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tasks/cancel",
            "params": { "id": task_id }
        }),
    )
    .await?;
    assert_eq!(canceled["error"]["code"], -32002);
    assert_eq!(canceled["id"], 3);
    Ok(())
}

#[tokio::test]
async fn text_without_number_uses_configured_default_limit() -> Result<()> {
    let app = fixture_router()?;
    let sent = rpc(
        &app,
        json!({
            "jsonrpc": "2.0",
            "id": "default",
            "method": "message/send",
            "params": {
                "message": {
                    "role": "user",
                    "parts": [{ "kind": "text", "text": "Generate some Mersenne primes" }]
                }
            }
        }),
    )
    .await?;
    let data = &sent["result"]["artifacts"][0]["parts"][1]["data"];
    assert_eq!(data["requested_limit"], 19);
    assert_eq!(data["exponents"], json!([2, 3, 5, 7, 13, 17, 19]));
    Ok(())
}

#[tokio::test]
async fn unknown_method_and_task_are_reported() -> Result<()> {
    let app = fixture_router()?;

    let unknown_method = rpc(
        &app,
        json!({ "jsonrpc": "2.0", "id": 1, "method": "tasks/resubscribe", "params": {} }),
    )
    .await?;
    assert_eq!(unknown_method["error"]["code"], -32601);

    let unknown_task = rpc(
        &app,
        json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tasks/get",
            "params": { "id": "missing" }
        }),
    )
    .await?;
    assert_eq!(unknown_task["error"]["code"], -32001);
    Ok(())
}
