use anyhow::Result;
use rmcp::{
    model::{CallToolRequestParam, ClientInfo},
    serve_client,
    service::ServiceError,
    ServiceExt,
};
use serde_json::{json, Map, Value};

use mersenne_agent::server::runtime::MersenneMcpServer;

fn arguments(value: Value) -> Map<String, Value> {
    value.as_object().expect("JSON object").clone()
}

#[tokio::test]
async fn list_tools_advertises_generator() -> Result<()> {
    let server = MersenneMcpServer::new("test instructions".into());
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;

    let list = client.list_tools(None).await;
    let info = client.peer_info().cloned();

    let _ = client.cancel().await;
    let _ = server_task.await;

    let list = list?;
    let tool = list
        .tools
        .iter()
        .find(|tool| tool.name.as_ref() == "generate_mersenne_primes")
        .expect("generate_mersenne_primes should be listed");
    assert!(tool
        .description
        .as_deref()
        .is_some_and(|desc| desc.contains("exponent limit")));
    let instructions = info.and_then(|info| info.instructions);
    assert_eq!(instructions.as_deref(), Some("test instructions"));
    Ok(())
}

#[tokio::test]
async fn generate_tool_returns_structured_report() -> Result<()> {
    let server = MersenneMcpServer::new(String::new());
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;

    let call_result = client
        .call_tool(CallToolRequestParam {
            name: "generate_mersenne_primes".into(),
            arguments: Some(arguments(json!({ "limit": 5 }))),
        })
        .await;

    let _ = client.cancel().await;
    let _ = server_task.await;

    let payload = call_result?
        .structured_content
        .expect("structured_content should exist");
    assert_eq!(payload["requested_limit"], 5);
    assert_eq!(payload["effective_limit"], 5);
    assert_eq!(payload["exponents"], json!([2, 3, 5]));
    assert_eq!(payload["mersenne_primes"], json!(["3", "7", "31"]));
    assert!(payload["summary"]
        .as_str()
        .is_some_and(|summary| summary.starts_with("Elapsed time: ")));
    Ok(())
}

#[tokio::test]
async fn generate_tool_rejects_negative_limit() -> Result<()> {
    let server = MersenneMcpServer::new(String::new());
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;

    let call_result = client
        .call_tool(CallToolRequestParam {
            name: "generate_mersenne_primes".into(),
            arguments: Some(arguments(json!({ "limit": -4 }))),
        })
        .await;

    let _ = client.cancel().await;
    let _ = server_task.await;

    match call_result.expect_err("negative limit must be rejected") {
        ServiceError::McpError(_) => {}
        other => panic!("Unexpected error: {other:?}"),
    }
    Ok(())
}
