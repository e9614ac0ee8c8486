use std::{
    process::{Command as StdCommand, Stdio},
    time::Duration,
};

use anyhow::Result;
use rmcp::{model::ClientInfo, serve_client};
use serde_json::Value;
use tokio::time::timeout;

use crate::common::{fixture, spawn_stdio_server, BINARY_PATH};

#[tokio::test]
async fn stdio_spawn_lists_tools() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_stdio_server().await?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let list = client.list_tools(None).await?;
    assert!(
        list.tools
            .iter()
            .any(|tool| tool.name.as_ref() == "generate_mersenne_primes"),
        "list_tools should include generate_mersenne_primes: {:?}",
        list.tools
    );
    let instructions = client
        .peer_info()
        .and_then(|info| info.instructions.clone())
        .unwrap_or_default();
    assert!(
        instructions.contains("gemini-2.5-pro"),
        "instructions should name the configured model: {instructions}"
    );

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}

#[test]
fn generate_command_prints_summary() {
    let output = StdCommand::new(BINARY_PATH)
        .args(["generate", "7"])
        .stdin(Stdio::null())
        .output()
        .expect("process should start");
    assert!(output.status.success(), "status: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("Found 4 Mersenne primes with exponent <= 7: 3, 7, 31, 127."),
        "stdout: {stdout}"
    );
}

#[test]
fn generate_command_emits_json_report() {
    let output = StdCommand::new(BINARY_PATH)
        .args(["generate", "13", "--json"])
        .stdin(Stdio::null())
        .output()
        .expect("process should start");
    assert!(output.status.success(), "status: {:?}", output.status);
    let report: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(report["exponents"], serde_json::json!([2, 3, 5, 7, 13]));
    assert_eq!(report["mersenne_primes"][4], "8191");
}

#[test]
fn invalid_config_exits_with_config_code() {
    let output = StdCommand::new(BINARY_PATH)
        .env(
            "MERSENNE_CONFIG_PATH",
            fixture("tests/fixtures/config_invalid_port.toml"),
        )
        .env_remove("PORT")
        .env_remove("MODEL_NAME")
        .stdin(Stdio::null())
        .output()
        .expect("process should start");
    assert_eq!(
        output.status.code(),
        Some(78),
        "config error exit code (78) expected, got {:?}",
        output.status
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("server.port"), "stderr: {stderr}");
}
