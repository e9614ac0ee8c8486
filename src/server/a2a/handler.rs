//! JSON-RPC 2.0 handler for A2A protocol operations.
//!
//! Dispatches JSON-RPC methods:
//! - `message/send`: run the selected tool and return a finished task
//! - `tasks/get`: retrieve task by ID
//! - `tasks/cancel`: cancel a non-terminal task

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::{server::A2aState, store::TaskStore, types::*};
use crate::{
    lib::errors::A2aError,
    tools::{mersenne::GENERATE_TOOL_ID, ToolOutput},
};

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern must compile"));

/// Dispatch a JSON-RPC request to the appropriate handler.
pub async fn dispatch(req: JsonRpcRequest, state: &A2aState) -> JsonRpcResponse {
    if req.jsonrpc != JSONRPC_VERSION {
        return JsonRpcResponse::from_error(
            req.id,
            &A2aError::InvalidRequest("expected JSON-RPC version 2.0".into()),
        );
    }

    let result = match req.method.as_str() {
        "message/send" => handle_send_message(req.params, state).await,
        "tasks/get" => handle_get_task(req.params, &state.task_store).await,
        "tasks/cancel" => handle_cancel_task(req.params, &state.task_store).await,
        other => Err(A2aError::MethodNotFound(other.to_string())),
    };

    match result {
        Ok(value) => JsonRpcResponse::success(req.id, value),
        Err(err) => {
            tracing::debug!(
                target: "mersenne_agent::a2a",
                method = %req.method,
                code = err.code(),
                reason = %err,
                "A2A request rejected"
            );
            JsonRpcResponse::from_error(req.id, &err)
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, A2aError> {
    serde_json::from_value(params).map_err(|err| A2aError::InvalidParams(err.to_string()))
}

fn task_to_value(task: &Task) -> Result<Value, A2aError> {
    serde_json::to_value(task).map_err(|err| A2aError::Internal(err.to_string()))
}

/// Handle `message/send`: run the selected tool to completion and store the task.
async fn handle_send_message(params: Value, state: &A2aState) -> Result<Value, A2aError> {
    let send_params: SendMessageParams = parse_params(params)?;
    if send_params.message.parts.is_empty() {
        return Err(A2aError::InvalidParams("message has no parts".into()));
    }

    let skill = select_skill(&send_params);
    let args = extract_arguments(&send_params.message, state.config.agent.default_limit);

    let task_id = Uuid::new_v4().to_string();
    let context_id = send_params
        .message
        .context_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut incoming = send_params.message;
    incoming
        .message_id
        .get_or_insert_with(|| Uuid::new_v4().to_string());
    incoming.context_id = Some(context_id.clone());
    incoming.task_id = Some(task_id.clone());

    tracing::info!(
        target: "mersenne_agent::a2a",
        task_id = %task_id,
        context_id = %context_id,
        skill = %skill,
        args = %args,
        "Running A2A task"
    );

    let registry = Arc::clone(&state.registry);
    let invoke_skill = skill.clone();
    let outcome = tokio::task::spawn_blocking(move || registry.invoke(&invoke_skill, &args, "a2a"))
        .await
        .map_err(|err| A2aError::Internal(format!("tool call aborted: {err}")))?;

    let task = match outcome {
        Ok(output) => completed_task(task_id, context_id, incoming, output),
        Err(err) => {
            tracing::warn!(
                target: "mersenne_agent::a2a",
                task_id = %task_id,
                skill = %skill,
                error = %err,
                "A2A task failed"
            );
            failed_task(task_id, context_id, incoming, err.to_string())
        }
    };

    let value = task_to_value(&task)?;
    let evicted = state.task_store.write().await.insert(task.id.clone(), task);
    if !evicted.is_empty() {
        tracing::debug!(
            target: "mersenne_agent::a2a",
            evicted = evicted.len(),
            "Evicted oldest finished tasks"
        );
    }
    Ok(value)
}

fn completed_task(task_id: String, context_id: String, incoming: Message, output: ToolOutput) -> Task {
    let reply = Message::agent(
        Uuid::new_v4().to_string(),
        &task_id,
        &context_id,
        vec![Part::text(output.summary.clone())],
    );
    let mut task = Task::new(
        task_id,
        context_id,
        TaskStatus {
            state: TaskState::Completed,
            message: Some(reply.clone()),
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
        },
    );
    task.artifacts.push(Artifact {
        artifact_id: Uuid::new_v4().to_string(),
        name: Some("mersenne-primes".into()),
        parts: vec![Part::text(output.summary), Part::data(output.data)],
    });
    task.history = vec![incoming, reply];
    task
}

fn failed_task(task_id: String, context_id: String, incoming: Message, reason: String) -> Task {
    let reply = Message::agent(
        Uuid::new_v4().to_string(),
        &task_id,
        &context_id,
        vec![Part::text(reason)],
    );
    let mut task = Task::new(
        task_id,
        context_id,
        TaskStatus {
            state: TaskState::Failed,
            message: Some(reply.clone()),
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
        },
    );
    task.history = vec![incoming, reply];
    task
}

/// Skill named by request metadata, message metadata, or a data part; defaults to the Mersenne tool.
fn select_skill(params: &SendMessageParams) -> String {
    let from_metadata = |metadata: &Option<Value>| {
        metadata
            .as_ref()
            .and_then(|value| value.get("skill"))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    from_metadata(&params.metadata)
        .or_else(|| from_metadata(&params.message.metadata))
        .or_else(|| {
            params
                .message
                .parts
                .iter()
                .filter_map(|part| part.data.as_ref())
                .find_map(|data| data.get("skill").and_then(Value::as_str))
                .map(str::to_string)
        })
        .unwrap_or_else(|| GENERATE_TOOL_ID.to_string())
}

/// Tool arguments: a data part's object wins, then the first number in the text, then the default.
fn extract_arguments(message: &Message, default_limit: u32) -> Value {
    let from_data = message
        .parts
        .iter()
        .filter_map(|part| part.data.as_ref())
        .filter_map(Value::as_object)
        .map(|object| {
            object
                .iter()
                .filter(|(key, _)| key.as_str() != "skill")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect::<Map<String, Value>>()
        })
        .find(|object| !object.is_empty());
    if let Some(object) = from_data {
        return Value::Object(object);
    }

    let from_text = message
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .find_map(|text| FIRST_NUMBER.find(text))
        // Digit runs only fail to parse on overflow; those clamp to the maximum anyway.
        .map(|found| found.as_str().parse::<u32>().unwrap_or(u32::MAX));

    json!({ "limit": from_text.unwrap_or(default_limit) })
}

/// Handle `tasks/get`: retrieve a task by ID.
async fn handle_get_task(params: Value, store: &TaskStore) -> Result<Value, A2aError> {
    let query: TaskQueryParams = parse_params(params)?;

    let tasks = store.read().await;
    let task = tasks
        .get(&query.id)
        .ok_or_else(|| A2aError::TaskNotFound(query.id.clone()))?;

    match query.history_length {
        Some(length) if length < task.history.len() => {
            let mut trimmed = task.clone();
            trimmed.history = trimmed.history.split_off(trimmed.history.len() - length);
            task_to_value(&trimmed)
        }
        _ => task_to_value(task),
    }
}

/// Handle `tasks/cancel`: cancel a task that has not reached a terminal state.
async fn handle_cancel_task(params: Value, store: &TaskStore) -> Result<Value, A2aError> {
    let cancel: TaskIdParams = parse_params(params)?;

    let mut tasks = store.write().await;
    let task = tasks
        .get_mut(&cancel.id)
        .ok_or_else(|| A2aError::TaskNotFound(cancel.id.clone()))?;

    if task.status.state.is_terminal() {
        return Err(A2aError::TaskNotCancelable {
            id: cancel.id,
            state: task.status.state.as_str().to_string(),
        });
    }

    task.status.state = TaskState::Canceled;
    task.status.timestamp = Some(chrono::Utc::now().to_rfc3339());
    tracing::info!(target: "mersenne_agent::a2a", task_id = %cancel.id, "Canceled A2A task");
    task_to_value(task)
}
