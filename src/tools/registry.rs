//! Explicit capability-name to handler mapping used for name-based dispatch.
use std::collections::BTreeMap;

use serde_json::Value;

use crate::lib::errors::ToolCallError;

/// Text and structured payload produced by one tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub summary: String,
    pub data: Value,
}

/// Handler signature: JSON arguments plus the calling surface (`a2a`, `cli`, ...).
pub type ToolHandler = fn(&Value, &'static str) -> Result<ToolOutput, ToolCallError>;

/// Metadata and handler for a registered capability.
#[derive(Debug, Clone)]
pub struct RegisteredTool {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub examples: &'static [&'static str],
    pub handler: ToolHandler,
}

/// Registered tools keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every tool shipped with this crate.
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register(crate::tools::mersenne::registered_tool());
        registry
    }

    /// Register `tool`, returning any tool previously stored under the same name.
    pub fn register(&mut self, tool: RegisteredTool) -> Option<RegisteredTool> {
        self.tools.insert(tool.name, tool)
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    /// Tool names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredTool> {
        self.tools.values()
    }

    /// Look up `name` and run its handler with `args`.
    pub fn invoke(
        &self,
        name: &str,
        args: &Value,
        surface: &'static str,
    ) -> Result<ToolOutput, ToolCallError> {
        let tool = self.get(name).ok_or_else(|| ToolCallError::UnknownTool {
            name: name.to_string(),
        })?;
        (tool.handler)(args, surface)
    }
}
