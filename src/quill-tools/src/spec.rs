//! Tool specifications and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ToolContext;
use crate::error::Result;

/// A tool call from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique ID for this call.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// Arguments as JSON value.
    pub arguments: Value,
}

/// Tool definition advertised to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// JSON Schema for parameters.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a new tool definition.
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Result of a tool execution.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Output content shown to the model.
    pub output: String,
    /// Whether execution was successful.
    pub success: bool,
    /// Error message if failed.
    pub error: Option<String>,
    /// Additional metadata.
    pub metadata: Option<ToolMetadata>,
}

impl ToolResult {
    /// Create a successful result.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
            error: None,
            metadata: None,
        }
    }

    /// Create an error result.
    pub fn error(message: impl Into<String>) -> Self {
        let msg = message.into();
        Self {
            output: msg.clone(),
            success: false,
            error: Some(msg),
            metadata: None,
        }
    }

    /// Add metadata to the result.
    pub fn with_metadata(mut self, metadata: ToolMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Check if the result is an error.
    pub fn is_error(&self) -> bool {
        !self.success
    }
}

/// Metadata for tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolMetadata {
    /// Files modified by the call.
    pub files_modified: Vec<String>,
    /// Structured JSON payload (diff, first changed line, diagnostics).
    pub data: Option<Value>,
}

/// Trait for tool handlers.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the tool name.
    fn name(&self) -> &str;

    /// Execute the tool.
    async fn execute(&self, arguments: Value, context: &ToolContext) -> Result<ToolResult>;
}

/// Standard tool names.
pub mod tools {
    pub const EDIT: &str = "edit";
}
