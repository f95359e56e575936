//! Tool registry - manages tool definitions and handlers.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::context::ToolContext;
use crate::error::Result;
use crate::handlers::EditHandler;
use crate::spec::{ToolDefinition, ToolHandler, ToolResult, tools};

/// Registry of available tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolDefinition>,
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools)
            .field("handlers_count", &self.handlers.len())
            .finish()
    }
}

impl ToolRegistry {
    /// Create a new registry with the default tools registered.
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_default_tools();
        registry
    }

    /// Register a tool with its handler.
    pub fn register_with_handler(&mut self, tool: ToolDefinition, handler: Arc<dyn ToolHandler>) {
        self.tools.insert(tool.name.clone(), tool);
        self.handlers.insert(handler.name().to_string(), handler);
    }

    /// Get a tool definition.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// Get all tool definitions for the model API.
    pub fn get_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().cloned().collect()
    }

    /// Check if a tool is registered.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name) || self.handlers.contains_key(name)
    }

    /// Execute a tool with the given context.
    pub async fn execute_with_context(
        &self,
        name: &str,
        arguments: Value,
        context: &ToolContext,
    ) -> Result<ToolResult> {
        match self.handlers.get(name) {
            Some(handler) => handler.execute(arguments, context).await,
            None => Ok(ToolResult::error(format!("Unknown tool: {name}"))),
        }
    }

    fn register_default_tools(&mut self) {
        self.register_with_handler(edit_definition(), Arc::new(EditHandler::new()));
    }
}

fn edit_definition() -> ToolDefinition {
    ToolDefinition::new(
        tools::EDIT,
        "Edit a file by replacing text. The oldText is matched exactly first; \
         when only whitespace or indentation differs, a close match above the \
         similarity threshold is accepted. Use this for precise, surgical edits.",
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the file to edit (relative or absolute)"
                },
                "oldText": {
                    "type": "string",
                    "minLength": 1,
                    "description": "Text to find and replace"
                },
                "newText": {
                    "type": "string",
                    "description": "New text to replace the old text with"
                },
                "all": {
                    "type": "boolean",
                    "description": "Replace every occurrence instead of requiring a unique match",
                    "default": false
                }
            },
            "required": ["path", "oldText", "newText"]
        }),
    )
}
