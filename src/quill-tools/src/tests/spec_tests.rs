//! Tests for tool spec types and the registry surface.

use serde_json::json;

use crate::context::ToolContext;
use crate::registry::ToolRegistry;
use crate::spec::{ToolCall, ToolDefinition, ToolResult, tools};

#[test]
fn tool_call_round_trips_through_json() {
    let call = ToolCall {
        id: "call_0001".to_string(),
        name: tools::EDIT.to_string(),
        arguments: json!({"path": "a.txt", "oldText": "x", "newText": "y"}),
    };

    let encoded = serde_json::to_string(&call).unwrap();
    let decoded: ToolCall = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded.id, "call_0001");
    assert_eq!(decoded.name, "edit");
    assert_eq!(decoded.arguments["oldText"], "x");
}

#[test]
fn tool_result_constructors() {
    let ok = ToolResult::success("done");
    assert!(ok.success);
    assert!(!ok.is_error());
    assert!(ok.error.is_none());

    let err = ToolResult::error("boom");
    assert!(err.is_error());
    assert_eq!(err.error.as_deref(), Some("boom"));
    assert_eq!(err.output, "boom");
}

#[test]
fn definitions_serialize_for_the_model_api() {
    let definition = ToolDefinition::new("demo", "A demo tool", json!({"type": "object"}));
    let encoded = serde_json::to_value(&definition).unwrap();
    assert_eq!(encoded["name"], "demo");
    assert_eq!(encoded["parameters"]["type"], "object");
}

#[tokio::test]
async fn registry_routes_edit_calls_to_the_handler() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("f.txt"), "hello world\n").unwrap();

    let registry = ToolRegistry::new();
    let context = ToolContext::new(dir.path());
    let result = registry
        .execute_with_context(
            tools::EDIT,
            json!({"path": "f.txt", "oldText": "world", "newText": "quill"}),
            &context,
        )
        .await
        .unwrap();

    assert!(result.success, "{}", result.output);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("f.txt")).unwrap(),
        "hello quill\n"
    );
}
