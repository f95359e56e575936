//! Quill Tools - the callable tool surface for an agent control loop.
//!
//! This crate wires the pure text-patch engine from `quill-patch` into a
//! tool surface an LLM-driven loop can call: a registry of tool
//! definitions and handlers, an execution context carrying explicit
//! configuration, the edit orchestrator, and the host-facing seams
//! (file collaborators, streaming-backend registration, ordered id
//! minting, plugin source resolution).

pub mod backends;
pub mod context;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod registry;
pub mod sources;
pub mod spec;
pub mod workspace;

#[cfg(test)]
mod tests;

pub use backends::{BackendRegistry, BackendRegistryError, StreamingBackend};
pub use context::ToolContext;
pub use error::{Result, ToolError};
pub use handlers::{EditArgs, EditHandler};
pub use ids::IdMinter;
pub use registry::ToolRegistry;
pub use sources::{PluginSource, SourceError};
pub use spec::{ToolCall, ToolDefinition, ToolHandler, ToolMetadata, ToolResult};
pub use workspace::{FileCollaborator, FsCollaborator};
