//! Error types for the quill tool surface.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors surfaced by tool execution.
///
/// Every failure is terminal and reported once; retry policy, if any,
/// belongs to the calling control loop.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The path denotes a document type this operation must not touch.
    #[error(
        "Unsupported file format: {} (notebook documents have their own structured editor)",
        .path.display()
    )]
    UnsupportedFormat { path: PathBuf },

    /// The target file does not exist.
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Matching or replacement failed inside the patch engine.
    #[error(transparent)]
    Patch(#[from] quill_patch::PatchError),

    /// The write-and-diagnose collaborator failed.
    #[error("Write-through failed: {message}")]
    Collaborator { message: String },

    /// The caller's cancellation signal fired before the write completed.
    #[error("Operation cancelled before the edit was written")]
    Cancelled,

    /// Tool arguments did not deserialize.
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    /// I/O error from a filesystem collaborator.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    /// Create a collaborator failure with the given message.
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator {
            message: message.into(),
        }
    }
}
