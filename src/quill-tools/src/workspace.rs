//! Collaborator boundary for file access and write-through.
//!
//! The edit orchestrator never touches the filesystem directly; it goes
//! through a [`FileCollaborator`], so hosts can route reads and writes
//! into an editor buffer, a virtual filesystem, or a diagnostics-aware
//! sink. [`FsCollaborator`] is the plain-filesystem default.

use std::path::Path;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Result, ToolError};

/// External collaborator for file existence, reads, and write-through.
#[async_trait]
pub trait FileCollaborator: Send + Sync {
    /// Whether the target exists.
    async fn exists(&self, path: &Path) -> bool;

    /// Read the target as text.
    async fn read_text(&self, path: &Path) -> Result<String>;

    /// Persist final content and optionally return post-edit diagnostics
    /// (e.g. language-server output for the edited file).
    ///
    /// Awaited under the caller's cancellation signal: implementations
    /// must not confirm a write after `cancel` has fired. Returning
    /// `Ok(None)` (no diagnostics) is always valid.
    async fn writethrough(
        &self,
        path: &Path,
        content: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>>;
}

/// Filesystem collaborator with atomic writes and no diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCollaborator;

#[async_trait]
impl FileCollaborator for FsCollaborator {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn read_text(&self, path: &Path) -> Result<String> {
        Ok(tokio::fs::read_to_string(path).await?)
    }

    async fn writethrough(
        &self,
        path: &Path,
        content: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>> {
        if cancel.is_cancelled() {
            return Err(ToolError::Cancelled);
        }
        tokio::select! {
            _ = cancel.cancelled() => Err(ToolError::Cancelled),
            result = write_atomic(path, content) => {
                result?;
                debug!(path = %path.display(), "write-through committed");
                Ok(None)
            }
        }
    }
}

/// Atomic write using the temp-file + rename pattern.
///
/// The temp file lives in the target's directory so the rename stays on
/// one filesystem; readers never observe a partially written file.
async fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("quill-edit");
    let temp_path = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

    tokio::fs::write(&temp_path, content).await?;
    match tokio::fs::rename(&temp_path, path).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = tokio::fs::remove_file(&temp_path).await;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn atomic_write_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let collaborator = FsCollaborator;
        let result = collaborator
            .writethrough(&path, "payload\n", &CancellationToken::new())
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "payload\n");

        // No temp droppings left behind.
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn cancelled_writethrough_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let token = CancellationToken::new();
        token.cancel();

        let err = FsCollaborator
            .writethrough(&path, "payload\n", &token)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Cancelled));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn exists_and_read_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "hello").unwrap();

        assert!(FsCollaborator.exists(&path).await);
        assert!(!FsCollaborator.exists(&dir.path().join("absent")).await);
        assert_eq!(FsCollaborator.read_text(&path).await.unwrap(), "hello");
    }
}
