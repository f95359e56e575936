//! Tool execution context.
//!
//! All configuration a tool invocation needs travels in the context:
//! working directory, match tuning, and the caller's cancellation signal.
//! Nothing is ambient process state, so two invocations with different
//! contexts never interfere.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use quill_common::normalize_path;
use quill_patch::MatchConfig;

/// Context for tool execution.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Current working directory.
    cwd: PathBuf,
    /// Match engine tuning for edit operations.
    match_config: MatchConfig,
    /// Cancellation signal supplied by the caller.
    cancel_token: CancellationToken,
}

impl ToolContext {
    /// Create a new tool context rooted at `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            match_config: MatchConfig::default(),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Replace the match tuning (e.g. to disable approximate matching).
    pub fn with_match_config(mut self, config: MatchConfig) -> Self {
        self.match_config = config;
        self
    }

    /// Attach the caller's cancellation token.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// The working directory tools resolve relative paths against.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Match engine tuning for edit operations.
    pub fn match_config(&self) -> &MatchConfig {
        &self.match_config
    }

    /// The caller's cancellation token.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Resolve a path against the working directory.
    ///
    /// Joins relative paths onto the cwd and resolves `.`/`..` components
    /// lexically; no filesystem access, so nonexistent targets resolve
    /// the same way as existing ones.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let p = PathBuf::from(path);
        let joined = if p.is_absolute() { p } else { self.cwd.join(p) };
        normalize_path(&joined)
    }
}
