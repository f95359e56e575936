//! Edit tool handler.
//!
//! Orchestrates one edit invocation: normalize the document, locate the
//! search text (exactly, then approximately), apply the substitution,
//! restore the file's byte conventions, hand the result to the
//! write-through collaborator, and assemble the diff payload.
//!
//! Failures map to the error kinds in [`crate::error`]; the handler
//! converts them to the caller-facing message at the tool boundary and
//! never retries.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use quill_common::truncate_first_line;
use quill_patch::{Document, normalize_to_lf, render_diff, replace_all, replace_once};

use crate::context::ToolContext;
use crate::error::{Result, ToolError};
use crate::spec::{ToolHandler, ToolMetadata, ToolResult};
use crate::workspace::{FileCollaborator, FsCollaborator};

/// Arguments for the edit tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditArgs {
    /// Path to the file, relative to the working directory or absolute.
    pub path: String,
    /// Text to find.
    pub old_text: String,
    /// Replacement text.
    pub new_text: String,
    /// Replace every occurrence instead of requiring a unique match.
    #[serde(default)]
    pub all: bool,
}

/// Handler for the edit tool.
pub struct EditHandler {
    collaborator: Arc<dyn FileCollaborator>,
}

impl EditHandler {
    /// Create a handler backed by the plain filesystem.
    pub fn new() -> Self {
        Self {
            collaborator: Arc::new(FsCollaborator),
        }
    }

    /// Create a handler with a custom write/diagnose collaborator.
    pub fn with_collaborator(collaborator: Arc<dyn FileCollaborator>) -> Self {
        Self { collaborator }
    }

    async fn run(&self, args: &EditArgs, context: &ToolContext) -> Result<ToolResult> {
        let path = context.resolve_path(&args.path);

        // Notebook documents have a structured editor elsewhere; refuse
        // before any I/O happens.
        if is_notebook(&path) {
            return Err(ToolError::UnsupportedFormat { path });
        }

        if !self.collaborator.exists(&path).await {
            return Err(ToolError::FileNotFound { path });
        }

        let raw = self.collaborator.read_text(&path).await?;
        let doc = Document::parse(&raw);
        let old_text = normalize_to_lf(&args.old_text);
        let new_text = normalize_to_lf(&args.new_text);

        let edit = if args.all {
            replace_all(doc.text(), &old_text, &new_text, context.match_config())?
        } else {
            replace_once(doc.text(), &old_text, &new_text, context.match_config())?
        };

        if edit.approximate {
            warn!(
                path = %path.display(),
                search = %truncate_first_line(&old_text, 60),
                "edit matched approximately; only whitespace differed"
            );
        }

        let final_content = doc.restore(&edit.content);
        let diagnostics = self
            .collaborator
            .writethrough(&path, &final_content, context.cancel_token())
            .await?;

        let (diff, first_changed_line) = render_diff(doc.text(), &edit.content);

        let mut summary = if edit.replacements == 1 {
            format!("Successfully replaced text in {}.", args.path)
        } else {
            format!(
                "Successfully replaced {} occurrences in {}.",
                edit.replacements, args.path
            )
        };
        if let Some(report) = &diagnostics {
            summary.push('\n');
            summary.push_str(report);
        }

        info!(
            path = %path.display(),
            replacements = edit.replacements,
            "edit applied"
        );

        let metadata = ToolMetadata {
            files_modified: vec![args.path.clone()],
            data: Some(json!({
                "diff": diff,
                "firstChangedLine": first_changed_line,
                "replacements": edit.replacements,
                "diagnostics": diagnostics,
            })),
        };
        Ok(ToolResult::success(summary).with_metadata(metadata))
    }
}

impl Default for EditHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for EditHandler {
    fn name(&self) -> &str {
        crate::spec::tools::EDIT
    }

    async fn execute(&self, arguments: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: EditArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        // Failures become the single caller-facing message here; nothing
        // propagates past the tool boundary as a raw error.
        match self.run(&args, context).await {
            Ok(result) => Ok(result),
            Err(e) => Ok(ToolResult::error(e.to_string())),
        }
    }
}

fn is_notebook(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ipynb"))
}
