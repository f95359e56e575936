//! Quill Patch - text matching and rewriting for agent file edits.
//!
//! Given a file's current content and a caller-supplied search fragment
//! plus replacement, this crate locates the fragment (exactly, or
//! approximately when only whitespace and indentation differ),
//! disambiguates between possible locations, applies the substitution
//! without disturbing the file's byte-level conventions (line endings,
//! byte-order mark), and renders a reviewable diff.
//!
//! The engine is pure and synchronous: it performs no I/O, holds no
//! locks, and treats content as opaque text.
//!
//! # Example
//!
//! ```
//! use quill_patch::{Document, MatchConfig, render_diff, replace_once};
//!
//! let doc = Document::parse("a\r\nb\r\nc\r\n");
//! let edit = replace_once(doc.text(), "b", "B", &MatchConfig::default()).unwrap();
//! let (diff, first_changed) = render_diff(doc.text(), &edit.content);
//!
//! assert_eq!(doc.restore(&edit.content), "a\r\nB\r\nc\r\n");
//! assert_eq!(first_changed, Some(2));
//! assert!(diff.contains("+2 B"));
//! ```

mod diff;
mod error;
mod matcher;
mod normalize;
mod replace;

pub use diff::render_diff;
pub use error::{PatchError, PatchResult};
pub use matcher::{MatchCandidate, MatchConfig, MatchKind, MatchOutcome, find_match};
pub use normalize::{Document, LineEnding, Terminator, normalize_to_lf};
pub use replace::{EditOutcome, replace_all, replace_once, splice};
