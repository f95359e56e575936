//! Error types for patch operations.

use thiserror::Error;

use quill_common::truncate_for_display;

use crate::matcher::MatchCandidate;

/// Result type for patch operations.
pub type PatchResult<T> = Result<T, PatchError>;

/// Errors that can occur during matching and replacement.
///
/// Every variant is terminal: the engine never retries, and the tool
/// boundary converts each into a single caller-facing message.
#[derive(Debug, Clone, Error)]
pub enum PatchError {
    /// The search text was empty after line-ending normalization.
    #[error(
        "The search text cannot be empty. To prepend content, include the first line of the file in both the search and replacement text."
    )]
    EmptyPattern,

    /// More than one exact occurrence in single-replacement mode.
    #[error(
        "Found {count} occurrences of the search text. Add surrounding context to make it unique, or enable replace-all mode."
    )]
    AmbiguousMatch { count: usize },

    /// Nothing matched exactly or above the approximate threshold.
    ///
    /// Carries the best-known near-miss so the caller can adjust the
    /// search text or the threshold.
    #[error("{}", no_match_message(.closest, .threshold))]
    NoMatch {
        closest: Option<MatchCandidate>,
        threshold: f64,
    },

    /// A match was found and replaced, but the resulting content equals
    /// the original.
    #[error(
        "The replacement produced identical content; nothing was changed. The replacement text may be equal to the matched text."
    )]
    NoEffectiveChange,
}

impl PatchError {
    /// Create a no-match error carrying the closest candidate seen.
    pub fn no_match(closest: Option<MatchCandidate>, threshold: f64) -> Self {
        Self::NoMatch { closest, threshold }
    }
}

fn no_match_message(closest: &Option<MatchCandidate>, threshold: &f64) -> String {
    match closest {
        Some(candidate) => format!(
            "No match found for the search text. Closest candidate: '{}' (similarity {:.2}, threshold {:.2}). The search text must match including content; only whitespace differences are tolerated.",
            truncate_for_display(&candidate.text, 80),
            candidate.confidence,
            threshold
        ),
        None => format!(
            "No match found for the search text (threshold {:.2}).",
            threshold
        ),
    }
}
