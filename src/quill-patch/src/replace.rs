//! Single and replace-all substitution over canonical content.

use tracing::debug;

use crate::error::{PatchError, PatchResult};
use crate::matcher::{MatchCandidate, MatchConfig, MatchKind, exact_occurrences, find_match};

/// Result of a successful replacement run.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// The mutated canonical content.
    pub content: String,
    /// How many substitutions were applied.
    pub replacements: usize,
    /// Whether any substitution relied on approximate matching.
    pub approximate: bool,
}

/// Pure substring splice at the candidate's offset and length.
pub fn splice(content: &str, candidate: &MatchCandidate, new_text: &str) -> String {
    let mut out = String::with_capacity(content.len() - candidate.len + new_text.len());
    out.push_str(&content[..candidate.start]);
    out.push_str(new_text);
    out.push_str(&content[candidate.start + candidate.len..]);
    out
}

/// Replace a unique occurrence of `old` with `new`.
///
/// Exactly one match is required: one exact occurrence, or the single
/// qualifying approximate match when no exact occurrence exists. Any
/// other count is an error, and a replacement that leaves the content
/// unchanged is a user-visible no-op error rather than a silent success.
pub fn replace_once(
    content: &str,
    old: &str,
    new: &str,
    config: &MatchConfig,
) -> PatchResult<EditOutcome> {
    if old.is_empty() {
        return Err(PatchError::EmptyPattern);
    }

    let outcome = find_match(content, old, config);
    if outcome.exact_count > 1 {
        return Err(PatchError::AmbiguousMatch {
            count: outcome.exact_count,
        });
    }
    let Some(chosen) = outcome.chosen else {
        return Err(PatchError::no_match(outcome.closest, config.threshold));
    };

    let next = splice(content, &chosen, new);
    if next == content {
        return Err(PatchError::NoEffectiveChange);
    }

    debug!(
        start = chosen.start,
        confidence = chosen.confidence,
        "replaced one occurrence"
    );
    Ok(EditOutcome {
        content: next,
        replacements: 1,
        approximate: chosen.kind == MatchKind::Approximate,
    })
}

/// Replace every occurrence of `old` with `new`.
///
/// An exact global pass runs first. When no exact occurrence exists, the
/// engine falls back to iterative approximate replacement: the match
/// engine re-runs against the already-mutated content until no qualifying
/// match remains. The loop carries a hard iteration cap proportional to
/// the document's line count, because a replacement text that itself
/// approximately re-matches the search fragment would otherwise never
/// converge.
pub fn replace_all(
    content: &str,
    old: &str,
    new: &str,
    config: &MatchConfig,
) -> PatchResult<EditOutcome> {
    if old.is_empty() {
        return Err(PatchError::EmptyPattern);
    }

    let occurrences = exact_occurrences(content, old);
    if !occurrences.is_empty() {
        let next = content.replace(old, new);
        if next == content {
            return Err(PatchError::NoEffectiveChange);
        }
        return Ok(EditOutcome {
            content: next,
            replacements: occurrences.len(),
            approximate: false,
        });
    }

    if !config.allow_approximate {
        let outcome = find_match(content, old, config);
        return Err(PatchError::no_match(outcome.closest, config.threshold));
    }

    let cap = content.split('\n').count() + 1;
    let mut current = content.to_string();
    let mut count = 0usize;

    for _ in 0..cap {
        let outcome = find_match(&current, old, config);
        let Some(chosen) = outcome.chosen else {
            if count == 0 {
                return Err(PatchError::no_match(outcome.closest, config.threshold));
            }
            break;
        };

        let next = splice(&current, &chosen, new);
        if next == current {
            if count == 0 {
                return Err(PatchError::NoEffectiveChange);
            }
            break;
        }
        current = next;
        count += 1;
    }

    if current == content {
        return Err(PatchError::NoEffectiveChange);
    }

    debug!(replacements = count, "replace-all completed");
    Ok(EditOutcome {
        content: current,
        replacements: count,
        approximate: true,
    })
}
