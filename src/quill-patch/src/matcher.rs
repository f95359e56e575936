//! Exact and approximate fragment matching.
//!
//! The exact pass enumerates non-overlapping occurrences of the search
//! fragment. The approximate pass slides line windows close to the
//! fragment's line count and scores each span against the fragment after
//! collapsing whitespace runs, so indentation and spacing drift is
//! tolerated but content differences are not.

use std::cmp::Ordering;

use similar::{ChangeTag, TextDiff};
use tracing::debug;

/// Tuning for the match engine.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Whether to run the approximate pass when no exact occurrence exists.
    pub allow_approximate: bool,
    /// Minimum similarity for an approximate candidate to be chosen.
    /// High by default: approximate matching tolerates formatting drift,
    /// not semantic drift.
    pub threshold: f64,
    /// How many lines a candidate span may be shorter or longer than the
    /// fragment, to absorb leading/trailing whitespace lines.
    pub window_tolerance: usize,
    /// Candidates scoring at least this much are retained for diagnostics.
    pub candidate_floor: f64,
    /// Upper bound on retained diagnostic candidates.
    pub max_candidates: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            allow_approximate: true,
            threshold: 0.9,
            window_tolerance: 1,
            candidate_floor: 0.5,
            max_candidates: 8,
        }
    }
}

/// How a candidate was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Approximate,
}

/// A located span with its similarity score.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    /// Byte offset of the span start in the content.
    pub start: usize,
    /// Byte length of the span.
    pub len: usize,
    /// The literal matched substring.
    pub text: String,
    /// Similarity in [0, 1]; exact matches are always 1.0.
    pub confidence: f64,
    pub kind: MatchKind,
}

/// Outcome of a match query.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// The unique qualifying match, when one exists.
    pub chosen: Option<MatchCandidate>,
    /// Count of exact occurrences in the full document, for uniqueness
    /// enforcement by the caller.
    pub exact_count: usize,
    /// Best-scoring span even if below threshold; error reporting only.
    pub closest: Option<MatchCandidate>,
    /// Approximate candidates at or above the diagnostic floor, bounded
    /// by `max_candidates`, best first.
    pub candidates: Vec<MatchCandidate>,
}

/// Find the search fragment in `content`.
///
/// Exactly one exact occurrence wins outright. Multiple exact occurrences
/// yield no chosen match and a populated `exact_count` so the caller can
/// decide between erroring (single mode) and a global replacement (all
/// mode). With zero exact occurrences the approximate pass runs when
/// allowed; ties on score break to the leftmost start offset.
pub fn find_match(content: &str, fragment: &str, config: &MatchConfig) -> MatchOutcome {
    let exact = exact_occurrences(content, fragment);
    match exact.len() {
        1 => MatchOutcome {
            chosen: Some(MatchCandidate {
                start: exact[0],
                len: fragment.len(),
                text: fragment.to_string(),
                confidence: 1.0,
                kind: MatchKind::Exact,
            }),
            exact_count: 1,
            ..MatchOutcome::default()
        },
        0 if config.allow_approximate => approximate_scan(content, fragment, config),
        count => MatchOutcome {
            exact_count: count,
            ..MatchOutcome::default()
        },
    }
}

/// Start offsets of all non-overlapping exact occurrences, left to right.
pub(crate) fn exact_occurrences(content: &str, fragment: &str) -> Vec<usize> {
    if fragment.is_empty() {
        return Vec::new();
    }
    let mut starts = Vec::new();
    let mut from = 0;
    while let Some(pos) = content[from..].find(fragment) {
        let start = from + pos;
        starts.push(start);
        from = start + fragment.len();
    }
    starts
}

fn approximate_scan(content: &str, fragment: &str, config: &MatchConfig) -> MatchOutcome {
    let spans = line_spans(content);
    let needle = fragment.strip_suffix('\n').unwrap_or(fragment);
    let needle_normalized = collapse_whitespace(needle);
    let needle_lines = needle.matches('\n').count() + 1;
    let keep_terminator = fragment.ends_with('\n');

    let min_window = needle_lines.saturating_sub(config.window_tolerance).max(1);
    let max_window = needle_lines + config.window_tolerance;

    let mut best: Option<MatchCandidate> = None;
    let mut candidates: Vec<MatchCandidate> = Vec::new();

    for width in min_window..=max_window {
        if width > spans.len() {
            break;
        }
        for first in 0..=spans.len() - width {
            let start = spans[first].0;
            let mut end = spans[first + width - 1].1;
            if keep_terminator && end < content.len() && content.as_bytes()[end] == b'\n' {
                end += 1;
            }
            let span_text = &content[start..end];
            let confidence =
                text_similarity(&needle_normalized, &collapse_whitespace(span_text));
            let candidate = MatchCandidate {
                start,
                len: end - start,
                text: span_text.to_string(),
                confidence,
                kind: MatchKind::Approximate,
            };
            if best
                .as_ref()
                .is_none_or(|b| candidate.confidence > b.confidence)
            {
                best = Some(candidate.clone());
            }
            if confidence >= config.candidate_floor {
                push_bounded(&mut candidates, candidate, config.max_candidates);
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then(a.start.cmp(&b.start))
    });

    let chosen = best
        .as_ref()
        .filter(|b| b.confidence >= config.threshold)
        .cloned();
    if let Some(candidate) = &chosen {
        debug!(
            start = candidate.start,
            confidence = candidate.confidence,
            "approximate match selected"
        );
    }

    MatchOutcome {
        chosen,
        exact_count: 0,
        closest: best,
        candidates,
    }
}

/// Byte spans of each line, excluding the trailing terminator.
fn line_spans(content: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (idx, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            spans.push((start, idx));
            start = idx + 1;
        }
    }
    if start < content.len() {
        spans.push((start, content.len()));
    }
    spans
}

/// Collapse every whitespace run to a single separator.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Character-level similarity in [0, 1] via diff.
fn text_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let diff = TextDiff::from_chars(a, b);
    let mut same = 0usize;
    let mut total = 0usize;
    for change in diff.iter_all_changes() {
        total += 1;
        if change.tag() == ChangeTag::Equal {
            same += 1;
        }
    }

    if total == 0 {
        1.0
    } else {
        same as f64 / total as f64
    }
}

/// Insert keeping at most `cap` entries, evicting the lowest-scoring one.
fn push_bounded(candidates: &mut Vec<MatchCandidate>, candidate: MatchCandidate, cap: usize) {
    if cap == 0 {
        return;
    }
    if candidates.len() < cap {
        candidates.push(candidate);
        return;
    }
    let worst = candidates
        .iter()
        .enumerate()
        .min_by(|a, b| {
            a.1.confidence
                .partial_cmp(&b.1.confidence)
                .unwrap_or(Ordering::Equal)
        })
        .map(|(idx, c)| (idx, c.confidence));
    if let Some((idx, score)) = worst
        && candidate.confidence > score
    {
        candidates[idx] = candidate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_exact_occurrence_is_chosen() {
        let outcome = find_match("a\nb\nc\n", "b", &MatchConfig::default());
        let chosen = outcome.chosen.expect("match");
        assert_eq!(chosen.start, 2);
        assert_eq!(chosen.confidence, 1.0);
        assert_eq!(chosen.kind, MatchKind::Exact);
        assert_eq!(outcome.exact_count, 1);
    }

    #[test]
    fn duplicate_exact_occurrences_report_count() {
        let outcome = find_match("x=1\nx=1\n", "x=1", &MatchConfig::default());
        assert!(outcome.chosen.is_none());
        assert_eq!(outcome.exact_count, 2);
    }

    #[test]
    fn exact_occurrences_do_not_overlap() {
        assert_eq!(exact_occurrences("aaaa", "aa"), vec![0, 2]);
    }

    #[test]
    fn whitespace_drift_matches_above_threshold() {
        let outcome = find_match("function foo() {\n", "function foo(){", &MatchConfig::default());
        let chosen = outcome.chosen.expect("approximate match");
        assert_eq!(chosen.kind, MatchKind::Approximate);
        assert_eq!(chosen.text, "function foo() {");
        assert!(chosen.confidence >= 0.9);
    }

    #[test]
    fn different_identifiers_never_match() {
        let outcome = find_match("function foo() {\n", "function bar(){", &MatchConfig::default());
        assert!(outcome.chosen.is_none());
        let closest = outcome.closest.expect("closest candidate on non-empty doc");
        assert!(closest.confidence < 0.9);
    }

    #[test]
    fn indentation_drift_matches_multiline_fragment() {
        let content = "    fn run() {\n        go();\n    }\n";
        let fragment = "fn run() {\n    go();\n}";
        let outcome = find_match(content, fragment, &MatchConfig::default());
        let chosen = outcome.chosen.expect("approximate match");
        assert_eq!(chosen.text, "    fn run() {\n        go();\n    }");
    }

    #[test]
    fn window_tolerance_absorbs_blank_lines() {
        let content = "alpha\n\nbeta\n";
        let outcome = find_match(content, "alpha\nbeta", &MatchConfig::default());
        let chosen = outcome.chosen.expect("match across blank line");
        assert_eq!(chosen.text, "alpha\n\nbeta");
    }

    #[test]
    fn score_ties_break_leftmost() {
        let content = "let value = compute( 1 );\nbar\nlet value = compute( 1 );\n";
        let outcome = find_match(content, "let value = compute(1);", &MatchConfig::default());
        let chosen = outcome.chosen.expect("match");
        assert_eq!(chosen.start, 0);
    }

    #[test]
    fn candidate_list_is_bounded() {
        let config = MatchConfig {
            max_candidates: 2,
            ..MatchConfig::default()
        };
        let content = "item (1)\nitem (2)\nitem (3)\nitem (4)\n";
        let outcome = find_match(content, "item(9)", &config);
        assert!(outcome.candidates.len() <= 2);
        assert!(outcome.closest.is_some());
    }

    #[test]
    fn candidates_are_sorted_best_first() {
        let content = "item (1)\nunrelated text here\nitem(2)x\n";
        let outcome = find_match(content, "item(1)", &MatchConfig::default());
        for pair in outcome.candidates.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn empty_content_has_no_closest() {
        let outcome = find_match("", "anything", &MatchConfig::default());
        assert!(outcome.chosen.is_none());
        assert!(outcome.closest.is_none());
    }

    #[test]
    fn approximate_pass_can_be_disabled() {
        let config = MatchConfig {
            allow_approximate: false,
            ..MatchConfig::default()
        };
        let outcome = find_match("function foo() {\n", "function foo(){", &config);
        assert!(outcome.chosen.is_none());
        assert!(outcome.closest.is_none());
    }

    #[test]
    fn trailing_terminator_in_fragment_extends_span() {
        let content = "a\nkeep me\nb\n";
        let outcome = find_match(content, "keep  me\n", &MatchConfig::default());
        let chosen = outcome.chosen.expect("match");
        assert_eq!(&content[chosen.start..chosen.start + chosen.len], "keep me\n");
    }
}
