//! Line-oriented diff rendering.
//!
//! Produces a unified-style listing with per-line numbers, removed lines
//! prefixed `-`, added lines prefixed `+`, and a bounded amount of
//! surrounding context with `...` elision between distant changes. The
//! format is an internal convention for human review, not a byte-exact
//! external standard.

use similar::{ChangeTag, TextDiff};

/// Context lines kept around each change.
const CONTEXT_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Equal,
    Added,
    Removed,
}

#[derive(Debug)]
struct Run {
    tag: Tag,
    lines: Vec<String>,
}

/// Render a line diff between two canonical texts.
///
/// Returns the diff listing and the 1-indexed number of the first line at
/// which the two sequences diverge (`None` when the texts are equal).
pub fn render_diff(before: &str, after: &str) -> (String, Option<usize>) {
    let runs = collect_runs(before, after);

    let old_total = before.split('\n').count();
    let new_total = after.split('\n').count();
    let width = old_total.max(new_total).max(1).to_string().len();

    let mut output: Vec<String> = Vec::new();
    let mut old_line = 1usize;
    let mut new_line = 1usize;
    let mut first_changed: Option<usize> = None;
    let mut last_was_change = false;

    for (i, run) in runs.iter().enumerate() {
        match run.tag {
            Tag::Added | Tag::Removed => {
                if first_changed.is_none() {
                    first_changed = Some(new_line);
                }
                for line in &run.lines {
                    match run.tag {
                        Tag::Added => {
                            output.push(format!("+{new_line:>width$} {line}"));
                            new_line += 1;
                        }
                        Tag::Removed => {
                            output.push(format!("-{old_line:>width$} {line}"));
                            old_line += 1;
                        }
                        Tag::Equal => {}
                    }
                }
                last_was_change = true;
            }
            Tag::Equal => {
                let next_is_change = runs
                    .get(i + 1)
                    .is_some_and(|r| matches!(r.tag, Tag::Added | Tag::Removed));

                if !last_was_change && !next_is_change {
                    old_line += run.lines.len();
                    new_line += run.lines.len();
                    continue;
                }

                let mut shown: &[String] = &run.lines;
                let mut skip_start = 0usize;
                let mut skip_end = 0usize;

                // Leading context only matters ahead of the next change;
                // trailing context only after the previous one.
                if !last_was_change {
                    skip_start = run.lines.len().saturating_sub(CONTEXT_LINES);
                    shown = &run.lines[skip_start..];
                }
                if !next_is_change && shown.len() > CONTEXT_LINES {
                    skip_end = shown.len() - CONTEXT_LINES;
                    shown = &shown[..CONTEXT_LINES];
                }
                if last_was_change && next_is_change && shown.len() > 2 * CONTEXT_LINES {
                    // Change on both sides: keep context for each and
                    // elide the middle.
                    let tail_start = shown.len() - CONTEXT_LINES;
                    let head = &run.lines[..CONTEXT_LINES];
                    for line in head {
                        output.push(format!(" {old_line:>width$} {line}"));
                        old_line += 1;
                        new_line += 1;
                    }
                    let elided = tail_start - CONTEXT_LINES;
                    output.push(format!(" {} ...", " ".repeat(width)));
                    old_line += elided;
                    new_line += elided;
                    for line in &run.lines[tail_start..] {
                        output.push(format!(" {old_line:>width$} {line}"));
                        old_line += 1;
                        new_line += 1;
                    }
                    last_was_change = false;
                    continue;
                }

                if skip_start > 0 {
                    output.push(format!(" {} ...", " ".repeat(width)));
                    old_line += skip_start;
                    new_line += skip_start;
                }
                for line in shown {
                    output.push(format!(" {old_line:>width$} {line}"));
                    old_line += 1;
                    new_line += 1;
                }
                if skip_end > 0 {
                    output.push(format!(" {} ...", " ".repeat(width)));
                    old_line += skip_end;
                    new_line += skip_end;
                }
                last_was_change = false;
            }
        }
    }

    (output.join("\n"), first_changed)
}

/// Group the line diff into runs of consecutive equal/added/removed lines.
fn collect_runs(before: &str, after: &str) -> Vec<Run> {
    let diff = TextDiff::from_lines(before, after);
    let mut runs: Vec<Run> = Vec::new();

    for change in diff.iter_all_changes() {
        let tag = match change.tag() {
            ChangeTag::Equal => Tag::Equal,
            ChangeTag::Insert => Tag::Added,
            ChangeTag::Delete => Tag::Removed,
        };
        let line = change.value().strip_suffix('\n').unwrap_or(change.value());

        match runs.last_mut() {
            Some(run) if run.tag == tag => run.lines.push(line.to_string()),
            _ => runs.push(Run {
                tag,
                lines: vec![line.to_string()],
            }),
        }
    }

    runs
}
