//! Text truncation utilities.
//!
//! Centralized truncation used by error messages and log lines so callers
//! never dump multi-kilobyte fragments into user-facing output.

use std::borrow::Cow;

/// Truncates a string to a maximum character count, adding ellipsis if
/// truncation occurred.
///
/// # Examples
/// ```
/// use quill_common::truncate::truncate_for_display;
///
/// assert_eq!(truncate_for_display("hello", 10), "hello");
/// assert_eq!(truncate_for_display("hello world", 8), "hello...");
/// ```
pub fn truncate_for_display(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_len {
        Cow::Borrowed(s)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        Cow::Owned(format!("{}...", truncated))
    }
}

/// Truncates text to its first line, then to `max_len` characters.
///
/// Useful when quoting a multi-line search fragment in a single log line.
pub fn truncate_first_line(text: &str, max_len: usize) -> Cow<'_, str> {
    let first_line = text.lines().next().unwrap_or(text);
    truncate_for_display(first_line, max_len)
}
