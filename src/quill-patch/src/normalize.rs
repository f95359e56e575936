//! Document normalization: byte-order mark and line-ending handling.
//!
//! Matching operates on canonical, LF-terminated text. A [`Document`]
//! records what was stripped from the raw input so the mutated canonical
//! content can be restored to the file's original byte conventions.

/// The UTF-8 byte-order mark.
const BOM: char = '\u{FEFF}';

/// A single line terminator convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    Lf,
    Crlf,
}

impl Terminator {
    /// The literal terminator bytes.
    pub fn as_str(self) -> &'static str {
        match self {
            Terminator::Lf => "\n",
            Terminator::Crlf => "\r\n",
        }
    }
}

/// Detected line-ending convention of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// Every terminator is a bare LF (or the document has no terminators).
    Lf,
    /// Every terminator is CRLF.
    Crlf,
    /// Both conventions appear; `dominant` is the majority convention,
    /// which restoration uses so output is internally consistent even
    /// though the input was not. Ties restore as LF.
    Mixed { dominant: Terminator },
}

impl LineEnding {
    /// Classify the line endings of `text` by counting terminators.
    pub fn detect(text: &str) -> Self {
        let crlf = text.matches("\r\n").count();
        let total = text.matches('\n').count();
        let bare_lf = total - crlf;
        match (crlf, bare_lf) {
            (0, _) => LineEnding::Lf,
            (_, 0) => LineEnding::Crlf,
            _ if crlf > bare_lf => LineEnding::Mixed {
                dominant: Terminator::Crlf,
            },
            _ => LineEnding::Mixed {
                dominant: Terminator::Lf,
            },
        }
    }

    /// The terminator restoration should expand to.
    pub fn restore_as(self) -> Terminator {
        match self {
            LineEnding::Lf => Terminator::Lf,
            LineEnding::Crlf => Terminator::Crlf,
            LineEnding::Mixed { dominant } => dominant,
        }
    }
}

/// Convert all CRLF terminators to bare LF.
///
/// Stray CR bytes that are not part of a CRLF pair are content, not
/// terminators, and pass through untouched.
pub fn normalize_to_lf(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// A document split into canonical text plus the byte conventions needed
/// to reproduce the original file.
///
/// For uniform inputs, `doc.restore(doc.text())` reproduces the raw input
/// byte for byte. Mixed inputs restore to their dominant convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    bom: bool,
    ending: LineEnding,
}

impl Document {
    /// Normalize raw file content. Total over any string; an empty file
    /// is valid input.
    pub fn parse(raw: &str) -> Self {
        let (body, bom) = match raw.strip_prefix(BOM) {
            Some(stripped) => (stripped, true),
            None => (raw, false),
        };
        let ending = LineEnding::detect(body);
        Document {
            text: normalize_to_lf(body),
            bom,
            ending,
        }
    }

    /// Canonical LF-terminated content used for matching.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the raw input carried a byte-order mark.
    pub fn bom(&self) -> bool {
        self.bom
    }

    /// The detected line-ending convention.
    pub fn ending(&self) -> LineEnding {
        self.ending
    }

    /// Re-apply the recorded marker and line-ending convention to
    /// (possibly mutated) canonical content.
    pub fn restore(&self, canonical: &str) -> String {
        let body = match self.ending.restore_as() {
            Terminator::Lf => canonical.to_string(),
            Terminator::Crlf => canonical.replace('\n', "\r\n"),
        };
        if self.bom {
            format!("{BOM}{body}")
        } else {
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_uniform_endings() {
        assert_eq!(LineEnding::detect("a\nb\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb\r\n"), LineEnding::Crlf);
        assert_eq!(LineEnding::detect("no terminators"), LineEnding::Lf);
        assert_eq!(LineEnding::detect(""), LineEnding::Lf);
    }

    #[test]
    fn detects_mixed_with_dominant() {
        assert_eq!(
            LineEnding::detect("a\r\nb\r\nc\n"),
            LineEnding::Mixed {
                dominant: Terminator::Crlf
            }
        );
        assert_eq!(
            LineEnding::detect("a\nb\nc\r\n"),
            LineEnding::Mixed {
                dominant: Terminator::Lf
            }
        );
        // Ties restore as LF.
        assert_eq!(
            LineEnding::detect("a\r\nb\n"),
            LineEnding::Mixed {
                dominant: Terminator::Lf
            }
        );
    }

    #[test]
    fn round_trips_uniform_lf() {
        let raw = "alpha\nbeta\ngamma\n";
        let doc = Document::parse(raw);
        assert_eq!(doc.restore(doc.text()), raw);
    }

    #[test]
    fn round_trips_uniform_crlf() {
        let raw = "alpha\r\nbeta\r\ngamma\r\n";
        let doc = Document::parse(raw);
        assert_eq!(doc.text(), "alpha\nbeta\ngamma\n");
        assert_eq!(doc.restore(doc.text()), raw);
    }

    #[test]
    fn round_trips_bom() {
        let raw = "\u{FEFF}alpha\r\nbeta\r\n";
        let doc = Document::parse(raw);
        assert!(doc.bom());
        assert!(!doc.text().starts_with('\u{FEFF}'));
        assert_eq!(doc.restore(doc.text()), raw);
    }

    #[test]
    fn bom_is_never_duplicated() {
        let doc = Document::parse("\u{FEFF}x\n");
        let restored = doc.restore(doc.text());
        assert_eq!(restored.matches('\u{FEFF}').count(), 1);
    }

    #[test]
    fn mixed_input_restores_to_dominant_convention() {
        let raw = "a\r\nb\r\nc\n";
        let doc = Document::parse(raw);
        assert_eq!(doc.restore(doc.text()), "a\r\nb\r\nc\r\n");
    }

    #[test]
    fn empty_input_is_valid() {
        let doc = Document::parse("");
        assert_eq!(doc.text(), "");
        assert_eq!(doc.restore(""), "");
        assert!(!doc.bom());
    }

    #[test]
    fn stray_cr_is_content() {
        let raw = "a\rb\n";
        let doc = Document::parse(raw);
        assert_eq!(doc.text(), "a\rb\n");
        assert_eq!(doc.restore(doc.text()), raw);
    }
}
