//! Line tokenizer for the `<level> [<@xref@>] <TAG> [<value>]` grammar.
//!
//! # Invariants
//! - Lines that do not match the grammar are skipped, never reported.
//! - `xref` keeps its `@` delimiters so callers can use it as a map key.
//! - `value` is the remainder after the tag, trimmed; it may be empty.

use once_cell::sync::Lazy;
use regex::Regex;

static GEDCOM_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s+(@[^@]+@)?\s*([A-Za-z0-9_]+)(.*)$").expect("valid gedcom line regex")
});

const UTF8_BOM: char = '\u{feff}';

/// One tokenized GEDCOM line, borrowing from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GedcomLine<'a> {
    pub level: u32,
    pub xref: Option<&'a str>,
    pub tag: &'a str,
    pub value: &'a str,
}

/// Tokenizes a single line. Returns `None` when the line does not match.
pub fn tokenize_line(line: &str) -> Option<GedcomLine<'_>> {
    let caps = GEDCOM_LINE_RE.captures(line)?;
    // Levels too large for u32 are noise, not data.
    let level = caps.get(1)?.as_str().parse::<u32>().ok()?;
    Some(GedcomLine {
        level,
        xref: caps.get(2).map(|m| m.as_str()),
        tag: caps.get(3)?.as_str(),
        value: caps.get(4).map_or("", |m| m.as_str().trim()),
    })
}

/// Lazily tokenizes GEDCOM text with LF or CRLF line endings.
pub fn tokenize(text: &str) -> Tokenizer<'_> {
    Tokenizer::new(text)
}

/// Iterator over the matching lines of one GEDCOM text.
///
/// Tracks how many lines were skipped so callers can report it.
pub struct Tokenizer<'a> {
    lines: std::str::Lines<'a>,
    skipped: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.strip_prefix(UTF8_BOM).unwrap_or(text).lines(),
            skipped: 0,
        }
    }

    /// Number of lines skipped so far, blank lines included.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = GedcomLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            match tokenize_line(line) {
                Some(token) => return Some(token),
                None => self.skipped += 1,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{tokenize, tokenize_line, GedcomLine};

    #[test]
    fn tokenizes_record_header_with_xref() {
        let line = tokenize_line("0 @I1@ INDI").expect("header should match");
        assert_eq!(
            line,
            GedcomLine {
                level: 0,
                xref: Some("@I1@"),
                tag: "INDI",
                value: "",
            }
        );
    }

    #[test]
    fn tokenizes_value_and_trims_it() {
        let line = tokenize_line("1 NAME   John /Smith/  ").expect("name should match");
        assert_eq!(line.level, 1);
        assert_eq!(line.xref, None);
        assert_eq!(line.tag, "NAME");
        assert_eq!(line.value, "John /Smith/");
    }

    #[test]
    fn pointer_values_are_not_mistaken_for_xrefs() {
        let line = tokenize_line("1 HUSB @I1@").expect("pointer line should match");
        assert_eq!(line.xref, None);
        assert_eq!(line.tag, "HUSB");
        assert_eq!(line.value, "@I1@");
    }

    #[test]
    fn rejects_lines_outside_the_grammar() {
        assert!(tokenize_line("").is_none());
        assert!(tokenize_line("NAME John").is_none());
        assert!(tokenize_line("x 1 NAME").is_none());
        assert!(tokenize_line("99999999999 NAME John").is_none());
    }

    #[test]
    fn handles_crlf_bom_and_counts_skipped_lines() {
        let text = "\u{feff}0 HEAD\r\n\r\ngarbage\r\n1 CHAR UTF-8\r\n";
        let mut tokens = tokenize(text);
        let collected: Vec<_> = tokens.by_ref().collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].tag, "HEAD");
        assert_eq!(collected[1].value, "UTF-8");
        assert_eq!(tokens.skipped(), 2);
    }
}
