//! Structured word-list parser: turns extracted dictionary text into
//! ordered [`RawEntry`] rows, reporting lines it could not make sense of.
//!
//! Expected line shapes (separators tolerate long and short dashes):
//!
//! ```text
//! apple [ˈæp.əl] — a round fruit
//! banana - a long yellow fruit
//! cherry
//! ```

use lugat_types::RawEntry;

use crate::{ParseError, extract};

/// Parser output: ordered entries plus human-readable warnings. An input
/// that matches nothing yields zero entries and at least one warning.
#[derive(Debug, Clone, Default)]
pub struct ParsedList {
    pub entries: Vec<RawEntry>,
    pub warnings: Vec<String>,
}

/// Parse a dictionary PDF end to end. Warnings name the page the
/// offending line came from.
pub fn parse_pdf(pdf_bytes: &[u8]) -> Result<ParsedList, ParseError> {
    let doc = extract::extract_text(pdf_bytes)?;
    Ok(parse_with(&doc.text, |offset| Some(doc.page_of(offset))))
}

/// Parse already-extracted plain text.
pub fn parse_text(text: &str) -> ParsedList {
    parse_with(text, |_| None)
}

fn parse_with(text: &str, page_of: impl Fn(usize) -> Option<usize>) -> ParsedList {
    let mut list = ParsedList::default();
    let mut offset = 0;

    for (line_no, line) in text.lines().enumerate() {
        let line_offset = offset;
        offset += line.len() + 1;

        let line = line.trim();
        if line.is_empty() || is_page_furniture(line) {
            continue;
        }

        match parse_line(line) {
            Some(entry) => list.entries.push(entry),
            None => {
                if list.warnings.len() < 20 {
                    let location = match page_of(line_offset) {
                        Some(page) => format!("page {page}, line {}", line_no + 1),
                        None => format!("line {}", line_no + 1),
                    };
                    list.warnings
                        .push(format!("{location}: unrecognized entry: {line:?}"));
                }
            }
        }
    }

    if list.entries.is_empty() {
        list.warnings.push(
            "no recognizable word entries found; expected lines like \"word [ipa] — definition\""
                .to_string(),
        );
    } else {
        tracing::debug!(
            "Parsed {} entries ({} warnings)",
            list.entries.len(),
            list.warnings.len()
        );
    }

    list
}

/// Page numbers, section headers and similar non-entry lines.
fn is_page_furniture(line: &str) -> bool {
    line.chars().all(|c| c.is_ascii_digit())
        || (line.len() <= 3 && !line.chars().any(|c| c.is_alphabetic()))
}

fn parse_line(line: &str) -> Option<RawEntry> {
    let (head, definition) = split_definition(line);

    let (word, ipa) = split_ipa(head);
    let word = word.trim();

    if word.is_empty() || !word.chars().next()?.is_alphabetic() {
        return None;
    }

    Some(RawEntry {
        word: word.to_string(),
        ipa: ipa.map(str::trim).filter(|s| !s.is_empty()).map(String::from),
        definition: definition
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
        example: None,
    })
}

/// Split `word part — definition part` on the first dash-like separator.
fn split_definition(line: &str) -> (&str, Option<&str>) {
    for sep in [" — ", " – ", " - ", "\t"] {
        if let Some((head, tail)) = line.split_once(sep) {
            return (head, Some(tail));
        }
    }
    (line, None)
}

/// Pull a `[...]` or `/.../ ` transcription out of the head part.
fn split_ipa(head: &str) -> (&str, Option<&str>) {
    if let Some(open) = head.find('[')
        && let Some(close) = head[open..].find(']')
    {
        return (&head[..open], Some(&head[open + 1..open + close]));
    }
    if let Some(open) = head.find('/')
        && let Some(close) = head[open + 1..].find('/')
    {
        return (&head[..open], Some(&head[open + 1..open + 1 + close]));
    }
    (head, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_entry_line() {
        let list = parse_text("apple [ˈæp.əl] — a round fruit");
        assert_eq!(list.entries.len(), 1);
        let entry = &list.entries[0];
        assert_eq!(entry.word, "apple");
        assert_eq!(entry.ipa.as_deref(), Some("ˈæp.əl"));
        assert_eq!(entry.definition.as_deref(), Some("a round fruit"));
    }

    #[test]
    fn parses_bare_word_and_hyphen_variant() {
        let list = parse_text("cherry\nbanana - a long yellow fruit\n");
        assert_eq!(list.entries.len(), 2);
        assert_eq!(list.entries[0].word, "cherry");
        assert_eq!(list.entries[0].definition, None);
        assert_eq!(list.entries[1].definition.as_deref(), Some("a long yellow fruit"));
    }

    #[test]
    fn slash_transcription_is_recognized() {
        let list = parse_text("water /ˈwɔːtər/ — suv");
        assert_eq!(list.entries[0].ipa.as_deref(), Some("ˈwɔːtər"));
    }

    #[test]
    fn page_numbers_are_skipped_silently() {
        let list = parse_text("12\napple — olma\n345\n");
        assert_eq!(list.entries.len(), 1);
        assert!(list.warnings.is_empty());
    }

    #[test]
    fn unrecognized_lines_become_warnings() {
        let list = parse_text("apple — olma\n*** !!! ***\n");
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.warnings.len(), 1);
        assert!(list.warnings[0].contains("unrecognized"));
    }

    #[test]
    fn unusable_input_yields_zero_entries_with_reason() {
        let list = parse_text("1234\n5678\n");
        assert!(list.entries.is_empty());
        assert!(!list.warnings.is_empty());
    }

    #[test]
    fn warnings_carry_page_numbers_when_available() {
        let list = parse_with("apple — olma\n*** !!! ***\n", |offset| {
            Some(if offset == 0 { 1 } else { 2 })
        });
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.warnings.len(), 1);
        assert!(list.warnings[0].starts_with("page 2, line 2:"));
    }

    #[test]
    fn entries_keep_file_order() {
        let list = parse_text("alpha\nbeta\ngamma\n");
        let words: Vec<_> = list.entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, ["alpha", "beta", "gamma"]);
    }
}
