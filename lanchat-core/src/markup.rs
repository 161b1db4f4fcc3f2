//! Inline markup renderer.
//!
//! Converts the limited markup used by the script bodies into display
//! fragments: `**bold**` spans and hard line breaks. The split is a
//! single non-overlapping regex partition of the whole string, not a
//! recursive parser; unbalanced or empty markers fail the pattern and
//! fall through as literal text.

use lazy_static::lazy_static;
use regex::Regex;

/// One piece of rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Literal text, never spanning a line break.
    Text(String),
    /// Emphasized text with the `**` delimiters stripped.
    Bold(String),
    /// A hard line break between text fragments.
    Break,
}

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*[^*]+\*\*").unwrap();
}

/// Parse raw script text into an ordered fragment sequence.
///
/// Pure function: the same input always yields the same fragments.
/// Empty input yields no fragments; text without markers comes back as
/// a single [`Fragment::Text`].
pub fn parse(text: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    if text.is_empty() {
        return fragments;
    }

    let mut cursor = 0;
    for span in BOLD.find_iter(text) {
        push_literal(&mut fragments, &text[cursor..span.start()]);
        let inner = &span.as_str()[2..span.as_str().len() - 2];
        fragments.push(Fragment::Bold(inner.to_string()));
        cursor = span.end();
    }
    push_literal(&mut fragments, &text[cursor..]);

    fragments
}

/// Split a literal segment on line breaks, interleaving `Break`s.
fn push_literal(fragments: &mut Vec<Fragment>, segment: &str) {
    if segment.is_empty() {
        return;
    }
    for (i, line) in segment.split('\n').enumerate() {
        if i > 0 {
            fragments.push(Fragment::Break);
        }
        if !line.is_empty() {
            fragments.push(Fragment::Text(line.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_single_fragment() {
        assert_eq!(
            parse("just some words"),
            vec![Fragment::Text("just some words".to_string())]
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn bold_marker_is_stripped() {
        assert_eq!(parse("**LAN**"), vec![Fragment::Bold("LAN".to_string())]);
    }

    #[test]
    fn bold_inside_a_sentence() {
        assert_eq!(
            parse("the wire is called the **transmission medium**."),
            vec![
                Fragment::Text("the wire is called the ".to_string()),
                Fragment::Bold("transmission medium".to_string()),
                Fragment::Text(".".to_string()),
            ]
        );
    }

    #[test]
    fn line_break_splits_text() {
        assert_eq!(
            parse("line1\nline2"),
            vec![
                Fragment::Text("line1".to_string()),
                Fragment::Break,
                Fragment::Text("line2".to_string()),
            ]
        );
    }

    #[test]
    fn blank_line_becomes_two_breaks() {
        assert_eq!(
            parse("para1\n\npara2"),
            vec![
                Fragment::Text("para1".to_string()),
                Fragment::Break,
                Fragment::Break,
                Fragment::Text("para2".to_string()),
            ]
        );
    }

    #[test]
    fn unbalanced_markers_stay_literal() {
        assert_eq!(parse("**oops"), vec![Fragment::Text("**oops".to_string())]);
        assert_eq!(
            parse("no closing ** here* really"),
            vec![Fragment::Text("no closing ** here* really".to_string())]
        );
    }

    #[test]
    fn empty_bold_is_literal() {
        // `****` has no non-star interior, so the pattern never matches.
        assert_eq!(parse("****"), vec![Fragment::Text("****".to_string())]);
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "We'll add a **Network Interface Card**, or **NIC**.\nIt converts signals.";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn multiple_bold_spans_preserve_order() {
        assert_eq!(
            parse("a **Local Area Network**, or **LAN** for short"),
            vec![
                Fragment::Text("a ".to_string()),
                Fragment::Bold("Local Area Network".to_string()),
                Fragment::Text(", or ".to_string()),
                Fragment::Bold("LAN".to_string()),
                Fragment::Text(" for short".to_string()),
            ]
        );
    }
}
