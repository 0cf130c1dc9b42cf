//! Restricted inline markup helpers.
//!
//! The dataset only permits `<b>` in descriptions and `<i>` in sources, and
//! neither tag nests or overlaps. That precondition is what makes plain
//! pattern matching sufficient here; the balance check in the markup pass
//! keeps it true.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

pub const BOLD_OPEN: &str = "<b>";
pub const BOLD_CLOSE: &str = "</b>";
pub const ITALIC_OPEN: &str = "<i>";
pub const ITALIC_CLOSE: &str = "</i>";

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid tag regex"));

static BOLD_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<b>(.*?)</b>").expect("Invalid bold span regex"));

static ITALIC_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<i>(.*?)</i>").expect("Invalid italic span regex"));

/// Remove every tag, keeping the text between tags.
pub fn strip_tags(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}

/// Every tag in order of appearance, with its byte range.
pub fn tags(text: &str) -> impl Iterator<Item = (Range<usize>, &str)> {
    TAG_REGEX.find_iter(text).map(|m| (m.range(), m.as_str()))
}

/// A matched `<b>…</b>` or `<i>…</i>` span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    /// Byte range of the whole span, tags included.
    pub range: Range<usize>,
    /// Text between the opening and closing tag.
    pub content: &'a str,
}

fn spans<'a>(regex: &Regex, text: &'a str) -> Vec<Span<'a>> {
    regex
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let content = caps.get(1)?;
            Some(Span {
                range: whole.range(),
                content: content.as_str(),
            })
        })
        .collect()
}

pub fn bold_spans(text: &str) -> Vec<Span<'_>> {
    spans(&BOLD_SPAN_REGEX, text)
}

pub fn italic_spans(text: &str) -> Vec<Span<'_>> {
    spans(&ITALIC_SPAN_REGEX, text)
}

/// Text with every bold span removed.
pub fn outside_bold(text: &str) -> String {
    BOLD_SPAN_REGEX.replace_all(text, "").into_owned()
}

/// Text with every italic span removed.
pub fn outside_italic(text: &str) -> String {
    ITALIC_SPAN_REGEX.replace_all(text, "").into_owned()
}

/// First tag that breaks pairing of `open`/`close`: a nested open, a close
/// without an open, or an open left unclosed at the end.
pub fn unbalanced_tag<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let mut pending: Option<&'a str> = None;
    for (_, tag) in tags(text) {
        if tag == open {
            if pending.is_some() {
                return Some(tag);
            }
            pending = Some(tag);
        } else if tag == close && pending.take().is_none() {
            return Some(tag);
        }
    }
    pending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("Deals <b>2^level</b> damage"), "Deals 2^level damage");
        assert_eq!(strip_tags("From <i>Blight</i>"), "From Blight");
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn test_bold_spans_and_outside() {
        let text = "Heals <b>1 ❤</b> every <b>5 seconds</b>.";
        let spans = bold_spans(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "1 ❤");
        assert_eq!(spans[1].content, "5 seconds");
        assert_eq!(&text[spans[1].range.clone()], "<b>5 seconds</b>");
        assert_eq!(outside_bold(text), "Heals  every .");
    }

    #[test]
    fn test_italic_spans() {
        let text = "Dropped in <i>Blight</i> and <i>Alex's Mobs</i> biomes";
        let contents: Vec<_> = italic_spans(text).into_iter().map(|s| s.content).collect();
        assert_eq!(contents, vec!["Blight", "Alex's Mobs"]);
        assert_eq!(outside_italic(text), "Dropped in  and  biomes");
    }

    #[test]
    fn test_unbalanced_tag() {
        assert_eq!(unbalanced_tag("<b>a</b> <b>b</b>", BOLD_OPEN, BOLD_CLOSE), None);
        assert_eq!(unbalanced_tag("<b>a <b>b</b>", BOLD_OPEN, BOLD_CLOSE), Some("<b>"));
        assert_eq!(unbalanced_tag("a</b>", BOLD_OPEN, BOLD_CLOSE), Some("</b>"));
        assert_eq!(unbalanced_tag("<b>open", BOLD_OPEN, BOLD_CLOSE), Some("<b>"));
        assert_eq!(unbalanced_tag("<i>x</i>", BOLD_OPEN, BOLD_CLOSE), None);
    }
}
