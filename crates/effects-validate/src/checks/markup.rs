//! Restricted-markup checks for `description` and `source`.
//!
//! `description` may only use `<b>`, plus two fixed italic placeholders.
//! `source` may only use `<i>`, and only around origin names. Formula
//! markers, time units, and the plus sign must sit inside bold spans.

use std::sync::LazyLock;

use effects_model::{EffectRecord, Field, MaxLevel};
use regex::Regex;

use crate::issue::{Issue, MarkupMisuse};
use crate::markup::{
    BOLD_CLOSE, BOLD_OPEN, ITALIC_CLOSE, ITALIC_OPEN, Span, bold_spans, italic_spans,
    outside_bold, strip_tags, tags, unbalanced_tag,
};
use crate::rules::RuleSet;

/// Italic phrases a description may consist of while undocumented.
pub const DESCRIPTION_PLACEHOLDERS: &[&str] = &["<i>Not yet documented</i>", "<i>Unavailable</i>"];

pub const EXPONENT_MARKER: &str = "^level";
pub const MULTIPLIER_MARKER: &str = "× level";
const PLUS_SIGN: &str = "+";

/// Time-unit forms accepted after a formula marker.
const TIME_UNIT_SUFFIXES: &[&str] = &["", " second", " seconds", " second(s)"];

/// Creature and item names that get italicized as if they were mods.
const NON_ORIGIN_NAMES: &[&str] = &[
    "Wither",
    "Ender Dragon",
    "Elder Guardian",
    "Warden",
    "Spider",
    "Cave Spider",
    "Husk",
    "Stray",
    "Bogged",
    "Shulker",
    "Bee",
    "Pufferfish",
    "Golden Apple",
    "Enchanted Golden Apple",
    "Suspicious Stew",
    "Honey Bottle",
    "Milk Bucket",
    "Beacon",
    "Conduit",
    "Totem of Undying",
];

/// Action vocabulary that never appears in an origin name.
const DESCRIPTIVE_WORDS: &[&str] = &[
    "attack",
    "attacks",
    "hit",
    "hits",
    "melee",
    "bite",
    "sting",
    "shot",
    "projectile",
    "strike",
    "strikes",
    "weapon",
    "arrow",
    "arrows",
    "eating",
    "drinking",
];

/// Words after "level" that make it something other than the effect level.
const PREPOSITIONS: &[&str] = &["of", "to", "in", "at", "on", "for", "from", "by", "with"];

static TIME_UNIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bsecond(?:\(s\)|s\b|\b)").expect("Invalid time unit regex")
});

static LEVEL_COMPOUND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:hunger|water|light|oxygen|experience|food|saturation|air|enchantment) level\b",
    )
    .expect("Invalid level compound regex")
});

static LEVEL_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\blevel\b").expect("Invalid level regex"));

static LEVEL_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\blevel\b(?:\s+([a-z]+))?").expect("Invalid level reference regex")
});

/// Run every markup rule over every record.
pub fn check(records: &[EffectRecord], rules: &RuleSet) -> Vec<Issue> {
    let mut issues = Vec::new();

    for record in records {
        let effect = record.display_name();
        let description = record.description_str();
        let source = record.source_str();

        if let Some(tag) = disallowed_description_tag(description) {
            issues.push(Issue::DisallowedMarkup {
                effect: effect.to_string(),
                field: Field::Description,
                tag,
            });
        }
        if let Some(tag) = disallowed_tag(source, ITALIC_OPEN, ITALIC_CLOSE) {
            issues.push(Issue::DisallowedMarkup {
                effect: effect.to_string(),
                field: Field::Source,
                tag,
            });
        }

        for span in italic_spans(source) {
            if let Some(misuse) = origin_misuse(span.content) {
                issues.push(Issue::MisusedMarkup {
                    effect: effect.to_string(),
                    content: span.content.to_string(),
                    misuse,
                });
            }
        }

        for token in unwrapped_tokens(description) {
            issues.push(Issue::UnwrappedSignificantText {
                effect: effect.to_string(),
                token,
            });
        }

        for span in bold_spans(description) {
            if let Some(marker) = malformed_formula(description, &span) {
                issues.push(Issue::MalformedFormulaSpan {
                    effect: effect.to_string(),
                    marker: marker.to_string(),
                    span: span.content.to_string(),
                });
            }
        }

        if record.level() == Some(MaxLevel::I)
            && let Some(phrase) = level_reference(description)
        {
            issues.push(Issue::InconsistentLevelReference {
                effect: effect.to_string(),
                phrase,
            });
        }

        if let Some(max) = rules.description_max_chars {
            let length = strip_tags(description.trim()).chars().count();
            if length > max {
                issues.push(Issue::DescriptionTooLong {
                    effect: effect.to_string(),
                    length,
                    max,
                });
            }
        }
    }

    issues
}

fn disallowed_description_tag(description: &str) -> Option<String> {
    let mut text = description.to_string();
    for placeholder in DESCRIPTION_PLACEHOLDERS {
        text = text.replace(placeholder, "");
    }
    disallowed_tag(&text, BOLD_OPEN, BOLD_CLOSE)
}

/// First tag outside the `open`/`close` pair, or the first tag breaking
/// their pairing.
fn disallowed_tag(text: &str, open: &str, close: &str) -> Option<String> {
    if let Some((_, tag)) = tags(text).find(|(_, tag)| *tag != open && *tag != close) {
        return Some(tag.to_string());
    }
    unbalanced_tag(text, open, close).map(str::to_string)
}

/// Why an italic span is not an origin name, if it is not.
fn origin_misuse(content: &str) -> Option<MarkupMisuse> {
    let name = content.trim();
    if NON_ORIGIN_NAMES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(name))
    {
        return Some(MarkupMisuse::NonOriginName);
    }
    name.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .find(|word| DESCRIPTIVE_WORDS.contains(&word.as_str()))
        .map(|word| MarkupMisuse::DescriptiveWord { word })
}

/// Significant tokens found outside bold spans, in rule order.
fn unwrapped_tokens(description: &str) -> Vec<String> {
    let outside = outside_bold(description);
    let mut tokens = Vec::new();
    for marker in [EXPONENT_MARKER, MULTIPLIER_MARKER] {
        if outside.contains(marker) {
            tokens.push(marker.to_string());
        }
    }
    if let Some(unit) = TIME_UNIT_REGEX.find(&outside) {
        tokens.push(unit.as_str().to_string());
    }
    if outside.contains(PLUS_SIGN) {
        tokens.push(PLUS_SIGN.to_string());
    }
    tokens
}

/// Marker of a bold span whose formula is not its closing element.
///
/// The span text must end with the marker, optionally followed by a time
/// unit, and the span itself must close its clause: only punctuation or the
/// end of the description may follow it. A span holding the exponent marker
/// is judged on that marker alone.
fn malformed_formula(description: &str, span: &Span<'_>) -> Option<&'static str> {
    let marker = if span.content.contains(EXPONENT_MARKER) {
        EXPONENT_MARKER
    } else if span.content.contains(MULTIPLIER_MARKER) {
        MULTIPLIER_MARKER
    } else {
        return None;
    };

    let ends_with_marker = TIME_UNIT_SUFFIXES
        .iter()
        .any(|suffix| span.content.ends_with(&format!("{marker}{suffix}")));
    let closes_clause = description[span.range.end..]
        .trim_start()
        .chars()
        .next()
        .is_none_or(|c| matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | ')'));

    (!ends_with_marker || !closes_clause).then_some(marker)
}

/// First effect-level reference in the description of a non-scaling effect.
fn level_reference(description: &str) -> Option<String> {
    if description.to_lowercase().contains("higher level") {
        return Some("higher level".to_string());
    }

    let scrubbed = LEVEL_COMPOUND_REGEX.replace_all(description, "");
    if let Some(span) = bold_spans(&scrubbed)
        .into_iter()
        .find(|span| LEVEL_WORD_REGEX.is_match(span.content))
    {
        return Some(format!("<b>{}</b>", span.content));
    }

    let plain = strip_tags(&outside_bold(&scrubbed));
    LEVEL_REFERENCE_REGEX.captures_iter(&plain).find_map(|caps| {
        let following = caps.get(1).map(|m| m.as_str().to_lowercase());
        match following {
            Some(word) if PREPOSITIONS.contains(&word.as_str()) => None,
            _ => caps.get(0).map(|m| m.as_str().to_string()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_allowed_in_description() {
        assert_eq!(disallowed_description_tag("<i>Not yet documented</i>"), None);
        assert_eq!(disallowed_description_tag("<i>Unavailable</i>"), None);
        assert_eq!(
            disallowed_description_tag("<i>Unknown</i>"),
            Some("<i>".to_string())
        );
        assert_eq!(
            disallowed_description_tag("Deals <b>2</b> <u>damage</u>"),
            Some("<u>".to_string())
        );
    }

    #[test]
    fn test_unbalanced_bold_is_disallowed() {
        assert_eq!(
            disallowed_description_tag("Deals <b>2 damage"),
            Some("<b>".to_string())
        );
    }

    #[test]
    fn test_origin_misuse() {
        assert_eq!(origin_misuse("Blight"), None);
        assert_eq!(origin_misuse("Alex's Mobs"), None);
        assert_eq!(origin_misuse("wither"), Some(MarkupMisuse::NonOriginName));
        assert_eq!(
            origin_misuse("Spider attacks"),
            Some(MarkupMisuse::DescriptiveWord {
                word: "attacks".to_string()
            })
        );
    }

    #[test]
    fn test_unwrapped_tokens() {
        assert_eq!(unwrapped_tokens("Deals 2^level damage"), vec!["^level"]);
        assert_eq!(
            unwrapped_tokens("Lasts 5 seconds, +1 armor"),
            vec!["seconds", "+"]
        );
        assert_eq!(unwrapped_tokens("Lasts 5 second(s)"), vec!["second(s)"]);
        assert!(unwrapped_tokens("A secondary effect").is_empty());
        assert!(unwrapped_tokens("Lasts <b>5 seconds</b>, <b>+1</b> armor").is_empty());
    }

    #[test]
    fn test_formula_span_position() {
        let check = |description: &str| {
            bold_spans(description)
                .iter()
                .find_map(|span| malformed_formula(description, span))
        };
        assert_eq!(check("Deals <b>2^level</b> damage"), Some(EXPONENT_MARKER));
        assert_eq!(check("Deals <b>damage 2^level</b>"), None);
        assert_eq!(check("Deals <b>2^level damage</b>"), Some(EXPONENT_MARKER));
        assert_eq!(check("Every <b>5 × level seconds</b>."), None);
        assert_eq!(check("Every <b>5 × level ticks</b>."), Some(MULTIPLIER_MARKER));
        assert_eq!(check("Takes <b>2^level × level</b>"), Some(EXPONENT_MARKER));
    }

    #[test]
    fn test_level_reference() {
        assert_eq!(
            level_reference("Stronger at higher levels"),
            Some("higher level".to_string())
        );
        assert_eq!(level_reference("Drains the hunger level"), None);
        assert_eq!(level_reference("Raises the level of light"), None);
        assert_eq!(
            level_reference("Damage grows with level"),
            Some("level".to_string())
        );
        assert_eq!(
            level_reference("Deals <b>level</b> damage"),
            Some("<b>level</b>".to_string())
        );
        assert_eq!(level_reference("Prevents drowning"), None);
    }
}
