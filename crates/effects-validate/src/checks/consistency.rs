//! Cross-field checks: polarity tags, the scaling tag, and `source`
//! grouping conventions.

use std::ops::Range;
use std::sync::LazyLock;

use effects_model::{EffectRecord, TAG_NEGATIVE, TAG_POSITIVE, TAG_SCALING};
use regex::Regex;

use crate::issue::{Issue, SourceConvention};
use crate::markup::{italic_spans, outside_italic};
use crate::rules::{RuleSet, ScalingTagRule};

/// Potion delivery variants and the label reported for each.
static POTION_VARIANTS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("splash potion", r"(?i)\bsplash potions?\b"),
        ("lingering potion", r"(?i)\blingering potions?\b"),
        ("tipped arrow", r"(?i)\btipped arrows?\b"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).expect("Invalid potion regex")))
    .collect()
});

static SPELL_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[Ss]pells?\b").expect("Invalid spell regex"));

static SPELL_PHRASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[Ss]pells from <i>[^<>]+</i>|<i>[^<>]+</i> spells")
        .expect("Invalid spell phrase regex")
});

pub fn check(records: &[EffectRecord], rules: &RuleSet) -> Vec<Issue> {
    let mut issues = Vec::new();

    for record in records {
        let effect = record.display_name();

        let positive = record.has_tag(TAG_POSITIVE);
        let negative = record.has_tag(TAG_NEGATIVE);
        if positive == negative {
            issues.push(Issue::TagExclusivityViolation {
                effect: effect.to_string(),
                positive,
                negative,
            });
        }

        if let Some(max_level) = record.max_level_str().map(str::trim)
            && !max_level.is_empty()
        {
            let scaling = record.is_scaling();
            let has_scaling_tag = record.has_tag(TAG_SCALING);
            let mismatch = match rules.scaling_tag {
                ScalingTagRule::Exact => scaling != has_scaling_tag,
                ScalingTagRule::RequiredWhenScaling => scaling && !has_scaling_tag,
            };
            if mismatch {
                issues.push(Issue::ScalingTagMismatch {
                    effect: effect.to_string(),
                    max_level: max_level.to_string(),
                    has_scaling_tag,
                });
            }
        }

        for convention in source_conventions(record.source_str()) {
            issues.push(Issue::SourceConventionViolation {
                effect: effect.to_string(),
                convention,
            });
        }
    }

    issues
}

/// Grouping conventions broken by one `source` value.
fn source_conventions(source: &str) -> Vec<SourceConvention> {
    let mut broken = Vec::new();

    let variants: Vec<String> = POTION_VARIANTS
        .iter()
        .filter(|(_, regex)| regex.is_match(source))
        .map(|(label, _)| (*label).to_string())
        .collect();
    if variants.len() > 1 {
        broken.push(SourceConvention::PotionVariants { variants });
    }

    if outside_italic(source).contains('&') {
        broken.push(SourceConvention::RawAmpersand);
    }

    if let Some(fragment) = nonstandard_spell_reference(source) {
        broken.push(SourceConvention::SpellReference { fragment });
    }

    broken
}

/// The comma-separated fragment holding a spell mention that follows
/// neither accepted phrasing. Only applies to sources naming an origin.
fn nonstandard_spell_reference(source: &str) -> Option<String> {
    let italics: Vec<Range<usize>> = italic_spans(source)
        .into_iter()
        .map(|span| span.range)
        .collect();
    if italics.is_empty() {
        return None;
    }
    let accepted: Vec<Range<usize>> = SPELL_PHRASE_REGEX
        .find_iter(source)
        .map(|m| m.range())
        .collect();
    let covers = |ranges: &[Range<usize>], word: &Range<usize>| {
        ranges
            .iter()
            .any(|range| range.start <= word.start && word.end <= range.end)
    };

    let word = SPELL_WORD_REGEX
        .find_iter(source)
        .map(|m| m.range())
        .find(|word| !covers(&italics, word) && !covers(&accepted, word))?;

    let start = source[..word.start].rfind(',').map_or(0, |i| i + 1);
    let end = source[word.end..]
        .find(',')
        .map_or(source.len(), |i| word.end + i);
    Some(source[start..end].trim().to_string())
}
