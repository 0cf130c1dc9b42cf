//! Per-field type, presence, text hygiene, and enumeration checks.

use effects_model::{EffectRecord, Field, MaxLevel};

use crate::issue::{FormattingProblem, Issue};
use crate::markup::strip_tags;

/// Fields whose plain text must follow the whitespace and comma conventions.
const HYGIENE_FIELDS: &[Field] = &[Field::Mod, Field::Effect, Field::Description, Field::Source];

/// Check value types, presence, text hygiene, and `maxLevel` for every record.
pub fn check(records: &[EffectRecord]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for record in records {
        let effect = record.display_name();

        for field in Field::all() {
            if let Some(value) = field.mistyped(record) {
                issues.push(Issue::InvalidEnumValue {
                    effect: effect.to_string(),
                    field: *field,
                    value,
                });
            } else if !field.is_populated(record) {
                issues.push(Issue::MissingOrEmptyField {
                    effect: effect.to_string(),
                    field: *field,
                });
            }
        }

        for field in HYGIENE_FIELDS {
            let Some(value) = field.text(record) else {
                continue;
            };
            if let Some(problem) = formatting_problem(&strip_tags(value)) {
                issues.push(Issue::TextFormattingViolation {
                    effect: effect.to_string(),
                    field: *field,
                    problem,
                });
            }
        }

        if let Some(value) = record.max_level_str()
            && !value.trim().is_empty()
            && MaxLevel::parse(value).is_none()
        {
            issues.push(Issue::InvalidEnumValue {
                effect: effect.to_string(),
                field: Field::MaxLevel,
                value: value.to_string(),
            });
        }
    }

    issues
}

/// First hygiene rule the plain text breaks, if any.
pub fn formatting_problem(text: &str) -> Option<FormattingProblem> {
    if text.contains("  ") {
        return Some(FormattingProblem::ConsecutiveSpaces);
    }
    if text.trim() != text {
        return Some(FormattingProblem::SurroundingWhitespace);
    }
    if text.contains(" ,") {
        return Some(FormattingProblem::SpaceBeforeComma);
    }
    let comma_ok = text.match_indices(',').all(|(idx, _)| {
        let rest = &text[idx + 1..];
        rest.starts_with(' ') && !rest[1..].starts_with(' ')
    });
    if !comma_ok {
        return Some(FormattingProblem::CommaSpacing);
    }
    None
}
