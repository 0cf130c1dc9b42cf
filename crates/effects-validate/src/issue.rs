//! Validation issue types.
//!
//! The [`Issue`] enum provides type-safe issue creation where each variant
//! carries only its needed data. [`IssueKind`] is the stable rule taxonomy
//! shown to users; several variants may share one kind.

use std::fmt;

use effects_model::Field;
use serde::{Deserialize, Serialize};

/// Rule class of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueKind {
    EmptyDataset,
    MissingOrEmptyField,
    TextFormattingViolation,
    InvalidEnumValue,
    DisallowedMarkup,
    MisusedMarkup,
    UnwrappedSignificantText,
    MalformedFormulaSpan,
    InconsistentLevelReference,
    DescriptionTooLong,
    TagExclusivityViolation,
    ScalingTagMismatch,
    SourceConventionViolation,
    SectionNotContiguous,
    OrderViolation,
    DuplicateName,
}

impl IssueKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmptyDataset => "EmptyDataset",
            Self::MissingOrEmptyField => "MissingOrEmptyField",
            Self::TextFormattingViolation => "TextFormattingViolation",
            Self::InvalidEnumValue => "InvalidEnumValue",
            Self::DisallowedMarkup => "DisallowedMarkup",
            Self::MisusedMarkup => "MisusedMarkup",
            Self::UnwrappedSignificantText => "UnwrappedSignificantText",
            Self::MalformedFormulaSpan => "MalformedFormulaSpan",
            Self::InconsistentLevelReference => "InconsistentLevelReference",
            Self::DescriptionTooLong => "DescriptionTooLong",
            Self::TagExclusivityViolation => "TagExclusivityViolation",
            Self::ScalingTagMismatch => "ScalingTagMismatch",
            Self::SourceConventionViolation => "SourceConventionViolation",
            Self::SectionNotContiguous => "SectionNotContiguous",
            Self::OrderViolation => "OrderViolation",
            Self::DuplicateName => "DuplicateName",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::EmptyDataset | Self::MissingOrEmptyField => Category::Presence,
            Self::TextFormattingViolation | Self::InvalidEnumValue | Self::DescriptionTooLong => {
                Category::Format
            }
            Self::DisallowedMarkup
            | Self::MisusedMarkup
            | Self::UnwrappedSignificantText
            | Self::MalformedFormulaSpan => Category::Markup,
            Self::InconsistentLevelReference
            | Self::TagExclusivityViolation
            | Self::ScalingTagMismatch
            | Self::SourceConventionViolation => Category::Consistency,
            Self::SectionNotContiguous | Self::OrderViolation | Self::DuplicateName => {
                Category::Ordering
            }
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Broad grouping of rule classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Presence,
    Format,
    Markup,
    Consistency,
    Ordering,
}

impl Category {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Presence,
            Self::Format,
            Self::Markup,
            Self::Consistency,
            Self::Ordering,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Presence => "Presence",
            Self::Format => "Format",
            Self::Markup => "Markup",
            Self::Consistency => "Consistency",
            Self::Ordering => "Ordering",
        }
    }
}

/// Text hygiene failures, checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormattingProblem {
    ConsecutiveSpaces,
    SurroundingWhitespace,
    SpaceBeforeComma,
    CommaSpacing,
}

impl FormattingProblem {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::ConsecutiveSpaces => "contains consecutive spaces",
            Self::SurroundingWhitespace => "has leading or trailing whitespace",
            Self::SpaceBeforeComma => "has a space before a comma",
            Self::CommaSpacing => "has a comma not followed by exactly one space",
        }
    }
}

/// Why an italic span in `source` is not an origin name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupMisuse {
    /// The span names a known creature or item.
    NonOriginName,
    /// The span contains action or attack vocabulary.
    DescriptiveWord { word: String },
}

/// Grouping conventions for the `source` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceConvention {
    /// More than one potion delivery variant spelled out.
    PotionVariants { variants: Vec<String> },
    /// `&` used outside an origin-name span.
    RawAmpersand,
    /// Spell items referenced in a non-standard phrasing.
    SpellReference { fragment: String },
}

/// Which ordering invariant was broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderScope {
    /// Effects inside the privileged section.
    PrivilegedSection { mod_name: String },
    /// The sequence of mod partitions.
    ModSequence,
    /// Effects inside one mod partition.
    Partition { mod_name: String },
}

/// Validation issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule")]
pub enum Issue {
    /// The collection holds no records.
    EmptyDataset,

    // Field checks
    /// Required field absent, null, blank, or an empty tag list.
    MissingOrEmptyField { effect: String, field: Field },
    /// Whitespace or comma hygiene broken after stripping markup.
    TextFormattingViolation {
        effect: String,
        field: Field,
        problem: FormattingProblem,
    },
    /// `maxLevel` outside I..X, or a field holding the wrong JSON type.
    InvalidEnumValue {
        effect: String,
        field: Field,
        value: String,
    },

    // Markup checks
    /// Tag outside the field's vocabulary, or an unbalanced tag.
    DisallowedMarkup {
        effect: String,
        field: Field,
        tag: String,
    },
    /// Italic span in `source` that is not an origin name.
    MisusedMarkup {
        effect: String,
        content: String,
        misuse: MarkupMisuse,
    },
    /// Formula, time unit, or plus sign outside bold.
    UnwrappedSignificantText { effect: String, token: String },
    /// Bold span where the level marker does not close the formula.
    MalformedFormulaSpan {
        effect: String,
        marker: String,
        span: String,
    },
    /// Non-scaling effect whose description talks about levels.
    InconsistentLevelReference { effect: String, phrase: String },
    /// Plain-text description longer than the configured cap.
    DescriptionTooLong {
        effect: String,
        length: usize,
        max: usize,
    },

    // Consistency checks
    /// Zero or both of `positive`/`negative`.
    TagExclusivityViolation {
        effect: String,
        positive: bool,
        negative: bool,
    },
    /// `scaling` tag disagrees with `maxLevel`.
    ScalingTagMismatch {
        effect: String,
        max_level: String,
        has_scaling_tag: bool,
    },
    SourceConventionViolation {
        effect: String,
        convention: SourceConvention,
    },

    // Ordering checks
    /// No record carries the privileged mod.
    MissingPrivilegedSection { mod_name: String },
    /// Record separated from the rest of its section.
    SectionNotContiguous {
        effect: String,
        mod_name: String,
        index: usize,
    },
    /// Adjacent pair out of case-insensitive order.
    OrderViolation {
        scope: OrderScope,
        before: String,
        after: String,
    },
    DuplicateName {
        effect: String,
        mod_name: Option<String>,
    },
}

impl Issue {
    pub fn kind(&self) -> IssueKind {
        match self {
            Self::EmptyDataset => IssueKind::EmptyDataset,
            Self::MissingOrEmptyField { .. } => IssueKind::MissingOrEmptyField,
            Self::TextFormattingViolation { .. } => IssueKind::TextFormattingViolation,
            Self::InvalidEnumValue { .. } => IssueKind::InvalidEnumValue,
            Self::DisallowedMarkup { .. } => IssueKind::DisallowedMarkup,
            Self::MisusedMarkup { .. } => IssueKind::MisusedMarkup,
            Self::UnwrappedSignificantText { .. } => IssueKind::UnwrappedSignificantText,
            Self::MalformedFormulaSpan { .. } => IssueKind::MalformedFormulaSpan,
            Self::InconsistentLevelReference { .. } => IssueKind::InconsistentLevelReference,
            Self::DescriptionTooLong { .. } => IssueKind::DescriptionTooLong,
            Self::TagExclusivityViolation { .. } => IssueKind::TagExclusivityViolation,
            Self::ScalingTagMismatch { .. } => IssueKind::ScalingTagMismatch,
            Self::SourceConventionViolation { .. } => IssueKind::SourceConventionViolation,
            Self::MissingPrivilegedSection { .. } | Self::SectionNotContiguous { .. } => {
                IssueKind::SectionNotContiguous
            }
            Self::OrderViolation { .. } => IssueKind::OrderViolation,
            Self::DuplicateName { .. } => IssueKind::DuplicateName,
        }
    }

    pub fn category(&self) -> Category {
        self.kind().category()
    }

    /// Effect name of the offending record, when the issue concerns one.
    pub fn effect(&self) -> Option<&str> {
        match self {
            Self::EmptyDataset | Self::MissingPrivilegedSection { .. } => None,
            Self::MissingOrEmptyField { effect, .. }
            | Self::TextFormattingViolation { effect, .. }
            | Self::InvalidEnumValue { effect, .. }
            | Self::DisallowedMarkup { effect, .. }
            | Self::MisusedMarkup { effect, .. }
            | Self::UnwrappedSignificantText { effect, .. }
            | Self::MalformedFormulaSpan { effect, .. }
            | Self::InconsistentLevelReference { effect, .. }
            | Self::DescriptionTooLong { effect, .. }
            | Self::TagExclusivityViolation { effect, .. }
            | Self::ScalingTagMismatch { effect, .. }
            | Self::SourceConventionViolation { effect, .. }
            | Self::SectionNotContiguous { effect, .. }
            | Self::DuplicateName { effect, .. } => Some(effect.as_str()),
            Self::OrderViolation { scope, before, .. } => match scope {
                OrderScope::ModSequence => None,
                _ => Some(before.as_str()),
            },
        }
    }

    /// Human-readable description with the issue-specific detail.
    pub fn message(&self) -> String {
        match self {
            Self::EmptyDataset => "No effects present (empty list)".to_string(),

            Self::MissingOrEmptyField { effect, field } => {
                format!("Effect '{effect}' is missing a value for '{field}'")
            }

            Self::TextFormattingViolation {
                effect,
                field,
                problem,
            } => format!(
                "Field '{field}' of effect '{effect}' {}",
                problem.describe()
            ),

            Self::InvalidEnumValue {
                effect,
                field,
                value,
            } => format!(
                "Effect '{effect}' has {field} '{value}'; expected {}",
                field.expected()
            ),

            Self::DisallowedMarkup { effect, field, tag } => {
                format!("Tag '{tag}' is not allowed in {field} of effect '{effect}'")
            }

            Self::MisusedMarkup {
                effect,
                content,
                misuse,
            } => match misuse {
                MarkupMisuse::NonOriginName => format!(
                    "Italic '<i>{content}</i>' in source of effect '{effect}' names a creature or item, not an origin"
                ),
                MarkupMisuse::DescriptiveWord { word } => format!(
                    "Italic '<i>{content}</i>' in source of effect '{effect}' contains '{word}', not an origin name"
                ),
            },

            Self::UnwrappedSignificantText { effect, token } => {
                format!("'{token}' must be in <b> tags in effect '{effect}'")
            }

            Self::MalformedFormulaSpan {
                effect,
                marker,
                span,
            } => format!(
                "'{marker}' incorrectly positioned in bold span in effect '{effect}' -> <b>{span}</b>"
            ),

            Self::InconsistentLevelReference { effect, phrase } => format!(
                "Effect '{effect}' has maxLevel I but its description mentions '{phrase}'"
            ),

            Self::DescriptionTooLong {
                effect,
                length,
                max,
            } => format!(
                "Description too long (>{max} chars) in effect '{effect}': {length} chars (without HTML tags)"
            ),

            Self::TagExclusivityViolation {
                effect,
                positive,
                negative,
            } => {
                if *positive && *negative {
                    format!("Effect '{effect}' cannot have both 'positive' and 'negative' tags")
                } else {
                    format!("Effect '{effect}' must have either 'positive' or 'negative' tag")
                }
            }

            Self::ScalingTagMismatch {
                effect,
                max_level,
                has_scaling_tag,
            } => {
                if *has_scaling_tag {
                    format!(
                        "Effect '{effect}' with maxLevel '{max_level}' must not have 'scaling' tag"
                    )
                } else {
                    format!("Effect '{effect}' with maxLevel '{max_level}' should have 'scaling' tag")
                }
            }

            Self::SourceConventionViolation { effect, convention } => match convention {
                SourceConvention::PotionVariants { variants } => format!(
                    "Source of effect '{effect}' lists potion variants ({}); group them as potions",
                    variants.join(", ")
                ),
                SourceConvention::RawAmpersand => format!(
                    "Source of effect '{effect}' uses '&' outside an origin name; write 'and'"
                ),
                SourceConvention::SpellReference { fragment } => format!(
                    "Source of effect '{effect}' references spells as '{fragment}'; write 'Spells from <i>Origin</i>' or '<i>Origin</i> spells'"
                ),
            },

            Self::MissingPrivilegedSection { mod_name } => {
                format!("{mod_name} section missing (no entries with mod '{mod_name}')")
            }

            Self::SectionNotContiguous {
                effect,
                mod_name,
                index,
            } => format!(
                "Effect '{effect}' at index {index} is outside the contiguous '{mod_name}' section"
            ),

            Self::OrderViolation {
                scope,
                before,
                after,
            } => match scope {
                OrderScope::PrivilegedSection { mod_name } => format!(
                    "{mod_name} ordering error: '{before}' should come after '{after}' (alphabetical)"
                ),
                OrderScope::ModSequence => format!(
                    "Mod ordering error: '{before}' should come after '{after}' (alphabetical)"
                ),
                OrderScope::Partition { mod_name } => format!(
                    "Effect ordering error in mod '{mod_name}': '{before}' should come after '{after}' (alphabetical)"
                ),
            },

            Self::DuplicateName { effect, mod_name } => match mod_name {
                Some(mod_name) => {
                    format!("Duplicate effect name detected in mod '{mod_name}': '{effect}'")
                }
                None => format!("Duplicate effect name detected: '{effect}'"),
            },
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}
