//! Validation passes.
//!
//! Each pass is one full, read-only scan of the dataset and returns its
//! issues in detection order.

mod consistency;
mod fields;
mod markup;
mod ordering;

use std::fmt;

use effects_model::EffectRecord;
use serde::{Deserialize, Serialize};

use crate::issue::Issue;
use crate::rules::RuleSet;

/// The validation passes, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pass {
    Ordering,
    Duplicates,
    Fields,
    Markup,
    Consistency,
}

impl Pass {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Ordering,
            Self::Duplicates,
            Self::Fields,
            Self::Markup,
            Self::Consistency,
        ]
    }

    /// 1-based position in the pipeline.
    pub fn number(&self) -> usize {
        match self {
            Self::Ordering => 1,
            Self::Duplicates => 2,
            Self::Fields => 3,
            Self::Markup => 4,
            Self::Consistency => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ordering => "Ordering",
            Self::Duplicates => "Duplicate name",
            Self::Fields => "Field",
            Self::Markup => "Markup",
            Self::Consistency => "Consistency",
        }
    }

    /// Run this pass over the whole dataset.
    pub fn run(&self, records: &[EffectRecord], rules: &RuleSet) -> Vec<Issue> {
        match self {
            Self::Ordering => ordering::check_order(records, rules),
            Self::Duplicates => ordering::check_duplicates(records, rules),
            Self::Fields => fields::check(records),
            Self::Markup => markup::check(records, rules),
            Self::Consistency => consistency::check(records, rules),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
