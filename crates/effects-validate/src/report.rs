//! Validation report containing the issues found in a run.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::issue::{Category, Issue, IssueKind};

/// Issues collected by a validation run, in detection order.
///
/// Each serialized issue carries its `kind`, `category`, and `message`
/// alongside the variant fields, so `kind` is the stable rule class even
/// where the `rule` tag names a more specific variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub record_count: usize,
    #[serde(serialize_with = "serialize_issues")]
    pub issues: Vec<Issue>,
}

#[derive(Serialize)]
struct IssueEntry<'a> {
    kind: IssueKind,
    category: Category,
    message: String,
    #[serde(flatten)]
    issue: &'a Issue,
}

fn serialize_issues<S: Serializer>(issues: &[Issue], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(issues.iter().map(|issue| IssueEntry {
        kind: issue.kind(),
        category: issue.category(),
        message: issue.message(),
        issue,
    }))
}

impl ValidationReport {
    /// Create an empty report for a dataset of `record_count` records.
    pub fn new(record_count: usize) -> Self {
        Self {
            record_count,
            issues: Vec::new(),
        }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// True when every pass succeeded.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// First issue detected; the fail-fast result.
    pub fn first(&self) -> Option<&Issue> {
        self.issues.first()
    }

    /// Issue counts per rule class.
    pub fn count_by_kind(&self) -> BTreeMap<IssueKind, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn issues_in(&self, category: Category) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(move |issue| issue.category() == category)
    }
}
