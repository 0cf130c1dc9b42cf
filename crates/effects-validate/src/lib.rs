//! Layered validation of the effects dataset.
//!
//! Five passes run in a fixed order over the whole record collection:
//!
//! 1. **Ordering**: privileged section first, mods and effects alphabetical
//! 2. **Duplicate name**: effect names unique within the configured scope
//! 3. **Field**: presence, text hygiene, `maxLevel` enumeration
//! 4. **Markup**: tag vocabularies and formula placement
//! 5. **Consistency**: polarity, scaling tag, source conventions
//!
//! In [`RunMode::FailFast`] the run stops at the first issue, which is the
//! first issue detected by the first failing pass. [`RunMode::CollectAll`]
//! runs every pass and keeps every issue in detection order.

mod checks;
pub mod issue;
pub mod markup;
pub mod report;
pub mod rules;

use std::time::Instant;

use effects_model::EffectRecord;
use tracing::{debug, info_span};

pub use checks::Pass;
pub use issue::{
    Category, FormattingProblem, Issue, IssueKind, MarkupMisuse, OrderScope, SourceConvention,
};
pub use report::ValidationReport;
pub use rules::{
    DuplicateScope, LEGACY_DESCRIPTION_MAX_CHARS, Profile, RuleOverrides, RuleSet, RulesError,
    ScalingTagRule,
};

/// How far a validation run goes after the first issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Stop at the first issue.
    #[default]
    FailFast,
    /// Run every pass and keep every issue.
    CollectAll,
}

/// Progress notification emitted around each pass.
#[derive(Debug, Clone, Copy)]
pub enum PassEvent<'a> {
    Started(Pass),
    /// The pass ran to completion; the slice holds the issues it kept.
    Finished(Pass, &'a [Issue]),
}

/// Validate `records` without progress notifications.
pub fn validate(records: &[EffectRecord], rules: &RuleSet, mode: RunMode) -> ValidationReport {
    run_passes(records, rules, mode, |_| {})
}

/// Validate `records`, reporting each pass start and finish to `on_event`.
///
/// An empty collection yields a single [`Issue::EmptyDataset`] and no pass
/// runs. In fail-fast mode no pass after the first failing one starts, and
/// the failing pass reports only the issue that stopped the run.
pub fn run_passes<F>(
    records: &[EffectRecord],
    rules: &RuleSet,
    mode: RunMode,
    mut on_event: F,
) -> ValidationReport
where
    F: FnMut(PassEvent<'_>),
{
    let mut report = ValidationReport::new(records.len());
    if records.is_empty() {
        report.add(Issue::EmptyDataset);
        return report;
    }

    for pass in Pass::all() {
        on_event(PassEvent::Started(*pass));

        let mut issues = info_span!("pass", number = pass.number(), name = pass.label())
            .in_scope(|| {
                let start = Instant::now();
                let issues = pass.run(records, rules);
                debug!(
                    record_count = records.len(),
                    issue_count = issues.len(),
                    duration_ms = start.elapsed().as_millis(),
                    "pass complete"
                );
                issues
            });

        if mode == RunMode::FailFast && !issues.is_empty() {
            issues.truncate(1);
        }
        on_event(PassEvent::Finished(*pass, &issues));

        let failed = !issues.is_empty();
        report.extend(issues);
        if failed && mode == RunMode::FailFast {
            break;
        }
    }

    report
}
