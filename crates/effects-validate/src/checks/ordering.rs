//! Section, ordering, and duplicate-name checks.
//!
//! Canonical order: the privileged mod's records first as one contiguous
//! block, then one contiguous partition per remaining mod with partitions
//! ordered by mod name. Effects inside every block are ordered by name. All
//! comparisons are case-insensitive.

use std::collections::{HashMap, HashSet};

use effects_model::{EffectRecord, sort_key};

use crate::issue::{Issue, OrderScope};
use crate::rules::{DuplicateScope, RuleSet};

/// Check section contiguity and ordering.
pub fn check_order(records: &[EffectRecord], rules: &RuleSet) -> Vec<Issue> {
    let mut issues = Vec::new();
    if records.is_empty() {
        return issues;
    }

    let privileged = rules.privileged_mod.as_str();
    let is_privileged = |record: &EffectRecord| record.mod_str() == privileged;

    if !records.iter().any(is_privileged) {
        issues.push(Issue::MissingPrivilegedSection {
            mod_name: privileged.to_string(),
        });
    }

    // The privileged block is the leading run; any later privileged record is stray.
    let boundary = records.iter().take_while(|r| is_privileged(*r)).count();
    for (index, record) in records.iter().enumerate().skip(boundary) {
        if is_privileged(record) {
            issues.push(Issue::SectionNotContiguous {
                effect: record.display_name().to_string(),
                mod_name: privileged.to_string(),
                index,
            });
        }
    }

    let section: Vec<&EffectRecord> = records[..boundary].iter().collect();
    push_inversions(
        &section,
        &OrderScope::PrivilegedSection {
            mod_name: privileged.to_string(),
        },
        &mut issues,
    );

    let partitions = collect_partitions(&records[boundary..], boundary, privileged, &mut issues);

    for pair in partitions.windows(2) {
        let (before, after) = (pair[0].0, pair[1].0);
        if sort_key(before) > sort_key(after) {
            issues.push(Issue::OrderViolation {
                scope: OrderScope::ModSequence,
                before: before.to_string(),
                after: after.to_string(),
            });
        }
    }

    for (mod_name, members) in &partitions {
        push_inversions(
            members,
            &OrderScope::Partition {
                mod_name: (*mod_name).to_string(),
            },
            &mut issues,
        );
    }

    issues
}

/// Group the non-privileged tail by mod in first-occurrence order, reporting
/// records that come back to a mod after another mod's partition started.
fn collect_partitions<'a>(
    tail: &'a [EffectRecord],
    offset: usize,
    privileged: &str,
    issues: &mut Vec<Issue>,
) -> Vec<(&'a str, Vec<&'a EffectRecord>)> {
    let mut partitions: Vec<(&str, Vec<&EffectRecord>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut previous: Option<&str> = None;

    for (idx, record) in tail.iter().enumerate() {
        let mod_name = record.mod_str();
        if mod_name == privileged {
            // reported as stray already
            continue;
        }
        match positions.get(mod_name) {
            Some(&position) => {
                if previous != Some(mod_name) {
                    issues.push(Issue::SectionNotContiguous {
                        effect: record.display_name().to_string(),
                        mod_name: mod_name.to_string(),
                        index: offset + idx,
                    });
                }
                partitions[position].1.push(record);
            }
            None => {
                positions.insert(mod_name, partitions.len());
                partitions.push((mod_name, vec![record]));
            }
        }
        previous = Some(mod_name);
    }

    partitions
}

/// Report every adjacent pair whose effect names are out of order.
fn push_inversions(members: &[&EffectRecord], scope: &OrderScope, issues: &mut Vec<Issue>) {
    for pair in members.windows(2) {
        let (before, after) = (pair[0].effect_str(), pair[1].effect_str());
        if sort_key(before) > sort_key(after) {
            issues.push(Issue::OrderViolation {
                scope: scope.clone(),
                before: before.to_string(),
                after: after.to_string(),
            });
        }
    }
}

/// Check that `effect` names are unique within the configured scope.
pub fn check_duplicates(records: &[EffectRecord], rules: &RuleSet) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for record in records {
        let effect = record.effect_str();
        if effect.trim().is_empty() {
            // reported by the field checks
            continue;
        }
        let scope_key = match rules.duplicate_scope {
            DuplicateScope::Global => "",
            DuplicateScope::PerMod => record.mod_str(),
        };
        if !seen.insert((scope_key, effect)) {
            issues.push(Issue::DuplicateName {
                effect: effect.to_string(),
                mod_name: match rules.duplicate_scope {
                    DuplicateScope::Global => None,
                    DuplicateScope::PerMod => Some(record.mod_str().to_string()),
                },
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use effects_model::Field;

    use super::*;

    fn record(mod_name: &str, effect: &str) -> EffectRecord {
        EffectRecord::new()
            .with(Field::Mod, mod_name)
            .with(Field::Effect, effect)
    }

    #[test]
    fn test_canonical_sequence_passes() {
        let records = vec![
            record("Minecraft", "absorption"),
            record("Minecraft", "Blindness"),
            record("aether", "Inebriation"),
            record("Blight", "Alpha"),
            record("Blight", "zeta"),
        ];
        assert!(check_order(&records, &RuleSet::strict()).is_empty());
    }

    #[test]
    fn test_section_must_start_at_zero() {
        let records = vec![record("Blight", "Alpha"), record("Minecraft", "Speed")];
        let issues = check_order(&records, &RuleSet::strict());
        assert_eq!(
            issues[0],
            Issue::SectionNotContiguous {
                effect: "Speed".to_string(),
                mod_name: "Minecraft".to_string(),
                index: 1,
            }
        );
    }

    #[test]
    fn test_missing_privileged_section() {
        let records = vec![record("Blight", "Alpha")];
        let issues = check_order(&records, &RuleSet::strict());
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], Issue::MissingPrivilegedSection { .. }));
    }

    #[test]
    fn test_partition_returning_later_is_not_contiguous() {
        let records = vec![
            record("Minecraft", "Speed"),
            record("Aether", "Inebriation"),
            record("Blight", "Alpha"),
            record("Aether", "Remedy"),
        ];
        let issues = check_order(&records, &RuleSet::strict());
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0],
            Issue::SectionNotContiguous { effect, index: 3, .. } if effect == "Remedy"
        ));
    }

    #[test]
    fn test_mod_sequence_order() {
        let records = vec![
            record("Minecraft", "Speed"),
            record("Blight", "Alpha"),
            record("aether", "Inebriation"),
        ];
        let issues = check_order(&records, &RuleSet::strict());
        assert_eq!(
            issues,
            vec![Issue::OrderViolation {
                scope: OrderScope::ModSequence,
                before: "Blight".to_string(),
                after: "aether".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_scopes() {
        let records = vec![
            record("Minecraft", "Poison"),
            record("Blight", "Poison"),
        ];
        let global = check_duplicates(&records, &RuleSet::strict());
        assert_eq!(
            global,
            vec![Issue::DuplicateName {
                effect: "Poison".to_string(),
                mod_name: None,
            }]
        );

        let per_mod = RuleSet::strict().with_duplicate_scope(DuplicateScope::PerMod);
        assert!(check_duplicates(&records, &per_mod).is_empty());
    }
}
