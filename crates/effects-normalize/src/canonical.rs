use std::fmt;

use effects_model::{EffectRecord, EffectsDocument, sort_key};
use serde::Serialize;
use tracing::{debug, warn};

/// First position where the current order departs from the canonical one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Divergence {
    pub index: usize,
    pub current: String,
    pub expected: String,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {}: current={} expected={}",
            self.index, self.current, self.expected
        )
    }
}

/// Return `records` in canonical order.
pub fn canonicalize(records: &[EffectRecord], privileged_mod: &str) -> Vec<EffectRecord> {
    // Partitions keyed by the exact mod value, in first-occurrence order.
    let mut privileged = Vec::new();
    let mut partitions: Vec<(&str, Vec<&EffectRecord>)> = Vec::new();
    for record in records {
        let mod_name = record.mod_str();
        if mod_name == privileged_mod {
            privileged.push(record);
            continue;
        }
        match partitions.iter_mut().find(|entry| entry.0 == mod_name) {
            Some((_, members)) => members.push(record),
            None => partitions.push((mod_name, vec![record])),
        }
    }

    partitions.sort_by_cached_key(|(name, _)| sort_key(name));

    let mut ordered = Vec::with_capacity(records.len());
    let groups = partitions.into_iter().map(|(_, members)| members);
    for mut members in std::iter::once(privileged).chain(groups) {
        members.sort_by_cached_key(|record| sort_key(record.effect_str()));
        ordered.extend(members.into_iter().cloned());
    }
    ordered
}

/// Identifier used to compare orders: the record id, or its display name
/// when the id is blank.
fn identifier(record: &EffectRecord) -> &str {
    let id = record.id_str();
    if id.trim().is_empty() {
        record.display_name()
    } else {
        id
    }
}

/// Compare two orders by identifier and report the first mismatch.
pub fn first_difference(
    current: &[EffectRecord],
    canonical: &[EffectRecord],
) -> Option<Divergence> {
    current
        .iter()
        .zip(canonical)
        .enumerate()
        .find(|(_, (a, b))| identifier(a) != identifier(b))
        .map(|(index, (a, b))| Divergence {
            index,
            current: identifier(a).to_string(),
            expected: identifier(b).to_string(),
        })
}

pub fn is_canonical(records: &[EffectRecord], privileged_mod: &str) -> bool {
    first_difference(records, &canonicalize(records, privileged_mod)).is_none()
}

/// Reorder the document's records in place.
///
/// Returns the first divergence found before reordering, or `None` when the
/// document was already canonical and was left untouched.
pub fn canonicalize_document(
    document: &mut EffectsDocument,
    privileged_mod: &str,
) -> Option<Divergence> {
    let canonical = canonicalize(&document.effects, privileged_mod);
    let divergence = first_difference(&document.effects, &canonical);
    match &divergence {
        Some(divergence) => {
            warn!(
                index = divergence.index,
                current = %divergence.current,
                expected = %divergence.expected,
                "document is not in canonical order"
            );
            document.effects = canonical;
        }
        None => debug!(record_count = document.len(), "document already canonical"),
    }
    divergence
}
