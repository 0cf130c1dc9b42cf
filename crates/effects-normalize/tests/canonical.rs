use effects_model::{EffectRecord, Field, PRIVILEGED_MOD, sort_key};
use effects_normalize::{canonicalize, canonicalize_document, first_difference, is_canonical};
use proptest::prelude::*;
use serde_json::json;

fn ids(records: &[EffectRecord]) -> Vec<&str> {
    records.iter().map(EffectRecord::id_str).collect()
}

#[test]
fn privileged_group_leads_and_groups_are_sorted() {
    let records: Vec<EffectRecord> = serde_json::from_value(json!([
        {"mod": "Blight", "id": "blight:zeta", "effect": "Zeta"},
        {"mod": "Minecraft", "id": "minecraft:poison", "effect": "Poison"},
        {"mod": "Blight", "id": "blight:alpha", "effect": "Alpha"}
    ]))
    .unwrap();

    let ordered = canonicalize(&records, PRIVILEGED_MOD);
    let pairs: Vec<(&str, &str)> = ordered
        .iter()
        .map(|record| (record.mod_str(), record.effect_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("Minecraft", "Poison"), ("Blight", "Alpha"), ("Blight", "Zeta")]
    );
    assert!(!is_canonical(&records, PRIVILEGED_MOD));
    assert!(is_canonical(&ordered, PRIVILEGED_MOD));
}

#[test]
fn rewrite_keeps_unknown_fields() {
    let mut document = serde_json::from_value(json!({
        "version": 3,
        "effects": [
            {"mod": "Blight", "id": "blight:zeta", "effect": "Zeta", "wiki": "z"},
            {"mod": "Minecraft", "id": "minecraft:poison", "effect": "Poison"}
        ]
    }))
    .unwrap();

    let divergence = canonicalize_document(&mut document, PRIVILEGED_MOD).unwrap();
    assert_eq!(divergence.index, 0);
    assert_eq!(divergence.current, "blight:zeta");
    assert_eq!(divergence.expected, "minecraft:poison");
    assert_eq!(
        divergence.to_string(),
        "index 0: current=blight:zeta expected=minecraft:poison"
    );

    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(value["version"], json!(3));
    assert_eq!(value["effects"][1]["wiki"], json!("z"));
    assert_eq!(ids(&document.effects), vec!["minecraft:poison", "blight:zeta"]);
}

const MODS: &[&str] = &["Minecraft", "Blight", "blight", "Aether", "Alex's Mobs"];

fn dataset() -> impl Strategy<Value = Vec<EffectRecord>> {
    prop::collection::vec((0..MODS.len(), "[A-Za-z ]{1,6}"), 0..24).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, (mod_index, effect))| {
                EffectRecord::new()
                    .with(Field::Mod, MODS[mod_index])
                    .with(Field::Id, format!("effect:{index}"))
                    .with(Field::Effect, effect)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_canonicalize_is_idempotent(records in dataset()) {
        let once = canonicalize(&records, PRIVILEGED_MOD);
        let twice = canonicalize(&once, PRIVILEGED_MOD);
        prop_assert_eq!(ids(&once), ids(&twice));
        prop_assert!(first_difference(&once, &twice).is_none());
    }

    #[test]
    fn prop_canonicalize_is_a_permutation(records in dataset()) {
        let ordered = canonicalize(&records, PRIVILEGED_MOD);
        let mut before = ids(&records);
        let mut after = ids(&ordered);
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_canonical_order_is_total(records in dataset()) {
        let ordered = canonicalize(&records, PRIVILEGED_MOD);
        for (i, a) in ordered.iter().enumerate() {
            for b in &ordered[i + 1..] {
                let (a_mod, b_mod) = (a.mod_str(), b.mod_str());
                if a_mod == b_mod {
                    prop_assert!(sort_key(a.effect_str()) <= sort_key(b.effect_str()));
                } else if a_mod != PRIVILEGED_MOD {
                    prop_assert!(b_mod != PRIVILEGED_MOD);
                    prop_assert!(sort_key(a_mod) <= sort_key(b_mod));
                }
            }
        }
    }

    #[test]
    fn prop_mod_partitions_are_contiguous(records in dataset()) {
        let ordered = canonicalize(&records, PRIVILEGED_MOD);
        let mut seen: Vec<&str> = Vec::new();
        for record in &ordered {
            let mod_name = record.mod_str();
            if seen.last() != Some(&mod_name) {
                prop_assert!(!seen.contains(&mod_name));
                seen.push(mod_name);
            }
        }
    }
}
