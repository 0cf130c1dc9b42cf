//! Tests for effects-model serialization.

use effects_model::{EffectRecord, EffectsDocument, Field, MaxLevel, PRIVILEGED_MOD};

const SAMPLE: &str = r#"{
  "effects": [
    {
      "mod": "Minecraft",
      "id": "minecraft:regeneration",
      "effect": "Regeneration",
      "maxLevel": "II",
      "type": "Beneficial",
      "tags": ["positive", "scaling"],
      "description": "Restores health every <b>2.5 seconds</b>.",
      "source": "Brewing",
      "wiki": "https://minecraft.wiki/w/Regeneration"
    }
  ],
  "version": 3
}"#;

#[test]
fn deserializes_renamed_fields() {
    let doc: EffectsDocument = serde_json::from_str(SAMPLE).expect("parse sample");
    assert_eq!(doc.len(), 1);
    let record = &doc.effects[0];
    assert_eq!(record.mod_str(), PRIVILEGED_MOD);
    assert_eq!(record.id_str(), "minecraft:regeneration");
    assert_eq!(record.level(), Some(MaxLevel::II));
    assert_eq!(Field::Type.text(record), Some("Beneficial"));
    assert!(record.has_tag("scaling"));
}

#[test]
fn keeps_unknown_keys() {
    let doc: EffectsDocument = serde_json::from_str(SAMPLE).expect("parse sample");
    assert_eq!(doc.extra.get("version"), Some(&serde_json::json!(3)));
    assert!(doc.effects[0].fields().contains_key("wiki"));

    let json = serde_json::to_value(&doc).expect("serialize");
    assert_eq!(json["version"], 3);
    assert_eq!(
        json["effects"][0]["wiki"],
        "https://minecraft.wiki/w/Regeneration"
    );
    assert_eq!(json["effects"][0]["maxLevel"], "II");
}

#[test]
fn null_stays_distinct_from_missing() {
    let doc: EffectsDocument = serde_json::from_str(
        r#"{"effects": [{"mod": "Blight", "effect": "Zeta", "description": null}]}"#,
    )
    .expect("parse partial record");
    let record: &EffectRecord = &doc.effects[0];
    assert_eq!(record.value(Field::Description), Some(&serde_json::Value::Null));
    assert_eq!(record.value(Field::Tags), None);
    assert!(!Field::Description.is_populated(record));
    assert!(Field::Mod.is_populated(record));

    let json = serde_json::to_string(&doc).expect("serialize");
    assert_eq!(
        json,
        r#"{"effects":[{"mod":"Blight","effect":"Zeta","description":null}]}"#
    );
}

#[test]
fn mistyped_fields_still_load() {
    let doc: EffectsDocument = serde_json::from_str(
        r#"{"effects": [{"mod": "Blight", "effect": "Zeta", "maxLevel": 2, "tags": "positive"}]}"#,
    )
    .expect("parse mistyped record");
    let record = &doc.effects[0];
    assert_eq!(record.level(), None);
    assert_eq!(Field::MaxLevel.mistyped(record), Some("2".to_string()));
    assert_eq!(Field::Tags.mistyped(record), Some("\"positive\"".to_string()));
}

#[test]
fn record_keys_keep_document_order() {
    let doc: EffectsDocument = serde_json::from_str(
        r#"{"effects": [{"source": "Brewing", "wiki": "x", "mod": "Blight"}]}"#,
    )
    .expect("parse record");
    let keys: Vec<&str> = doc.effects[0].fields().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["source", "wiki", "mod"]);
}

#[test]
fn missing_collection_is_an_error() {
    let result: Result<EffectsDocument, _> = serde_json::from_str(r#"{"items": []}"#);
    assert!(result.is_err());
}
