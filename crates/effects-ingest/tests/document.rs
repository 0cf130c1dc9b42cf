//! Integration tests for document loading and saving.

use std::fs;

use effects_ingest::{
    IngestError, load_document, parse_document, render_document, save_document,
};
use effects_model::{EffectRecord, EffectsDocument, Field};
use tempfile::TempDir;

fn record(mod_name: &str, id: &str, effect: &str) -> EffectRecord {
    EffectRecord::new()
        .with(Field::Mod, mod_name)
        .with(Field::Id, id)
        .with(Field::Effect, effect)
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("effects.json");

    let err = load_document(&path).unwrap_err();
    assert!(matches!(err, IngestError::DocumentNotFound { .. }));
}

#[test]
fn test_invalid_json_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("effects.json");
    fs::write(&path, "{ \"effects\": [ }").unwrap();

    let err = load_document(&path).unwrap_err();
    assert!(matches!(err, IngestError::DocumentMalformed { .. }));
}

#[test]
fn test_missing_collection_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("effects.json");
    fs::write(&path, "{\"effect\": []}").unwrap();

    let err = load_document(&path).unwrap_err();
    assert!(matches!(err, IngestError::DocumentMalformed { .. }));
    assert!(err.to_string().contains("effects"));
}

#[test]
fn test_rendered_document_layout() {
    let document = EffectsDocument::new(vec![record("Blight", "blight:frost", "Gefrierbrand ❄")]);

    let text = render_document(&document).unwrap();

    assert!(text.ends_with("}\n"));
    assert!(text.contains("Gefrierbrand ❄"));
    assert!(!text.contains("\\u"));
    assert!(text.contains("\n  \"effects\": [\n    {\n      \"mod\": \"Blight\","));
}

#[test]
fn test_save_then_load_preserves_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("effects.json");
    fs::write(
        &path,
        r##"{"effects": [{"mod": "Blight", "id": "blight:a", "effect": "Alpha", "color": "#ff0000"}], "updated": "2024-05-01"}"##,
    )
    .unwrap();

    let document = load_document(&path).unwrap();
    save_document(&path, &document).unwrap();
    let reloaded = load_document(&path).unwrap();

    assert_eq!(reloaded, document);
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"color\": \"#ff0000\""));
    assert!(text.contains("\"updated\": \"2024-05-01\""));
}

#[test]
fn test_explicit_null_survives_rewrite() {
    let text = concat!(
        "{\n",
        "  \"effects\": [\n",
        "    {\n",
        "      \"mod\": \"Blight\",\n",
        "      \"id\": \"blight:a\",\n",
        "      \"effect\": \"Alpha\",\n",
        "      \"description\": null\n",
        "    }\n",
        "  ]\n",
        "}\n",
    );
    let path = std::path::Path::new("effects.json");

    let document = parse_document(path, text).unwrap();
    assert_eq!(
        document.effects[0].value(Field::Description),
        Some(&serde_json::Value::Null)
    );
    assert_eq!(render_document(&document).unwrap(), text);
}

#[test]
fn test_mistyped_fields_load_and_round_trip() {
    let text = concat!(
        "{\n",
        "  \"effects\": [\n",
        "    {\n",
        "      \"tags\": \"positive\",\n",
        "      \"mod\": \"Blight\",\n",
        "      \"effect\": \"Alpha\",\n",
        "      \"maxLevel\": 2\n",
        "    }\n",
        "  ]\n",
        "}\n",
    );
    let path = std::path::Path::new("effects.json");

    let document = parse_document(path, text).unwrap();
    assert_eq!(document.effects[0].effect_str(), "Alpha");
    assert_eq!(render_document(&document).unwrap(), text);
}
