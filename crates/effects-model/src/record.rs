//! A single status-effect entry.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::level::MaxLevel;

/// The base-game origin; its records head the canonical order.
pub const PRIVILEGED_MOD: &str = "Minecraft";

pub const TAG_POSITIVE: &str = "positive";
pub const TAG_NEGATIVE: &str = "negative";
pub const TAG_SCALING: &str = "scaling";

/// Case-insensitive key used for every ordering comparison.
pub fn sort_key(value: &str) -> String {
    value.to_lowercase()
}

/// One status-effect entry exactly as stored in the dataset document.
///
/// The record keeps its JSON object untouched: key order, explicit `null`s,
/// unknown keys, and values of the wrong type all survive a load and save.
/// Schema fields are read through [`Field`] accessors, so a record with a
/// missing or mistyped value still loads and is reported by the field checks
/// under its `effect` name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectRecord {
    fields: Map<String, Value>,
}

impl EffectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, keeping its position if it already exists.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<Value>) {
        self.fields.insert(field.as_str().to_string(), value.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<Value> {
        self.fields.shift_remove(field.as_str())
    }

    /// Raw value of a schema field; `Some(Value::Null)` for an explicit null.
    pub fn value(&self, field: Field) -> Option<&Value> {
        self.fields.get(field.as_str())
    }

    /// Every key of the record, schema or not, in document order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    fn string(&self, field: Field) -> Option<&str> {
        self.value(field).and_then(Value::as_str)
    }

    /// Origin grouping key, empty when absent.
    pub fn mod_str(&self) -> &str {
        self.string(Field::Mod).unwrap_or_default()
    }

    /// Display name, empty when absent.
    pub fn effect_str(&self) -> &str {
        self.string(Field::Effect).unwrap_or_default()
    }

    pub fn id_str(&self) -> &str {
        self.string(Field::Id).unwrap_or_default()
    }

    pub fn description_str(&self) -> &str {
        self.string(Field::Description).unwrap_or_default()
    }

    pub fn source_str(&self) -> &str {
        self.string(Field::Source).unwrap_or_default()
    }

    /// `maxLevel` when it is a string.
    pub fn max_level_str(&self) -> Option<&str> {
        self.string(Field::MaxLevel)
    }

    /// Name used in diagnostics; falls back to the id, then a placeholder.
    pub fn display_name(&self) -> &str {
        match (self.string(Field::Effect), self.string(Field::Id)) {
            (Some(effect), _) if !effect.trim().is_empty() => effect,
            (_, Some(id)) if !id.trim().is_empty() => id,
            _ => "<unnamed>",
        }
    }

    /// Parsed `maxLevel`, `None` when absent or not a numeral I..X.
    pub fn level(&self) -> Option<MaxLevel> {
        self.max_level_str().and_then(MaxLevel::parse)
    }

    /// True when `maxLevel` is anything other than exactly `I`.
    ///
    /// An absent or malformed level counts as scaling; the field checks
    /// report the malformed value separately.
    pub fn is_scaling(&self) -> bool {
        self.max_level_str() != Some(MaxLevel::I.as_str())
    }

    /// String entries of `tags`; other entries are skipped.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.value(Field::Tags)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().any(|t| t == tag)
    }
}

/// Schema fields addressable in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Mod,
    Id,
    Effect,
    MaxLevel,
    Type,
    Tags,
    Description,
    Source,
}

impl Field {
    /// Required fields in document order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Mod,
            Self::Id,
            Self::Effect,
            Self::MaxLevel,
            Self::Type,
            Self::Tags,
            Self::Description,
            Self::Source,
        ]
    }

    /// Key used in the JSON document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mod => "mod",
            Self::Id => "id",
            Self::Effect => "effect",
            Self::MaxLevel => "maxLevel",
            Self::Type => "type",
            Self::Tags => "tags",
            Self::Description => "description",
            Self::Source => "source",
        }
    }

    /// What a well-typed value of this field looks like.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::MaxLevel => "a Roman numeral from I to X",
            Self::Tags => "a list of tag names",
            _ => "text",
        }
    }

    /// Text value of a string field; `None` for `tags`, an absent value, or
    /// a value of another JSON type.
    pub fn text<'a>(&self, record: &'a EffectRecord) -> Option<&'a str> {
        match self {
            Self::Tags => None,
            _ => record.string(*self),
        }
    }

    /// Whether the field holds anything: non-whitespace text, at least one
    /// tag, or a value of another type (reported by [`Field::mistyped`]).
    pub fn is_populated(&self, record: &EffectRecord) -> bool {
        match record.value(*self) {
            None | Some(Value::Null) => false,
            Some(Value::String(text)) => !text.trim().is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }

    /// The value rendered as JSON when its type does not fit the schema:
    /// anything but a string, or for `tags` anything but a list of strings.
    pub fn mistyped(&self, record: &EffectRecord) -> Option<String> {
        let value = record.value(*self)?;
        let fits = match (self, value) {
            (_, Value::Null) => true,
            (Self::Tags, Value::Array(items)) => items.iter().all(Value::is_string),
            (Self::Tags, _) => false,
            (_, value) => value.is_string(),
        };
        (!fits).then(|| value.to_string())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
