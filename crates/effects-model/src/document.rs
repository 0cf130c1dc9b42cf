//! The persisted dataset document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::EffectRecord;

/// Top-level document: the `effects` collection plus any other root keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectsDocument {
    pub effects: Vec<EffectRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EffectsDocument {
    pub fn new(effects: Vec<EffectRecord>) -> Self {
        Self {
            effects,
            extra: Map::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
