//! Data model for the curated status-effect dataset.
//!
//! The dataset is a single JSON document holding one `effects` collection.
//! Every entry is an [`EffectRecord`]; the whole document is an
//! [`EffectsDocument`]. Records keep their JSON objects as loaded so that
//! absent, `null`, or mistyped values reach the validators instead of
//! failing deserialization, and a rewrite only moves records around.

pub mod document;
pub mod level;
pub mod record;

pub use document::EffectsDocument;
pub use level::MaxLevel;
pub use record::{
    EffectRecord, Field, PRIVILEGED_MOD, TAG_NEGATIVE, TAG_POSITIVE, TAG_SCALING, sort_key,
};
