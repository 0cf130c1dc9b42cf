//! Canonical ordering of the effects dataset.
//!
//! The canonical order puts the privileged mod's records first, then every
//! other mod as one contiguous partition. Partitions are ordered by mod name
//! and records within a partition by effect name, both case-insensitively
//! and stably, so records with equal keys keep their input order.

mod canonical;

pub use canonical::{
    Divergence, canonicalize, canonicalize_document, first_difference, is_canonical,
};
