// src/status/snapshot.rs

//! Point-in-time status snapshots and the change detector.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::Metadata;

use super::fields::WatchedField;

/// Immutable record of the watched fields of one path at one poll instant.
///
/// Holds only the fields the owning target watches; interpolation and
/// comparison both operate on this subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub exists: bool,
    values: BTreeMap<WatchedField, i64>,
}

impl StatusSnapshot {
    /// Capture the given fields from a raw status record.
    pub fn capture(meta: &Metadata, fields: &BTreeSet<WatchedField>) -> Self {
        let values = fields
            .iter()
            .map(|field| (*field, field.value_from(meta)))
            .collect();
        Self {
            exists: true,
            values,
        }
    }

    /// Build a snapshot from explicit field values (used by scripted
    /// status sources).
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (WatchedField, i64)>,
    {
        Self {
            exists: true,
            values: values.into_iter().collect(),
        }
    }

    pub fn value(&self, field: WatchedField) -> Option<i64> {
        self.values.get(&field).copied()
    }
}

/// Fields in `fields` whose values differ between the stored baseline and
/// the current snapshot (empty = no change).
///
/// An absent baseline means this is the first successful sample for the
/// target: there is nothing to compare against, so the sample only
/// establishes the baseline and nothing triggers.
pub fn changed_fields(
    previous: Option<&StatusSnapshot>,
    current: &StatusSnapshot,
    fields: &BTreeSet<WatchedField>,
) -> Vec<WatchedField> {
    let Some(previous) = previous else {
        return Vec::new();
    };

    fields
        .iter()
        .copied()
        .filter(|field| previous.value(*field) != current.value(*field))
        .collect()
}
