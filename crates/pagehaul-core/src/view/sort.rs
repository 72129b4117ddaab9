//! Sort keys and comparators for the candidate view.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::candidate::Candidate;
use crate::estimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Time,
    Size,
    Name,
    Kind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortKey {
    /// The order users expect when first switching to this key: recent items
    /// and big files first, names and kind labels alphabetical.
    pub fn default_order(self) -> SortOrder {
        match self {
            SortKey::Time | SortKey::Size => SortOrder::Descending,
            SortKey::Name | SortKey::Kind => SortOrder::Ascending,
        }
    }
}

/// Ascending comparison on one key. Direction flips the comparator's sign,
/// not the tie-break behavior (the sort is stable).
pub(super) fn compare(a: &Candidate, b: &Candidate, key: SortKey) -> Ordering {
    match key {
        SortKey::Time => a.discovered_at.cmp(&b.discovered_at),
        SortKey::Size => estimate::effective_size(a).cmp(&estimate::effective_size(b)),
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Kind => a.kind.label().cmp(b.kind.label()),
    }
}

pub(super) fn sort(files: &mut [Candidate], key: SortKey, order: SortOrder) {
    files.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}
