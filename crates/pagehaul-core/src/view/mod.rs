//! Filter/sort engine: the pure view over a merged candidate collection.
//!
//! `view(all, state)` is side-effect free and deterministic, safe to call on
//! every render. Filter stages narrow in a fixed order (source, kind, size,
//! format), then a stable sort imposes the display order.

mod size;
mod sort;

pub use size::{InvalidSizeRange, SizeFilter, SizeRange, MIB};
pub use sort::{SortKey, SortOrder};

use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, FileKind};
use crate::estimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    #[default]
    All,
    /// Keeps records the page scanner saw (`page` or `both`).
    Page,
    /// Keeps records the network observer saw (`network` or `both`).
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KindFilter {
    #[default]
    All,
    Only(FileKind),
}

/// Session-scoped filter and sort state. Never persisted; a fresh preview
/// starts from `FilterState::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub source: SourceFilter,
    pub kind: KindFilter,
    pub size: SizeFilter,
    /// Exact (case-insensitive) extension match, e.g. `"png"`.
    pub format: Option<String>,
    pub sort: SortKey,
    pub order: SortOrder,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            source: SourceFilter::All,
            kind: KindFilter::All,
            size: SizeFilter::All,
            format: None,
            sort: SortKey::Time,
            order: SortKey::Time.default_order(),
        }
    }
}

/// Applies the layered filter and sort, producing the list the user acts on.
pub fn view(all: &[Candidate], state: &FilterState) -> Vec<Candidate> {
    let mut files: Vec<Candidate> = all
        .iter()
        .filter(|c| matches_source(c, state.source))
        .filter(|c| match state.kind {
            KindFilter::All => true,
            KindFilter::Only(kind) => c.kind == kind,
        })
        .filter(|c| state.size.matches(estimate::effective_size(c)))
        .filter(|c| matches_format(c, state.format.as_deref()))
        .cloned()
        .collect();
    sort::sort(&mut files, state.sort, state.order);
    files
}

fn matches_source(c: &Candidate, filter: SourceFilter) -> bool {
    match filter {
        SourceFilter::All => true,
        SourceFilter::Page => c.source.includes_page(),
        SourceFilter::Network => c.source.includes_network(),
    }
}

fn matches_format(c: &Candidate, format: Option<&str>) -> bool {
    let Some(format) = format else {
        return true;
    };
    match c.extension() {
        Some(ext) => ext.eq_ignore_ascii_case(format),
        None => false,
    }
}
