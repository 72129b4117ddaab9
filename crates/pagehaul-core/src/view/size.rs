//! Size buckets for the layered filter.

use serde::{Deserialize, Serialize};

pub const MIB: u64 = 1024 * 1024;

/// A validated custom byte range. `min` inclusive; `max` inclusive when
/// present, unbounded above when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: u64,
    pub max: Option<u64>,
}

/// Rejected at the boundary, before a range ever reaches the filter engine.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("empty size range: max ({max}) must be greater than min ({min})")]
pub struct InvalidSizeRange {
    pub min: u64,
    pub max: u64,
}

impl SizeRange {
    pub fn new(min: u64, max: Option<u64>) -> Result<Self, InvalidSizeRange> {
        if let Some(max) = max {
            if max <= min {
                return Err(InvalidSizeRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    fn contains(&self, size: u64) -> bool {
        if size < self.min {
            return false;
        }
        match self.max {
            // An inverted range can only get here through direct struct
            // construction; treat it as unbounded above rather than
            // filtering everything out.
            Some(max) if max > self.min => size <= max,
            _ => true,
        }
    }
}

/// Size predicate of the filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeFilter {
    #[default]
    All,
    /// Under 1 MiB.
    Small,
    /// 1–10 MiB.
    Medium,
    /// Over 10 MiB.
    Large,
    Custom(SizeRange),
}

impl SizeFilter {
    pub fn matches(&self, effective_size: u64) -> bool {
        match self {
            SizeFilter::All => true,
            SizeFilter::Small => effective_size < MIB,
            SizeFilter::Medium => (MIB..=10 * MIB).contains(&effective_size),
            SizeFilter::Large => effective_size > 10 * MIB,
            SizeFilter::Custom(range) => range.contains(effective_size),
        }
    }
}
