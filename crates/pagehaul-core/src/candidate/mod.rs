//! Candidate file records: the unit of media discovery.
//!
//! A candidate is a plain serializable record (URL, kind, name, size,
//! provenance, discovery time). It carries no document handles, so it can
//! cross process or serialization boundaries as-is.

mod kind;

pub use kind::{
    FileKind, AUDIO_EXTENSIONS, DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS,
};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::url_meta;

/// Which discovery mechanism produced a candidate. Promotion is one-way:
/// `Page` or `Network` individually, `Both` once both have seen the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Page,
    Network,
    Both,
}

impl Source {
    pub fn includes_page(self) -> bool {
        matches!(self, Source::Page | Source::Both)
    }

    pub fn includes_network(self) -> bool {
        matches!(self, Source::Network | Source::Both)
    }

    pub fn label(self) -> &'static str {
        match self {
            Source::Page => "page",
            Source::Network => "network",
            Source::Both => "both",
        }
    }
}

/// A discovered, not-yet-downloaded reference to a remote media file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Absolute URL; the canonical key within one merged collection.
    pub url: String,
    pub kind: FileKind,
    /// Best-effort display filename. Guaranteed to carry an extension only
    /// after `dispatch::destination_for` finalizes it.
    pub name: String,
    /// Size in bytes. Authoritative when it came from a response header,
    /// a rough estimate when it came from element dimensions, else `None`.
    pub size: Option<u64>,
    pub mime_type: Option<String>,
    pub source: Source,
    /// Discovery time in Unix milliseconds, monotonic within one scan pass.
    pub discovered_at: u64,
}

impl Candidate {
    /// New page-sourced candidate with a display name derived from the URL.
    pub fn from_page(url: String, kind: FileKind, discovered_at: u64) -> Self {
        let name = url_meta::derive_filename(&url, None);
        Self {
            url,
            kind,
            name,
            size: None,
            mime_type: None,
            source: Source::Page,
            discovered_at,
        }
    }

    /// Lowercased extension of the URL path, if any.
    pub fn extension(&self) -> Option<String> {
        url_meta::extension_of_url(&self.url)
    }

    /// Human-readable `HH:MM` discovery time (UTC).
    pub fn time_label(&self) -> String {
        let secs = (self.discovered_at / 1000) as i64;
        match OffsetDateTime::from_unix_timestamp(secs) {
            Ok(t) => format!("{:02}:{:02}", t.hour(), t.minute()),
            Err(_) => "--:--".to_string(),
        }
    }
}
