//! Per-URL network records and the provisional → confirmed state machine.

use crate::candidate::{Candidate, FileKind, Source};
use crate::url_meta;

/// Lifecycle of a record. A record enters as `Provisional` (URL heuristic
/// only) and becomes `Confirmed` once response headers are seen. It never
/// regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Provisional,
    Confirmed,
}

/// The response-side metadata a record is reconciled against.
#[derive(Debug, Clone, Default)]
pub struct ResponseMeta {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub content_disposition: Option<String>,
}

impl ResponseMeta {
    /// Builds from header name/value pairs (HAR entries, probe captures).
    pub fn from_header_pairs<'a, I>(status: u16, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut meta = ResponseMeta {
            status,
            ..Default::default()
        };
        for (name, value) in pairs {
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                meta.content_type = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    meta.content_length = Some(n);
                }
            } else if name.eq_ignore_ascii_case("content-disposition") {
                meta.content_disposition = Some(value.to_string());
            }
        }
        meta
    }

    /// Builds from raw `Name: value` response lines (curl header callback).
    pub fn from_header_lines(status: u16, lines: &[String]) -> Self {
        let pairs = lines.iter().filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim(), value.trim()))
        });
        Self::from_header_pairs(status, pairs)
    }

    /// True when the content type classifies as actual media.
    pub fn is_media(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| FileKind::from_mime(ct) != FileKind::Unknown)
            .unwrap_or(false)
    }

    /// Applies authoritative header data to a candidate: header size always
    /// wins, MIME classification corrects the kind, and the filename is
    /// rewritten when its extension disagrees with the MIME type.
    pub fn apply_to(&self, candidate: &mut Candidate) {
        if let Some(len) = self.content_length {
            candidate.size = Some(len);
        }
        if let Some(ct) = &self.content_type {
            candidate.mime_type = Some(ct.clone());
            let kind = FileKind::from_mime(ct);
            if kind != FileKind::Unknown {
                candidate.kind = kind;
            }
            if let Some(name) = self
                .content_disposition
                .as_deref()
                .and_then(url_meta::parse_content_disposition_filename)
            {
                candidate.name = url_meta::sanitize_filename(&name);
            }
            candidate.name = backfill_extension(&candidate.name, ct);
        }
    }
}

/// One observed URL within a capture.
#[derive(Debug, Clone)]
pub struct NetRecord {
    pub url: String,
    pub phase: Phase,
    pub kind: FileKind,
    pub name: String,
    pub size: Option<u64>,
    pub mime_type: Option<String>,
    pub seen_at: u64,
}

impl NetRecord {
    pub fn provisional(url: String, kind: FileKind, seen_at: u64) -> Self {
        let name = url_meta::derive_filename(&url, None);
        Self {
            url,
            phase: Phase::Provisional,
            kind,
            name,
            size: None,
            mime_type: None,
            seen_at,
        }
    }

    /// Reconciles the record in place from response headers.
    pub fn confirm(&mut self, meta: &ResponseMeta) {
        self.phase = Phase::Confirmed;
        if let Some(len) = meta.content_length {
            self.size = Some(len);
        }
        if let Some(ct) = &meta.content_type {
            self.mime_type = Some(ct.clone());
            let kind = FileKind::from_mime(ct);
            if kind != FileKind::Unknown {
                // MIME classification beats the request-time URL guess.
                self.kind = kind;
            }
            if let Some(name) = meta
                .content_disposition
                .as_deref()
                .and_then(url_meta::parse_content_disposition_filename)
            {
                self.name = url_meta::sanitize_filename(&name);
            }
            self.name = backfill_extension(&self.name, ct);
        }
    }

    pub fn to_candidate(&self) -> Candidate {
        Candidate {
            url: self.url.clone(),
            kind: self.kind,
            name: self.name.clone(),
            size: self.size,
            mime_type: self.mime_type.clone(),
            source: Source::Network,
            discovered_at: self.seen_at,
        }
    }
}

/// Rewrites `name` so its extension is consistent with `mime`: an extension
/// of the same media kind is left alone, anything else is stripped and the
/// MIME-derived extension appended.
fn backfill_extension(name: &str, mime: &str) -> String {
    let Some(mime_ext) = url_meta::extension_for_mime(mime) else {
        return name.to_string();
    };
    let mime_kind = FileKind::from_mime(mime);
    if let Some(current) = url_meta::extension_of_name(name) {
        if current == mime_ext || FileKind::from_extension(&current) == mime_kind {
            return name.to_string();
        }
    }
    format!("{}.{mime_ext}", url_meta::strip_extension(name))
}
