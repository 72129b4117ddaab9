//! HAR (HTTP Archive) ingestion.
//!
//! A DevTools HAR export is a recorded request/response stream, which is the
//! event source the observer consumes live. Replaying a HAR feeds each entry
//! through the same admission and confirmation path.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::record::ResponseMeta;
use super::{CaptureId, NetworkObserver};

#[derive(Debug, Deserialize)]
struct HarLog {
    log: HarRoot,
}

#[derive(Debug, Deserialize)]
struct HarRoot {
    #[serde(default)]
    entries: Vec<HarEntry>,
}

#[derive(Debug, Deserialize)]
struct HarEntry {
    #[serde(default, rename = "startedDateTime")]
    started_date_time: Option<String>,
    request: HarRequest,
    response: HarResponse,
}

#[derive(Debug, Deserialize)]
struct HarRequest {
    url: String,
}

#[derive(Debug, Deserialize)]
struct HarResponse {
    #[serde(default)]
    status: u16,
    #[serde(default)]
    headers: Vec<HarHeader>,
    #[serde(default)]
    content: Option<HarContent>,
}

#[derive(Debug, Deserialize)]
struct HarHeader {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct HarContent {
    #[serde(default, rename = "mimeType")]
    mime_type: Option<String>,
}

/// Replays a HAR file into the observer under `capture`. Entry timestamps
/// come from `startedDateTime` when parseable, else fall back to `base_ts`
/// plus the entry index. Returns the capture's record count afterwards.
///
/// The caller controls the capture lifecycle; monitoring must already be
/// started for admission to happen.
pub fn replay_har(
    observer: &mut NetworkObserver,
    capture: CaptureId,
    path: &Path,
    base_ts: u64,
) -> Result<usize> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read HAR file: {}", path.display()))?;
    let har: HarLog = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse HAR JSON: {}", path.display()))?;

    let entries = har.log.entries;
    if entries.is_empty() {
        tracing::warn!("HAR file has no entries: {}", path.display());
        return Ok(observer.record_count(capture));
    }

    for (index, entry) in entries.iter().enumerate() {
        let ts = entry
            .started_date_time
            .as_deref()
            .and_then(entry_time_ms)
            .unwrap_or(base_ts + index as u64);

        observer.on_request(capture, &entry.request.url, ts);

        let mut meta = ResponseMeta::from_header_pairs(
            entry.response.status,
            entry
                .response
                .headers
                .iter()
                .map(|h| (h.name.as_str(), h.value.as_str())),
        );
        // Some exporters omit the Content-Type header but fill content.mimeType.
        if meta.content_type.is_none() {
            meta.content_type = entry
                .response
                .content
                .as_ref()
                .and_then(|c| c.mime_type.clone())
                .filter(|m| !m.is_empty());
        }
        observer.on_response(capture, &entry.request.url, &meta, ts);
    }

    Ok(observer.record_count(capture))
}

fn entry_time_ms(started: &str) -> Option<u64> {
    let parsed = OffsetDateTime::parse(started, &Rfc3339).ok()?;
    let ms = parsed.unix_timestamp_nanos() / 1_000_000;
    u64::try_from(ms).ok()
}
