//! Passive network observation.
//!
//! One `NetworkObserver` owns all per-capture state, keyed by capture id
//! (a browser tab, a HAR replay, a proxy session: anything that produces a
//! request/response stream). Lifecycle is explicit: starting a capture
//! clears its stale records, stopping only halts new admission, and closing
//! a capture evicts its state entirely so memory stays bounded.

mod har;
mod heuristic;
mod probe;
mod record;

pub use har::replay_har;
pub use probe::{confirm_candidates, probe};
pub use record::{NetRecord, Phase, ResponseMeta};

use std::collections::HashMap;

use crate::candidate::Candidate;
use crate::url_meta;

/// Identifies one observed request/response stream.
pub type CaptureId = u64;

#[derive(Debug, Default)]
struct Capture {
    monitoring: bool,
    records: HashMap<String, NetRecord>,
}

#[derive(Debug, Default)]
pub struct NetworkObserver {
    captures: HashMap<CaptureId, Capture>,
}

impl NetworkObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) monitoring a capture. Idempotent; always clears
    /// previously collected records for that capture.
    pub fn start_monitoring(&mut self, id: CaptureId) {
        let capture = self.captures.entry(id).or_default();
        capture.monitoring = true;
        capture.records.clear();
        tracing::debug!("network monitoring started for capture {id}");
    }

    /// Stops monitoring. Idempotent; already-collected records survive.
    pub fn stop_monitoring(&mut self, id: CaptureId) {
        if let Some(capture) = self.captures.get_mut(&id) {
            capture.monitoring = false;
        }
    }

    pub fn is_monitoring(&self, id: CaptureId) -> bool {
        self.captures.get(&id).map(|c| c.monitoring).unwrap_or(false)
    }

    /// Capture teardown (tab closed): evicts all state for the id.
    pub fn capture_closed(&mut self, id: CaptureId) {
        self.captures.remove(&id);
    }

    /// Outbound request: admits a provisional record when the URL looks like
    /// media. Returns whether a record now exists for the URL.
    pub fn on_request(&mut self, id: CaptureId, url: &str, now_ms: u64) -> bool {
        let Some(capture) = self.captures.get_mut(&id) else {
            return false;
        };
        if !capture.monitoring {
            return false;
        }
        let Some(parsed) = url_meta::absolute_media_url(url, None) else {
            return false;
        };
        if capture.records.contains_key(parsed.as_str()) {
            return true;
        }
        let Some(kind) = heuristic::media_hint(&parsed) else {
            return false;
        };
        let record = NetRecord::provisional(parsed.to_string(), kind, now_ms);
        capture.records.insert(record.url.clone(), record);
        true
    }

    /// Response arrival: reconciles an existing record in place, or admits a
    /// late one when the content type alone proves this was media the URL
    /// heuristic missed. Existing records reconcile even after `stop`; only
    /// admission counts as new capture.
    pub fn on_response(&mut self, id: CaptureId, url: &str, meta: &ResponseMeta, now_ms: u64) {
        let Some(capture) = self.captures.get_mut(&id) else {
            return;
        };
        let Some(parsed) = url_meta::absolute_media_url(url, None) else {
            return;
        };
        if let Some(record) = capture.records.get_mut(parsed.as_str()) {
            record.confirm(meta);
            return;
        }
        if !capture.monitoring || !meta.is_media() {
            return;
        }
        let mut record =
            NetRecord::provisional(parsed.to_string(), crate::candidate::FileKind::Unknown, now_ms);
        record.confirm(meta);
        capture.records.insert(record.url.clone(), record);
    }

    /// Snapshot of a capture's records as candidates, newest first.
    pub fn files(&self, id: CaptureId) -> Vec<Candidate> {
        let Some(capture) = self.captures.get(&id) else {
            return Vec::new();
        };
        let mut files: Vec<Candidate> = capture.records.values().map(NetRecord::to_candidate).collect();
        files.sort_by(|a, b| b.discovered_at.cmp(&a.discovered_at).then(a.url.cmp(&b.url)));
        files
    }

    pub fn record_count(&self, id: CaptureId) -> usize {
        self.captures.get(&id).map(|c| c.records.len()).unwrap_or(0)
    }
}
