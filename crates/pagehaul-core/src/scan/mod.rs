//! DOM scanning: walk a parsed HTML document for downloadable media.
//!
//! The scanner produces raw candidates only; deduplication and metadata
//! reconciliation belong to the merge engine. Malformed URLs on individual
//! elements are skipped; only a pass-level failure (bad page URL, bad scope
//! selector) aborts the scan, and even then it is reported, not thrown.

mod page;

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use url::Url;

use crate::candidate::Candidate;
use crate::config::Settings;
use crate::url_meta;

/// Which media categories a scan collects, plus per-extension toggles and
/// the result cap. Snapshot of the relevant settings for one pass.
#[derive(Debug, Clone)]
pub struct ScanPolicy {
    pub images: bool,
    pub videos: bool,
    pub audio: bool,
    pub documents: bool,
    /// 0 means uncapped.
    pub max_files: usize,
    formats: BTreeMap<String, bool>,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            images: true,
            videos: true,
            audio: true,
            documents: true,
            max_files: 0,
            formats: BTreeMap::new(),
        }
    }
}

impl ScanPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            images: settings.include_images,
            videos: settings.include_videos,
            audio: settings.include_audio,
            documents: settings.include_documents,
            max_files: settings.max_files,
            formats: settings.formats.clone(),
        }
    }

    fn format_enabled(&self, extension: &str) -> bool {
        self.formats
            .get(&extension.to_ascii_lowercase())
            .copied()
            .unwrap_or(true)
    }
}

/// Outcome of one scan pass. A failed pass carries an empty file list and a
/// message; it never panics the caller into an unrecoverable state.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub files: Vec<Candidate>,
    pub error: Option<String>,
}

impl ScanReport {
    fn failure(err: anyhow::Error) -> Self {
        tracing::warn!("page scan failed: {err:#}");
        Self {
            files: Vec::new(),
            error: Some(format!("{err:#}")),
        }
    }
}

/// Scans a full HTML document. `base_ts` is the scan-pass base time in Unix
/// milliseconds; candidates get monotonically increasing timestamps from it.
pub fn scan_page(html: &str, page_url: &str, policy: &ScanPolicy, base_ts: u64) -> ScanReport {
    match scan_inner(html, page_url, None, policy, base_ts) {
        Ok(files) => ScanReport { files, error: None },
        Err(err) => ScanReport::failure(err),
    }
}

/// Scans only the subtree(s) matching `scope`: the restricted counterpart of
/// a full-page scan for when the caller has picked a region of the document.
pub fn scan_within(
    html: &str,
    page_url: &str,
    scope: &str,
    policy: &ScanPolicy,
    base_ts: u64,
) -> ScanReport {
    match scan_inner(html, page_url, Some(scope), policy, base_ts) {
        Ok(files) => ScanReport { files, error: None },
        Err(err) => ScanReport::failure(err),
    }
}

fn scan_inner(
    html: &str,
    page_url: &str,
    scope: Option<&str>,
    policy: &ScanPolicy,
    base_ts: u64,
) -> Result<Vec<Candidate>> {
    let base = Url::parse(page_url)
        .with_context(|| format!("invalid page URL: {page_url}"))?;

    let doc = Html::parse_document(html);
    let mut found = Vec::new();
    match scope {
        None => page::collect(doc.root_element(), &base, policy, &mut found),
        Some(css) => {
            let selector = Selector::parse(css)
                .map_err(|e| anyhow::anyhow!("invalid scope selector {css:?}: {e}"))?;
            for root in doc.select(&selector) {
                page::collect(root, &base, policy, &mut found);
            }
        }
    }

    let mut files: Vec<Candidate> = Vec::new();
    for hit in found {
        if let Some(ext) = url_meta::extension_of_url(hit.url.as_str()) {
            if !policy.format_enabled(&ext) {
                continue;
            }
        }
        let ts = base_ts + files.len() as u64;
        let mut candidate = Candidate::from_page(hit.url.into(), hit.kind, ts);
        candidate.size = hit.size;
        files.push(candidate);
    }

    if policy.max_files > 0 && files.len() > policy.max_files {
        tracing::debug!(
            "scan capped at {} files ({} found)",
            policy.max_files,
            files.len()
        );
        files.truncate(policy.max_files);
    }
    Ok(files)
}
