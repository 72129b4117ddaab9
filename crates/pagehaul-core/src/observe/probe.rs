//! HTTP HEAD probing.
//!
//! Replaces heuristic candidate metadata with header-derived values before
//! a preview or a batch. Uses the curl easy handle; runs in the current
//! thread; call from `spawn_blocking` in async code.

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

use super::record::ResponseMeta;
use crate::candidate::Candidate;

/// Performs a HEAD request and returns the parsed response metadata.
/// Follows redirects.
pub fn probe(url: &str) -> Result<ResponseMeta> {
    let mut lines: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(Duration::from_secs(30))?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform().context("HEAD request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("HEAD {} returned HTTP {}", url, code);
    }

    Ok(ResponseMeta::from_header_lines(code as u16, &lines))
}

/// Probes each candidate and applies authoritative header data in place.
/// Individual probe failures are logged and skipped; the rest of the list
/// still gets confirmed.
pub fn confirm_candidates(files: &mut [Candidate]) {
    for file in files {
        match probe(&file.url) {
            Ok(meta) => meta.apply_to(file),
            Err(err) => tracing::warn!("probe failed for {}: {err:#}", file.url),
        }
    }
}
