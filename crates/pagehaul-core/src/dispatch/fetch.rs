//! Single-stream HTTP GET fetcher backed by the curl easy handle.
//!
//! Downloads into a `.part` temp file and atomically renames on success, so
//! a failed transfer never leaves a plausible-looking destination behind.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::Fetcher;

/// Temp path next to the destination (`photo.jpg` → `photo.jpg.part`).
fn temp_path(dest: &Path) -> PathBuf {
    let mut o = dest.as_os_str().to_owned();
    o.push(".part");
    PathBuf::from(o)
}

pub struct CurlFetcher {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirects: u32,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(3600),
            max_redirects: 10,
        }
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let part = temp_path(dest);
        let mut out = File::create(&part)
            .with_context(|| format!("create temp file: {}", part.display()))?;
        let written = Arc::new(AtomicU64::new(0));
        let written_cb = Arc::clone(&written);

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirects)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let outcome = {
            let mut transfer = easy.transfer();
            transfer.write_function(move |data| match out.write_all(data) {
                Ok(()) => {
                    written_cb.fetch_add(data.len() as u64, Ordering::Relaxed);
                    Ok(data.len())
                }
                Err(err) => {
                    tracing::warn!("write failed during download: {err}");
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform().context("GET request failed")
        };

        if let Err(err) = outcome {
            let _ = std::fs::remove_file(&part);
            return Err(err);
        }

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            let _ = std::fs::remove_file(&part);
            anyhow::bail!("GET {} returned HTTP {}", url, code);
        }

        std::fs::rename(&part, dest)
            .with_context(|| format!("finalize {}", dest.display()))?;
        Ok(written.load(Ordering::Relaxed))
    }
}
