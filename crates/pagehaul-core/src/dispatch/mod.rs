//! Download dispatch: sequential, throttled, failure-isolated.
//!
//! One batch issues one request per selected file, in order, with a fixed
//! pause after every attempt: a deliberate throttle against host rate
//! limits, not a missing optimization. A failing file is counted and the
//! batch moves on; nothing is retried automatically.

mod dest;
mod fetch;

pub use dest::{batch_stamp, destination_for, resolved_extension, unique_path};
pub use fetch::CurlFetcher;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::candidate::Candidate;
use crate::config::Settings;

/// Aggregate outcome of one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// The one seam to the actual transfer. Implementations are blocking; the
/// dispatcher drives them through `spawn_blocking`.
pub trait Fetcher: Send + Sync {
    /// Downloads `url` to exactly `dest`, returning bytes written.
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Runs one download batch under `root`.
///
/// Honors the settings snapshot: `max_files` silently caps the batch,
/// `download_delay_ms` paces it, naming strategy and subfolder shape the
/// destinations. Existing destination paths are uniquified, never
/// overwritten.
pub async fn run_batch(
    files: &[Candidate],
    settings: &Settings,
    root: &Path,
    fetcher: Arc<dyn Fetcher>,
) -> BatchReport {
    let capped = if settings.max_files > 0 && files.len() > settings.max_files {
        tracing::info!(
            "batch capped at {} of {} selected files",
            settings.max_files,
            files.len()
        );
        &files[..settings.max_files]
    } else {
        files
    };

    let stamp = batch_stamp(now_ms());
    let delay = Duration::from_millis(settings.download_delay_ms);
    let mut report = BatchReport::default();

    for (index, file) in capped.iter().enumerate() {
        match fetch_one(file, index, settings, &stamp, root, &fetcher).await {
            Ok((dest, bytes)) => {
                tracing::info!("downloaded {} -> {} ({bytes} bytes)", file.url, dest.display());
                report.succeeded += 1;
            }
            Err(err) => {
                tracing::warn!("download failed for {}: {err:#}", file.url);
                report.failed += 1;
            }
        }
        // Fixed pause after each request, success or not.
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }
    }

    tracing::info!(
        "batch complete: {} succeeded, {} failed",
        report.succeeded,
        report.failed
    );
    report
}

async fn fetch_one(
    file: &Candidate,
    index: usize,
    settings: &Settings,
    stamp: &str,
    root: &Path,
    fetcher: &Arc<dyn Fetcher>,
) -> Result<(PathBuf, u64)> {
    let dest = unique_path(&destination_for(file, index, settings, stamp, root));
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let bytes = tokio::task::spawn_blocking({
        let fetcher = Arc::clone(fetcher);
        let url = file.url.clone();
        let dest = dest.clone();
        move || fetcher.fetch(&url, &dest)
    })
    .await
    .map_err(|e| anyhow::anyhow!("download task join: {e}"))??;

    Ok((dest, bytes))
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
