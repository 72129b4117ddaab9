//! `pagehaul watch` – periodic re-scan of the inputs.
//!
//! Each pass re-reads the page and capture files, re-merges, and reports how
//! the snapshot changed. Useful while a capture file is still being appended
//! to by an exporter.

use anyhow::Result;
use pagehaul_core::config::Settings;
use pagehaul_core::session::run_ticks;
use std::time::Duration;

use super::load_session;
use crate::cli::InputArgs;

pub async fn run_watch(
    settings: &Settings,
    inputs: &InputArgs,
    interval_secs: u64,
    passes: u64,
) -> Result<()> {
    let interval = Duration::from_secs(interval_secs.max(1));
    let mut last_count = 0usize;

    run_ticks(interval, |pass| {
        // Best-effort: a transiently unreadable input skips this tick.
        match load_session(settings, inputs) {
            Ok(session) => {
                let count = session.found().len();
                let delta = count as i64 - last_count as i64;
                if delta != 0 {
                    println!("pass {pass}: {count} file(s) ({delta:+})");
                    last_count = count;
                } else {
                    println!("pass {pass}: {count} file(s)");
                }
            }
            Err(err) => {
                tracing::warn!("refresh pass {pass} failed: {err:#}");
            }
        }
        Ok(passes == 0 || pass + 1 < passes)
    })
    .await
}
