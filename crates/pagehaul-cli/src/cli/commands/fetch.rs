//! `pagehaul fetch` – download the filtered candidates.

use anyhow::Result;
use pagehaul_core::config::Settings;
use pagehaul_core::dispatch::CurlFetcher;
use pagehaul_core::session::Command;
use std::path::PathBuf;
use std::sync::Arc;

use super::load_session;
use crate::cli::{FilterArgs, InputArgs};

pub async fn run_fetch(
    settings: &Settings,
    inputs: &InputArgs,
    filter: &FilterArgs,
    picks: Vec<String>,
    out: Option<PathBuf>,
    probe: bool,
) -> Result<()> {
    let state = filter.to_state()?;

    let mut session = load_session(settings, inputs)?;
    if probe {
        session = tokio::task::spawn_blocking(move || {
            session.confirm_sizes();
            session
        })
        .await?;
    }
    session.handle(Command::SetFilter(state));
    for url in picks {
        session.handle(Command::ToggleSelect(url));
    }

    let root = match out {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let report = session
        .start_download(&root, Arc::new(CurlFetcher::default()))
        .await;

    println!(
        "Download complete: {} succeeded, {} failed",
        report.succeeded, report.failed
    );
    Ok(())
}
