//! `pagehaul list` – merged, filtered, sorted preview of all inputs.

use anyhow::Result;
use pagehaul_core::config::Settings;
use pagehaul_core::session::{Command, Reply};

use super::{load_session, print_files, print_json};
use crate::cli::{FilterArgs, InputArgs};

pub async fn run_list(
    settings: &Settings,
    inputs: &InputArgs,
    filter: &FilterArgs,
    probe: bool,
    json: bool,
) -> Result<()> {
    // Validate the filter first: a bad custom range never touches the engine.
    let state = filter.to_state()?;

    let mut session = load_session(settings, inputs)?;
    if probe {
        // Blocking HEAD round-trips; keep them off the async runtime.
        session = tokio::task::spawn_blocking(move || {
            session.confirm_sizes();
            session
        })
        .await?;
    }

    let files = match session.handle(Command::SetFilter(state)) {
        Reply::Files(files) => files,
        _ => unreachable!("filter command returns files"),
    };
    if json {
        print_json(&files)?;
    } else {
        print_files(&files);
    }
    Ok(())
}
