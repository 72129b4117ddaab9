//! `pagehaul sniff <capture.har>` – list media a network capture recorded.

use anyhow::Result;
use pagehaul_core::config::Settings;
use pagehaul_core::session::{Command, Reply, Session};
use std::path::Path;

use super::{print_files, print_json, CLI_CAPTURE};

pub fn run_sniff(settings: &Settings, har: &Path, json: bool) -> Result<()> {
    let mut session = Session::new(settings.clone());
    session.import_har(CLI_CAPTURE, har)?;

    let files = match session.handle(Command::NetworkFiles(CLI_CAPTURE)) {
        Reply::Files(files) => files,
        _ => unreachable!("network files command returns files"),
    };
    if json {
        print_json(&files)?;
    } else {
        print_files(&files);
    }
    Ok(())
}
