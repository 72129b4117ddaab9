//! CLI subcommand implementations, one file per command.

mod completions;
mod fetch;
mod list;
mod scan;
mod sniff;
mod watch;

pub use completions::run_completions;
pub use fetch::run_fetch;
pub use list::run_list;
pub use scan::run_scan;
pub use sniff::run_sniff;
pub use watch::run_watch;

use anyhow::{Context, Result};
use pagehaul_core::candidate::Candidate;
use pagehaul_core::config::Settings;
use pagehaul_core::estimate;
use pagehaul_core::session::{Command, Reply, Session};
use std::path::Path;

use super::InputArgs;

/// Capture id used for the CLI's single HAR replay stream.
pub(crate) const CLI_CAPTURE: u64 = 1;

/// Builds a session and loads the given inputs into its snapshot.
pub(crate) fn load_session(settings: &Settings, inputs: &InputArgs) -> Result<Session> {
    let mut session = Session::new(settings.clone());

    let page_files = match (&inputs.page, &inputs.url) {
        (Some(page), Some(url)) => {
            let html = read_page(page)?;
            let reply = session.handle(Command::ScanPage {
                html,
                page_url: url.clone(),
                scope: None,
            });
            match reply {
                Reply::Scan(report) => {
                    if let Some(err) = report.error {
                        eprintln!("scan error: {err}");
                    }
                    report.files
                }
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    };

    if let Some(har) = &inputs.har {
        let count = session.import_har(CLI_CAPTURE, har)?;
        tracing::debug!("HAR yielded {count} network records");
    }

    session.handle(Command::Refresh {
        page_files,
        capture: CLI_CAPTURE,
    });
    Ok(session)
}

/// Prints the standard candidate table.
pub(crate) fn print_files(files: &[Candidate]) {
    if files.is_empty() {
        println!("No files found.");
        return;
    }
    println!(
        "{:<10} {:<12} {:<7} {:<8} {:<28} {}",
        "TYPE", "SIZE", "TIME", "SOURCE", "NAME", "URL"
    );
    for file in files {
        println!(
            "{:<10} {:<12} {:<7} {:<8} {:<28} {}",
            file.kind.label(),
            display_size(file),
            file.time_label(),
            file.source.label(),
            file.name,
            file.url
        );
    }
    println!("{} file(s)", files.len());
}

/// Header-derived sizes print plainly; anything heuristic is marked `~`.
pub(crate) fn display_size(file: &Candidate) -> String {
    match file.size {
        Some(size) if file.source.includes_network() => size.to_string(),
        _ => format!("~{}", estimate::effective_size(file)),
    }
}

pub(crate) fn print_json(files: &[Candidate]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(files)?);
    Ok(())
}

pub(crate) fn read_page(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read page file: {}", path.display()))
}
