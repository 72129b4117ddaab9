//! `pagehaul scan <page> --url <base>` – DOM scan of a saved page.

use anyhow::Result;
use pagehaul_core::config::Settings;
use pagehaul_core::session::{Command, Reply, Session};
use std::path::Path;

use super::{print_files, print_json, read_page};

pub fn run_scan(
    settings: &Settings,
    page: &Path,
    url: &str,
    within: Option<&str>,
    json: bool,
) -> Result<()> {
    let html = read_page(page)?;
    let mut session = Session::new(settings.clone());

    let reply = session.handle(Command::ScanPage {
        html,
        page_url: url.to_string(),
        scope: within.map(String::from),
    });
    let report = match reply {
        Reply::Scan(report) => report,
        _ => unreachable!("scan command returns a scan reply"),
    };

    if let Some(err) = &report.error {
        eprintln!("scan error: {err}");
    }
    if json {
        print_json(&report.files)?;
    } else {
        print_files(&report.files);
    }
    Ok(())
}
