//! Tests for scan, sniff and watch argument parsing.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_scan() {
    match parse(&[
        "pagehaul",
        "scan",
        "page.html",
        "--url",
        "https://example.com/album",
    ]) {
        CliCommand::Scan {
            page,
            url,
            within,
            json,
        } => {
            assert_eq!(page, Path::new("page.html"));
            assert_eq!(url, "https://example.com/album");
            assert!(within.is_none());
            assert!(!json);
        }
        _ => panic!("expected Scan"),
    }
}

#[test]
fn cli_parse_scan_within_selector() {
    match parse(&[
        "pagehaul",
        "scan",
        "page.html",
        "--url",
        "https://example.com/",
        "--within",
        "#gallery",
        "--json",
    ]) {
        CliCommand::Scan { within, json, .. } => {
            assert_eq!(within.as_deref(), Some("#gallery"));
            assert!(json);
        }
        _ => panic!("expected Scan with --within"),
    }
}

#[test]
fn cli_scan_requires_url() {
    assert!(crate::cli::Cli::try_parse_from(["pagehaul", "scan", "page.html"]).is_err());
}

#[test]
fn cli_parse_sniff() {
    match parse(&["pagehaul", "sniff", "traffic.har"]) {
        CliCommand::Sniff { har, json } => {
            assert_eq!(har, Path::new("traffic.har"));
            assert!(!json);
        }
        _ => panic!("expected Sniff"),
    }
}

#[test]
fn cli_parse_watch_defaults() {
    match parse(&["pagehaul", "watch", "--har", "traffic.har"]) {
        CliCommand::Watch {
            inputs,
            interval,
            passes,
        } => {
            assert_eq!(inputs.har.as_deref(), Some(Path::new("traffic.har")));
            assert_eq!(interval, 5);
            assert_eq!(passes, 0);
        }
        _ => panic!("expected Watch"),
    }
}

#[test]
fn cli_page_without_url_rejected() {
    assert!(crate::cli::Cli::try_parse_from([
        "pagehaul", "list", "--page", "page.html"
    ])
    .is_err());
}
