//! Tests for list/fetch filter flags and their validation.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;
use pagehaul_core::candidate::FileKind;
use pagehaul_core::view::{KindFilter, SizeFilter, SortKey, SortOrder, SourceFilter};

fn list_filter(args: &[&str]) -> crate::cli::FilterArgs {
    let mut full = vec!["pagehaul", "list"];
    full.extend_from_slice(args);
    match parse(&full) {
        CliCommand::List { filter, .. } => filter,
        _ => panic!("expected List"),
    }
}

#[test]
fn default_filter_state() {
    let state = list_filter(&[]).to_state().unwrap();
    assert_eq!(state.source, SourceFilter::All);
    assert_eq!(state.kind, KindFilter::All);
    assert_eq!(state.size, SizeFilter::All);
    assert_eq!(state.format, None);
    assert_eq!(state.sort, SortKey::Time);
    assert_eq!(state.order, SortOrder::Descending);
}

#[test]
fn type_and_bucket_flags() {
    let state = list_filter(&["--type", "video", "--size", "large"])
        .to_state()
        .unwrap();
    assert_eq!(state.kind, KindFilter::Only(FileKind::Video));
    assert_eq!(state.size, SizeFilter::Large);
}

#[test]
fn custom_range_flags() {
    let state = list_filter(&["--min-size", "1000", "--max-size", "5000"])
        .to_state()
        .unwrap();
    match state.size {
        SizeFilter::Custom(range) => {
            assert_eq!(range.min, 1000);
            assert_eq!(range.max, Some(5000));
        }
        other => panic!("expected custom range, got {other:?}"),
    }
}

#[test]
fn inverted_custom_range_rejected_at_boundary() {
    // max <= min never reaches the filter engine.
    let err = list_filter(&["--min-size", "10", "--max-size", "5"])
        .to_state()
        .unwrap_err();
    assert!(err.to_string().contains("empty size range"));
}

#[test]
fn max_size_requires_min_size() {
    assert!(crate::cli::Cli::try_parse_from([
        "pagehaul", "list", "--max-size", "5000"
    ])
    .is_err());
}

#[test]
fn bucket_conflicts_with_custom_range() {
    assert!(crate::cli::Cli::try_parse_from([
        "pagehaul", "list", "--size", "small", "--min-size", "10"
    ])
    .is_err());
}

#[test]
fn sort_direction_defaults_per_key() {
    let name = list_filter(&["--sort", "name"]).to_state().unwrap();
    assert_eq!(name.sort, SortKey::Name);
    assert_eq!(name.order, SortOrder::Ascending);

    let size = list_filter(&["--sort", "size"]).to_state().unwrap();
    assert_eq!(size.order, SortOrder::Descending);

    let flipped = list_filter(&["--sort", "size", "--asc"]).to_state().unwrap();
    assert_eq!(flipped.order, SortOrder::Ascending);
}

#[test]
fn asc_conflicts_with_desc() {
    assert!(crate::cli::Cli::try_parse_from(["pagehaul", "list", "--asc", "--desc"]).is_err());
}

#[test]
fn fetch_picks_and_out() {
    match parse(&[
        "pagehaul",
        "fetch",
        "--har",
        "traffic.har",
        "--pick",
        "https://x/a.jpg",
        "--pick",
        "https://x/b.jpg",
        "--out",
        "/tmp/dl",
    ]) {
        CliCommand::Fetch { picks, out, .. } => {
            assert_eq!(picks.len(), 2);
            assert_eq!(out.as_deref(), Some(std::path::Path::new("/tmp/dl")));
        }
        _ => panic!("expected Fetch"),
    }
}
