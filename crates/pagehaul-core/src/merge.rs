//! Merge engine: deduplicate page- and network-sourced candidates by URL.
//!
//! Pure and deterministic: page records are inserted first, then network
//! records upgrade or extend the map. Output order is page order followed by
//! network-only order; callers impose their own ordering afterwards.

use std::collections::HashMap;

use crate::candidate::{Candidate, FileKind, Source};
use crate::url_meta;

/// Combines two candidate lists into one URL-keyed collection.
///
/// Reconciliation rules for a URL present in both inputs:
/// - `source` becomes `Both`.
/// - Network `size` wins when non-null (it derives from response headers);
///   a null network size keeps the page value.
/// - Network `mime_type` fills a missing page value.
/// - The network kind wins when it is MIME-derived; otherwise a known kind
///   beats `Unknown` from either side.
/// - A name carrying an extension beats one without.
pub fn merge(page_files: &[Candidate], network_files: &[Candidate]) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = Vec::with_capacity(page_files.len() + network_files.len());
    let mut by_url: HashMap<String, usize> = HashMap::new();

    for file in page_files {
        match by_url.get(&file.url) {
            Some(&at) => {
                // Duplicate within the page list itself: keep the first
                // record, fill gaps from the later one.
                fill_missing(&mut out[at], file);
            }
            None => {
                let mut record = file.clone();
                record.source = Source::Page;
                by_url.insert(record.url.clone(), out.len());
                out.push(record);
            }
        }
    }

    for file in network_files {
        match by_url.get(&file.url) {
            Some(&at) => reconcile_network(&mut out[at], file),
            None => {
                let mut record = file.clone();
                record.source = Source::Network;
                by_url.insert(record.url.clone(), out.len());
                out.push(record);
            }
        }
    }

    out
}

fn fill_missing(existing: &mut Candidate, later: &Candidate) {
    if existing.size.is_none() {
        existing.size = later.size;
    }
    if existing.mime_type.is_none() {
        existing.mime_type = later.mime_type.clone();
    }
    if existing.kind == FileKind::Unknown && later.kind != FileKind::Unknown {
        existing.kind = later.kind;
    }
}

fn reconcile_network(existing: &mut Candidate, network: &Candidate) {
    existing.source = Source::Both;

    // Header-derived size is authoritative; null network size keeps the
    // page-side value.
    if network.size.is_some() {
        existing.size = network.size;
    }
    if existing.mime_type.is_none() {
        existing.mime_type = network.mime_type.clone();
    }

    // MIME-based classification is more specific than the page heuristic.
    if network.mime_type.is_some() && network.kind != FileKind::Unknown {
        existing.kind = network.kind;
    } else if existing.kind == FileKind::Unknown && network.kind != FileKind::Unknown {
        existing.kind = network.kind;
    }

    if !url_meta::has_extension(&existing.name) && url_meta::has_extension(&network.name) {
        existing.name = network.name.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::FileKind;

    fn page(url: &str) -> Candidate {
        Candidate::from_page(url.to_string(), FileKind::Image, 100)
    }

    fn network(url: &str, size: Option<u64>, mime: Option<&str>) -> Candidate {
        let mut c = Candidate::from_page(url.to_string(), FileKind::Unknown, 200);
        c.source = Source::Network;
        c.size = size;
        c.mime_type = mime.map(String::from);
        if let Some(m) = mime {
            c.kind = FileKind::from_mime(m);
        }
        c
    }

    #[test]
    fn empty_inputs() {
        assert!(merge(&[], &[]).is_empty());
        let only_page = merge(&[page("https://x/1.jpg")], &[]);
        assert_eq!(only_page.len(), 1);
        assert_eq!(only_page[0].source, Source::Page);
        let only_net = merge(&[], &[network("https://x/1.jpg", None, None)]);
        assert_eq!(only_net.len(), 1);
        assert_eq!(only_net[0].source, Source::Network);
    }

    #[test]
    fn url_present_in_both_promotes_to_both() {
        let merged = merge(
            &[page("https://x/1.jpg")],
            &[network("https://x/1.jpg", Some(12_345), None)],
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source, Source::Both);
        assert_eq!(merged[0].size, Some(12_345));
    }

    #[test]
    fn at_most_one_record_per_url() {
        let merged = merge(
            &[page("https://x/1.jpg"), page("https://x/1.jpg"), page("https://x/2.jpg")],
            &[
                network("https://x/2.jpg", None, None),
                network("https://x/3.jpg", None, None),
                network("https://x/3.jpg", Some(5), None),
            ],
        );
        let mut urls: Vec<&str> = merged.iter().map(|c| c.url.as_str()).collect();
        urls.sort();
        urls.dedup();
        assert_eq!(merged.len(), urls.len());
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn network_size_authoritative_but_null_keeps_page_value() {
        let mut p = page("https://x/1.jpg");
        p.size = Some(1_000);
        let merged = merge(&[p.clone()], &[network("https://x/1.jpg", Some(2_000), None)]);
        assert_eq!(merged[0].size, Some(2_000));

        let merged = merge(&[p], &[network("https://x/1.jpg", None, None)]);
        assert_eq!(merged[0].size, Some(1_000));
    }

    #[test]
    fn mime_derived_kind_wins() {
        // Page guessed image from extension; network confirmed video via MIME.
        let merged = merge(
            &[page("https://x/clip.jpg")],
            &[network("https://x/clip.jpg", None, Some("video/mp4"))],
        );
        assert_eq!(merged[0].kind, FileKind::Video);
        assert_eq!(merged[0].mime_type.as_deref(), Some("video/mp4"));
    }

    #[test]
    fn network_without_mime_does_not_override_page_kind() {
        let merged = merge(
            &[page("https://x/pic.jpg")],
            &[network("https://x/pic.jpg", Some(9), None)],
        );
        assert_eq!(merged[0].kind, FileKind::Image);
    }

    #[test]
    fn merge_is_idempotent() {
        let a = vec![page("https://x/1.jpg"), page("https://x/2.png")];
        let b = vec![
            network("https://x/2.png", Some(42), Some("image/png")),
            network("https://x/3.bin", Some(7), None),
        ];
        let once = merge(&a, &b);
        let twice = merge(&once, &[]);
        assert_eq!(once.len(), twice.len());
        for (x, y) in once.iter().zip(twice.iter()) {
            assert_eq!(x.url, y.url);
            assert_eq!(x.size, y.size);
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.mime_type, y.mime_type);
        }
    }

    #[test]
    fn name_with_extension_preferred() {
        let mut p = page("https://x/asset");
        p.name = "asset".to_string();
        let mut n = network("https://x/asset", None, Some("image/png"));
        n.name = "asset.png".to_string();
        let merged = merge(&[p], &[n]);
        assert_eq!(merged[0].name, "asset.png");
    }
}
