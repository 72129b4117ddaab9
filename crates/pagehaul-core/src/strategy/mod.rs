//! Per-site scan strategies.
//!
//! Some hosts serve thumbnails in the document and keep the full-size asset
//! behind a predictable URL rewrite. A strategy owns that knowledge for one
//! site family; `strategy_for` dispatches on the page URL and falls back to
//! the generic scanner.

use crate::scan::{self, ScanPolicy, ScanReport};
use crate::url_meta;

pub trait SiteStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    /// Whether this strategy applies to the given page URL.
    fn matches(&self, page_url: &str) -> bool;
    fn scan(&self, html: &str, page_url: &str, policy: &ScanPolicy, base_ts: u64) -> ScanReport;
}

/// Default strategy: the plain document scanner, applicable everywhere.
pub struct GenericStrategy;

impl SiteStrategy for GenericStrategy {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn matches(&self, _page_url: &str) -> bool {
        true
    }

    fn scan(&self, html: &str, page_url: &str, policy: &ScanPolicy, base_ts: u64) -> ScanReport {
        scan::scan_page(html, page_url, policy, base_ts)
    }
}

/// Strategy for CDN-style galleries that embed resized variants: scans
/// normally, then rewrites image URLs to their full-size form by dropping
/// the query string and any `_WxH` dimension suffix before the extension.
pub struct FullsizeRewriteStrategy {
    hosts: &'static [&'static str],
}

/// Host suffixes known to use the `name_WxH.ext` thumbnail convention.
const FULLSIZE_REWRITE_HOSTS: &[&str] = &["pinimg.com", "wp.com", "staticflickr.com"];

impl SiteStrategy for FullsizeRewriteStrategy {
    fn name(&self) -> &'static str {
        "fullsize-rewrite"
    }

    fn matches(&self, page_url: &str) -> bool {
        let Some(host) = url::Url::parse(page_url).ok().and_then(|u| u.host_str().map(String::from))
        else {
            return false;
        };
        self.hosts
            .iter()
            .any(|h| host == *h || host.ends_with(&format!(".{h}")))
    }

    fn scan(&self, html: &str, page_url: &str, policy: &ScanPolicy, base_ts: u64) -> ScanReport {
        let mut report = scan::scan_page(html, page_url, policy, base_ts);
        for file in &mut report.files {
            if file.kind == crate::candidate::FileKind::Image {
                let upgraded = upgrade_image_url(&file.url);
                if upgraded != file.url {
                    tracing::debug!("upgraded {} -> {}", file.url, upgraded);
                    file.name = url_meta::derive_filename(&upgraded, None);
                    file.url = upgraded;
                }
            }
        }
        report
    }
}

/// Picks the first matching strategy, generic last.
pub fn strategy_for(page_url: &str) -> &'static dyn SiteStrategy {
    static FULLSIZE: FullsizeRewriteStrategy = FullsizeRewriteStrategy {
        hosts: FULLSIZE_REWRITE_HOSTS,
    };
    static GENERIC: GenericStrategy = GenericStrategy;

    let specialized: [&'static dyn SiteStrategy; 1] = [&FULLSIZE];
    specialized
        .into_iter()
        .find(|s| s.matches(page_url))
        .unwrap_or(&GENERIC)
}

/// Strips the query string and a trailing `_WxH` dimension suffix from an
/// image URL (`photo_640x480.jpg` → `photo.jpg`).
fn upgrade_image_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);

    let Some(ext) = url_meta::extension_of_url(without_query) else {
        return without_query.to_string();
    };
    let stem_end = without_query.len() - ext.len() - 1;
    let stem = &without_query[..stem_end];

    if let Some(at) = stem.rfind('_') {
        let suffix = &stem[at + 1..];
        if is_dimension_suffix(suffix) {
            return format!("{}.{ext}", &stem[..at]);
        }
    }
    without_query.to_string()
}

fn is_dimension_suffix(s: &str) -> bool {
    let Some((w, h)) = s.split_once('x') else {
        return false;
    };
    !w.is_empty()
        && !h.is_empty()
        && w.bytes().all(|b| b.is_ascii_digit())
        && h.bytes().all(|b| b.is_ascii_digit())
}
