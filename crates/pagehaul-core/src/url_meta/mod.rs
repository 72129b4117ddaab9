//! URL modeling and filename derivation.
//!
//! Validates candidate URLs, derives safe display/destination filenames from
//! the URL path or a Content-Disposition header, and maps between extensions
//! and MIME types.

mod content_disposition;
mod ext;
mod path;
mod sanitize;

pub use content_disposition::parse_content_disposition_filename;
pub use ext::{
    ensure_extension, extension_for_mime, extension_of_name, extension_of_url, has_extension,
    strip_extension,
};
pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

use url::Url;

/// Default filename when URL path and Content-Disposition yield nothing usable.
const DEFAULT_FILENAME: &str = "download";

/// Parses `raw` into an absolute URL, resolving relative references against
/// `base`. Returns `None` unless the result is http or https; candidates
/// with `javascript:`, `data:` or unparseable URLs are dropped silently.
pub fn absolute_media_url(raw: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = match Url::parse(trimmed) {
        Ok(u) => u,
        Err(url::ParseError::RelativeUrlWithoutBase) => base?.join(trimmed).ok()?,
        Err(_) => return None,
    };
    match parsed.scheme() {
        "http" | "https" => Some(parsed),
        _ => None,
    }
}

/// Derives a display filename for a candidate.
///
/// Prefers `Content-Disposition` (if present and parseable), then the last
/// URL path segment. The result is sanitized; an empty or reserved result
/// falls back to `"download"`.
pub fn derive_filename(url: &str, content_disposition: Option<&str>) -> String {
    let candidate = content_disposition
        .and_then(parse_content_disposition_filename)
        .filter(|s| !s.is_empty())
        .or_else(|| filename_from_url_path(url));

    let raw = match candidate {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}
