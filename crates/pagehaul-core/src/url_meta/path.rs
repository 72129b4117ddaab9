//! Filename extraction from URL path.

/// Extracts the last non-empty path segment of a URL, percent-decoded, for
/// use as a filename hint. Returns `None` if the URL cannot be parsed or the
/// path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()
        .and_then(|mut s| s.next_back())
        .filter(|s| !s.is_empty())?;
    if segment == "." || segment == ".." {
        return None;
    }
    // Path segments are frequently percent-encoded; decode for display.
    let decoded = urlencoding::decode(segment)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    Some(decoded)
}
