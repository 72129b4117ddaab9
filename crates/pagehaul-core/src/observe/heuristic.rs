//! Request-time URL heuristic for admitting provisional records.

use url::Url;

use crate::candidate::FileKind;
use crate::url_meta;

/// Path segments that suggest a media asset even without a known extension.
const MEDIA_PATH_SEGMENTS: &[&str] = &["images", "img", "media", "uploads"];

/// Classifies a request URL as probably-media, or `None` to ignore it.
///
/// A known media extension gives a concrete kind; a media-looking path
/// segment admits the URL with kind `Unknown` ("images"/"img" are confident
/// enough to call it an image). Response headers may correct either later.
pub fn media_hint(url: &Url) -> Option<FileKind> {
    if let Some(ext) = url_meta::extension_of_url(url.as_str()) {
        let kind = FileKind::from_extension(&ext);
        if kind != FileKind::Unknown {
            return Some(kind);
        }
    }

    let mut segments = url.path_segments()?;
    let hinted = segments.find_map(|s| {
        let s = s.to_ascii_lowercase();
        MEDIA_PATH_SEGMENTS.contains(&s.as_str()).then_some(s)
    })?;

    match hinted.as_str() {
        "images" | "img" => Some(FileKind::Image),
        _ => Some(FileKind::Unknown),
    }
}
