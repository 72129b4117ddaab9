//! File extension helpers: extraction, presence, MIME mapping.

use super::path::filename_from_url_path;

/// Lowercased extension of a URL's last path segment, if any.
pub fn extension_of_url(url: &str) -> Option<String> {
    filename_from_url_path(url).and_then(|name| extension_of_name(&name))
}

/// Lowercased extension of a bare filename, if any. A leading dot does not
/// count (`.hidden` has no extension).
pub fn extension_of_name(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    // Extensions are short alphanumerics; anything else is part of the name.
    if ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn has_extension(name: &str) -> bool {
    extension_of_name(name).is_some()
}

/// Filename without its extension (`photo.jpg` → `photo`).
pub fn strip_extension(name: &str) -> &str {
    match extension_of_name(name) {
        Some(ext) => &name[..name.len() - ext.len() - 1],
        None => name,
    }
}

/// Appends `ext` unless `name` already ends with it (case-insensitive).
pub fn ensure_extension(name: &str, ext: &str) -> String {
    match extension_of_name(name) {
        Some(existing) if existing.eq_ignore_ascii_case(ext) => name.to_string(),
        _ => format!("{name}.{ext}"),
    }
}

/// Preferred extensions for MIME types whose `mime_guess` reverse lookup is
/// ambiguous or surprising (e.g. image/jpeg → "jfif").
const MIME_EXTENSION_OVERRIDES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/svg+xml", "svg"),
    ("audio/mpeg", "mp3"),
    ("video/quicktime", "mov"),
    ("text/plain", "txt"),
];

/// Extension implied by a MIME type, if any.
pub fn extension_for_mime(mime: &str) -> Option<String> {
    let essence = mime.split(';').next().unwrap_or(mime).trim();
    if let Some((_, ext)) = MIME_EXTENSION_OVERRIDES
        .iter()
        .find(|(m, _)| essence.eq_ignore_ascii_case(m))
    {
        return Some((*ext).to_string());
    }
    mime_guess::get_mime_extensions_str(essence)
        .and_then(|exts| exts.first())
        .map(|e| (*e).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_of_url_lowercases() {
        assert_eq!(
            extension_of_url("https://example.com/a/Photo.JPG").as_deref(),
            Some("jpg")
        );
        assert_eq!(extension_of_url("https://example.com/a.bin?x=1").as_deref(), Some("bin"));
        assert_eq!(extension_of_url("https://example.com/noext"), None);
    }

    #[test]
    fn name_extension_edge_cases() {
        assert_eq!(extension_of_name("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of_name(".hidden"), None);
        assert_eq!(extension_of_name("trailingdot."), None);
        assert_eq!(extension_of_name("weird.l@ng"), None);
        assert_eq!(extension_of_name("averylongone.extension12345"), None);
    }

    #[test]
    fn strip_and_ensure() {
        assert_eq!(strip_extension("photo.jpg"), "photo");
        assert_eq!(strip_extension("noext"), "noext");
        assert_eq!(ensure_extension("photo", "jpg"), "photo.jpg");
        assert_eq!(ensure_extension("photo.JPG", "jpg"), "photo.JPG");
        assert_eq!(ensure_extension("photo.png", "jpg"), "photo.png.jpg");
    }

    #[test]
    fn mime_extensions() {
        assert_eq!(extension_for_mime("image/jpeg").as_deref(), Some("jpg"));
        assert_eq!(extension_for_mime("image/png").as_deref(), Some("png"));
        assert_eq!(extension_for_mime("audio/mpeg").as_deref(), Some("mp3"));
        assert_eq!(extension_for_mime("image/jpeg; q=0.9").as_deref(), Some("jpg"));
        assert_eq!(extension_for_mime("application/x-nonexistent-type"), None);
    }
}
