//! Filename sanitization for Linux filesystems.

/// Maximum filename length in bytes (Linux NAME_MAX).
const NAME_MAX: usize = 255;

/// Sanitizes a candidate filename:
///
/// - NUL, path separators, control chars and whitespace become `_`
/// - runs of `_` collapse to one
/// - leading/trailing dots, spaces and underscores are trimmed
/// - the result is truncated to 255 bytes on a char boundary
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let mapped = match c {
            '\0' | '/' | '\\' => '_',
            c if c.is_control() => '_',
            ' ' | '\t' => '_',
            c => c,
        };
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }

    let trimmed = out.trim_matches(|c| matches!(c, ' ' | '\t' | '.' | '_'));
    if trimmed.len() <= NAME_MAX {
        return trimmed.to_string();
    }
    let mut cut = NAME_MAX;
    while cut > 0 && !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    trimmed[..cut].to_string()
}
