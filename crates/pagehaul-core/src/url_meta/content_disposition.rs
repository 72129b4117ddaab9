//! Content-Disposition header parsing (filename and filename*).

/// Extracts the filename from a raw Content-Disposition header value.
///
/// Supports `filename="quoted"`, `filename=token`, and RFC 5987
/// `filename*=UTF-8''percent-encoded`. When both forms are present,
/// `filename*` wins.
pub fn parse_content_disposition_filename(header_value: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    for param in header_value.split(';') {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();

        if name == "filename*" {
            if let Some(decoded) = decode_extended_value(value) {
                if !decoded.is_empty() {
                    return Some(decoded);
                }
            }
        } else if name == "filename" {
            let unquoted = unquote(value);
            if !unquoted.is_empty() {
                plain = Some(unquoted);
            }
        }
    }

    plain
}

/// RFC 5987 extended value: `charset'lang'percent-encoded`. Only UTF-8 is
/// accepted; other charsets are skipped.
fn decode_extended_value(value: &str) -> Option<String> {
    let (charset, rest) = value.split_once('\'')?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    let (_lang, encoded) = rest.split_once('\'')?;
    match urlencoding::decode(encoded.trim_matches('"')) {
        Ok(v) => Some(v.into_owned()),
        Err(_) => None,
    }
}

fn unquote(value: &str) -> String {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    // Unescape backslash-quoted characters inside the quoted form.
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}
