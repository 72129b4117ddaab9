//! Destination path generation: naming strategy, extension guarantee,
//! per-origin subfolder, and collision-free paths.

use std::path::{Path, PathBuf};
use time::OffsetDateTime;

use crate::candidate::Candidate;
use crate::config::{NamingStrategy, Settings};
use crate::url_meta;

/// Batch timestamp prefix (`YYYYMMDD_HHMMSS`, UTC), computed once per batch
/// so all its files share the stamp.
pub fn batch_stamp(now_ms: u64) -> String {
    let secs = (now_ms / 1000) as i64;
    let t = OffsetDateTime::from_unix_timestamp(secs).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        t.year(),
        u8::from(t.month()),
        t.day(),
        t.hour(),
        t.minute(),
        t.second()
    )
}

/// The extension a dispatched file is guaranteed to carry: display name,
/// then URL path, then MIME type, then the kind fallback.
pub fn resolved_extension(file: &Candidate) -> String {
    url_meta::extension_of_name(&file.name)
        .or_else(|| file.extension())
        .or_else(|| {
            file.mime_type
                .as_deref()
                .and_then(url_meta::extension_for_mime)
        })
        .unwrap_or_else(|| file.kind.default_extension().to_string())
}

/// Full destination path for one file of a batch (before uniquify).
pub fn destination_for(
    file: &Candidate,
    index: usize,
    settings: &Settings,
    stamp: &str,
    root: &Path,
) -> PathBuf {
    let ext = resolved_extension(file);
    let base = url_meta::sanitize_filename(url_meta::strip_extension(&file.name));
    let base = if base.is_empty() {
        format!("file_{}", index + 1)
    } else {
        base
    };

    let named = match settings.file_naming {
        NamingStrategy::Original => format!("{base}.{ext}"),
        NamingStrategy::Timestamp => format!("{stamp}_{base}.{ext}"),
        NamingStrategy::Sequential => format!("{:03}_{base}.{ext}", index + 1),
    };

    let mut dir = root.join(&settings.save_path);
    if settings.per_site_subfolder {
        if let Some(folder) = origin_folder(&file.url) {
            dir = dir.join(folder);
        }
    }
    dir.join(named)
}

/// Per-origin subfolder name: hostname with a leading `www.` stripped and
/// everything non-alphanumeric flattened to `_`.
fn origin_folder(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let folder: String = host
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if folder.is_empty() {
        None
    } else {
        Some(folder)
    }
}

/// First path under `path`'s directory that does not exist yet, counting up
/// through `name (1).ext`, `name (2).ext`, … Never overwrites.
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let ext = path.extension().and_then(|s| s.to_str());
    let dir = path.parent().unwrap_or_else(|| Path::new(""));

    for n in 1.. {
        let candidate = match ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        };
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("exhausted collision counter")
}
