//! Element-level extraction for the page scanner.

use scraper::{ElementRef, Selector};
use url::Url;

use super::ScanPolicy;
use crate::candidate::{FileKind, AUDIO_EXTENSIONS, DOCUMENT_EXTENSIONS};
use crate::estimate;
use crate::url_meta;

/// One raw hit from the document, before policy filtering and assembly.
pub(super) struct Hit {
    pub url: Url,
    pub kind: FileKind,
    /// Heuristic estimate from element dimensions, never authoritative.
    pub size: Option<u64>,
}

/// `src` plus the common lazy-load fallbacks, in priority order.
const IMAGE_SRC_ATTRS: &[&str] = &["src", "data-src", "data-original", "data-lazy-src"];

pub(super) fn collect(root: ElementRef<'_>, base: &Url, policy: &ScanPolicy, out: &mut Vec<Hit>) {
    if policy.images {
        collect_images(root, base, out);
        collect_background_images(root, base, out);
    }
    if policy.videos {
        collect_videos(root, base, out);
    }
    if policy.audio {
        collect_audio(root, base, out);
        collect_links_with_extension(root, base, AUDIO_EXTENSIONS, FileKind::Audio, out);
    }
    if policy.documents {
        collect_links_with_extension(root, base, DOCUMENT_EXTENSIONS, FileKind::Document, out);
    }
}

fn collect_images(root: ElementRef<'_>, base: &Url, out: &mut Vec<Hit>) {
    let selector = Selector::parse("img").expect("img selector");
    for img in root.select(&selector) {
        let Some(raw) = effective_src(&img, IMAGE_SRC_ATTRS) else {
            continue;
        };
        let Some(url) = url_meta::absolute_media_url(raw, Some(base)) else {
            continue;
        };
        let size = dimensions_of(&img).and_then(|(w, h)| {
            let ext = url_meta::extension_of_url(url.as_str());
            estimate::estimate_image_size(w, h, ext.as_deref())
        });
        out.push(Hit {
            url,
            kind: FileKind::Image,
            size,
        });
    }
}

fn collect_background_images(root: ElementRef<'_>, base: &Url, out: &mut Vec<Hit>) {
    let selector = Selector::parse("[style]").expect("style selector");
    for el in root.select(&selector) {
        let Some(style) = el.value().attr("style") else {
            continue;
        };
        let Some(raw) = background_image_url(style) else {
            continue;
        };
        let Some(url) = url_meta::absolute_media_url(raw, Some(base)) else {
            continue;
        };
        out.push(Hit {
            url,
            kind: FileKind::Image,
            size: None,
        });
    }
}

fn collect_videos(root: ElementRef<'_>, base: &Url, out: &mut Vec<Hit>) {
    let selector = Selector::parse("video").expect("video selector");
    let source_selector = Selector::parse("source").expect("source selector");
    for video in root.select(&selector) {
        let size = video_estimate(&video);
        if let Some(raw) = effective_src(&video, &["src"]) {
            if let Some(url) = url_meta::absolute_media_url(raw, Some(base)) {
                out.push(Hit {
                    url,
                    kind: FileKind::Video,
                    size,
                });
            }
        }
        for source in video.select(&source_selector) {
            let Some(raw) = effective_src(&source, &["src"]) else {
                continue;
            };
            if let Some(url) = url_meta::absolute_media_url(raw, Some(base)) {
                out.push(Hit {
                    url,
                    kind: FileKind::Video,
                    size,
                });
            }
        }
    }
}

fn collect_audio(root: ElementRef<'_>, base: &Url, out: &mut Vec<Hit>) {
    let selector = Selector::parse("audio").expect("audio selector");
    let source_selector = Selector::parse("source").expect("source selector");
    for audio in root.select(&selector) {
        if let Some(raw) = effective_src(&audio, &["src"]) {
            if let Some(url) = url_meta::absolute_media_url(raw, Some(base)) {
                out.push(Hit {
                    url,
                    kind: FileKind::Audio,
                    size: None,
                });
            }
        }
        for source in audio.select(&source_selector) {
            let Some(raw) = effective_src(&source, &["src"]) else {
                continue;
            };
            if let Some(url) = url_meta::absolute_media_url(raw, Some(base)) {
                out.push(Hit {
                    url,
                    kind: FileKind::Audio,
                    size: None,
                });
            }
        }
    }
}

fn collect_links_with_extension(
    root: ElementRef<'_>,
    base: &Url,
    extensions: &[&str],
    kind: FileKind,
    out: &mut Vec<Hit>,
) {
    let selector = Selector::parse("a[href]").expect("anchor selector");
    for a in root.select(&selector) {
        let Some(raw) = a.value().attr("href") else {
            continue;
        };
        let Some(url) = url_meta::absolute_media_url(raw, Some(base)) else {
            continue;
        };
        let Some(ext) = url_meta::extension_of_url(url.as_str()) else {
            continue;
        };
        if extensions.contains(&ext.as_str()) {
            out.push(Hit {
                url,
                kind,
                size: None,
            });
        }
    }
}

fn effective_src<'a>(el: &'a ElementRef<'_>, attrs: &[&str]) -> Option<&'a str> {
    attrs
        .iter()
        .find_map(|attr| el.value().attr(attr))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Extracts the `url(...)` target of an inline `background-image` rule.
fn background_image_url(style: &str) -> Option<&str> {
    let at = style.find("background-image")?;
    let rest = &style[at..];
    // Stay within this declaration; a ';' before 'url(' means none was set.
    let declaration = rest.split(';').next().unwrap_or(rest);
    let start = declaration.find("url(")? + "url(".len();
    let tail = &declaration[start..];
    let end = tail.find(')')?;
    let inner = tail[..end].trim().trim_matches(|c| c == '"' || c == '\'');
    if inner.is_empty() || inner == "none" {
        None
    } else {
        Some(inner)
    }
}

fn dimensions_of(el: &ElementRef<'_>) -> Option<(u32, u32)> {
    let width = numeric_attr(el, "width")?;
    let height = numeric_attr(el, "height")?;
    Some((width, height))
}

fn video_estimate(video: &ElementRef<'_>) -> Option<u64> {
    let (width, height) = dimensions_of(video)?;
    let duration: f64 = video.value().attr("data-duration")?.trim().parse().ok()?;
    estimate::estimate_video_size(width, height, duration)
}

fn numeric_attr(el: &ElementRef<'_>, name: &str) -> Option<u32> {
    el.value()
        .attr(name)?
        .trim()
        .trim_end_matches("px")
        .parse()
        .ok()
}
