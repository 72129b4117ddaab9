//! Rough byte-size estimation for candidates without an authoritative size.
//!
//! These are tuning heuristics, not measurements. Estimated sizes feed the
//! size filter and the preview display only; they are never treated as
//! authoritative and never overwrite a header-derived size.

use crate::candidate::{Candidate, FileKind};

/// Assumed frame rate when estimating video size from dimensions + duration.
const ASSUMED_VIDEO_FPS: f64 = 30.0;

/// Assumed dimensions when a candidate has no element to measure.
const ASSUMED_IMAGE_DIMS: (u32, u32) = (1280, 720);
const ASSUMED_VIDEO_DIMS: (u32, u32) = (1920, 1080);
const ASSUMED_VIDEO_DURATION_SECS: f64 = 60.0;

/// Flat fallbacks for kinds the pixel heuristics cannot cover.
const ASSUMED_AUDIO_BYTES: u64 = 4 * 1024 * 1024;
const ASSUMED_DOCUMENT_BYTES: u64 = 512 * 1024;
const ASSUMED_UNKNOWN_BYTES: u64 = 256 * 1024;

/// Compressed bytes-per-pixel by image format.
fn image_bytes_per_pixel(extension: Option<&str>) -> f64 {
    match extension {
        Some("jpg") | Some("jpeg") => 0.5,
        Some("png") => 2.0,
        Some("gif") => 1.0,
        Some("webp") => 0.3,
        _ => 1.0,
    }
}

/// Compressed bytes-per-pixel-per-frame, tiered by resolution: wider frames
/// compress better per pixel.
fn video_bytes_per_pixel(width: u32) -> f64 {
    if width >= 1920 {
        0.05
    } else if width >= 1280 {
        0.08
    } else {
        0.1
    }
}

/// Estimated size of an image from its intrinsic dimensions.
pub fn estimate_image_size(width: u32, height: u32, extension: Option<&str>) -> Option<u64> {
    if width == 0 || height == 0 {
        return None;
    }
    let area = width as f64 * height as f64;
    Some((area * image_bytes_per_pixel(extension)) as u64)
}

/// Estimated size of a video from intrinsic dimensions and duration.
pub fn estimate_video_size(width: u32, height: u32, duration_secs: f64) -> Option<u64> {
    if width == 0 || height == 0 || duration_secs <= 0.0 {
        return None;
    }
    let area = width as f64 * height as f64;
    Some((area * ASSUMED_VIDEO_FPS * duration_secs * video_bytes_per_pixel(width)) as u64)
}

/// Size used for filtering and sorting: the known size when present, else a
/// guess keyed off kind and URL extension.
pub fn effective_size(candidate: &Candidate) -> u64 {
    if let Some(size) = candidate.size {
        return size;
    }
    let ext = candidate.extension();
    match candidate.kind {
        FileKind::Image => {
            let (w, h) = ASSUMED_IMAGE_DIMS;
            estimate_image_size(w, h, ext.as_deref()).unwrap_or(ASSUMED_UNKNOWN_BYTES)
        }
        FileKind::Video => {
            let (w, h) = ASSUMED_VIDEO_DIMS;
            estimate_video_size(w, h, ASSUMED_VIDEO_DURATION_SECS).unwrap_or(ASSUMED_UNKNOWN_BYTES)
        }
        FileKind::Audio => ASSUMED_AUDIO_BYTES,
        FileKind::Document => ASSUMED_DOCUMENT_BYTES,
        FileKind::Unknown => ASSUMED_UNKNOWN_BYTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_estimate_scales_with_format() {
        let jpg = estimate_image_size(100, 100, Some("jpg")).unwrap();
        let png = estimate_image_size(100, 100, Some("png")).unwrap();
        assert_eq!(jpg, 5_000);
        assert_eq!(png, 20_000);
        assert!(png > jpg);
    }

    #[test]
    fn image_estimate_rejects_degenerate_dims() {
        assert_eq!(estimate_image_size(0, 100, Some("jpg")), None);
        assert_eq!(estimate_image_size(100, 0, None), None);
    }

    #[test]
    fn video_estimate_uses_resolution_tiers() {
        // 1920-wide frames use a smaller per-pixel constant than 640-wide.
        let hd = estimate_video_size(1920, 1080, 10.0).unwrap();
        let sd = estimate_video_size(640, 360, 10.0).unwrap();
        let hd_bpp = hd as f64 / (1920.0 * 1080.0 * 30.0 * 10.0);
        let sd_bpp = sd as f64 / (640.0 * 360.0 * 30.0 * 10.0);
        assert!(hd_bpp < sd_bpp);
    }

    #[test]
    fn effective_size_prefers_known_size() {
        let mut c = Candidate::from_page(
            "https://example.com/a.jpg".to_string(),
            FileKind::Image,
            0,
        );
        c.size = Some(777);
        assert_eq!(effective_size(&c), 777);
        c.size = None;
        assert!(effective_size(&c) > 0);
    }

    #[test]
    fn effective_size_varies_by_kind() {
        let image = Candidate::from_page("https://x/a.jpg".to_string(), FileKind::Image, 0);
        let video = Candidate::from_page("https://x/a.mp4".to_string(), FileKind::Video, 0);
        let doc = Candidate::from_page("https://x/a.pdf".to_string(), FileKind::Document, 0);
        let audio = Candidate::from_page("https://x/a.mp3".to_string(), FileKind::Audio, 0);
        assert!(effective_size(&video) > effective_size(&image));
        assert_eq!(effective_size(&doc), ASSUMED_DOCUMENT_BYTES);
        assert_eq!(effective_size(&audio), ASSUMED_AUDIO_BYTES);
    }

    #[test]
    fn effective_size_image_keyed_by_url_extension() {
        let jpg = Candidate::from_page("https://x/a.jpg".to_string(), FileKind::Image, 0);
        let png = Candidate::from_page("https://x/a.png".to_string(), FileKind::Image, 0);
        assert!(effective_size(&png) > effective_size(&jpg));
    }
}
