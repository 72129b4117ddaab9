//! Media kind classification from file extensions and MIME types.

use serde::{Deserialize, Serialize};

/// Extensions treated as images by the scanner and the URL heuristic.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp"];

/// Extensions treated as video.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "avi", "mov", "mkv", "m4v"];

/// Extensions treated as audio.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "m4a"];

/// Extensions treated as documents/archives (anchor-link scanning).
pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "rtf", "zip", "rar", "7z", "tar",
    "gz",
];

/// Broad media category of a discovered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Document,
    Unknown,
}

impl FileKind {
    /// Lowercase label, used for display and for the kind sort key.
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Document => "document",
            FileKind::Unknown => "unknown",
        }
    }

    /// Fallback extension when neither URL nor MIME type yields one.
    pub fn default_extension(self) -> &'static str {
        match self {
            FileKind::Image => "jpg",
            FileKind::Video => "mp4",
            FileKind::Audio => "mp3",
            FileKind::Document => "pdf",
            FileKind::Unknown => "bin",
        }
    }

    /// Classifies by file extension (case-insensitive). Unknown extensions
    /// map to `FileKind::Unknown`.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        let ext = ext.as_str();
        if IMAGE_EXTENSIONS.contains(&ext) {
            FileKind::Image
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            FileKind::Video
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            FileKind::Audio
        } else if DOCUMENT_EXTENSIONS.contains(&ext) {
            FileKind::Document
        } else {
            FileKind::Unknown
        }
    }

    /// Classifies by MIME type. MIME-based classification is considered more
    /// specific than extension-based and wins when the two disagree.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        if essence.starts_with("image/") {
            return FileKind::Image;
        }
        if essence.starts_with("video/") {
            return FileKind::Video;
        }
        if essence.starts_with("audio/") {
            return FileKind::Audio;
        }
        match essence {
            "application/pdf"
            | "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            | "application/vnd.ms-excel"
            | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-powerpoint"
            | "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            | "application/zip"
            | "application/x-rar-compressed"
            | "application/vnd.rar"
            | "application/x-7z-compressed"
            | "application/x-tar"
            | "application/gzip"
            | "application/rtf"
            | "text/plain" => FileKind::Document,
            _ => FileKind::Unknown,
        }
    }
}
