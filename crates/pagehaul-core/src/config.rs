use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::candidate::FileKind;

/// Destination filename strategy for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingStrategy {
    /// Keep the discovered display name.
    #[default]
    Original,
    /// Prefix the batch start time (`YYYYMMDD_HHMMSS_name.ext`).
    Timestamp,
    /// Prefix a zero-padded position (`001_name.ext`).
    Sequential,
}

/// Persisted configuration loaded from `~/.config/pagehaul/config.toml`.
///
/// Treated as an immutable snapshot for the duration of one scan/download
/// cycle. Missing keys fall back to defaults on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Subdirectory (under the download root) that batches are saved into.
    pub save_path: String,
    pub file_naming: NamingStrategy,
    /// Create a per-origin subfolder (hostname, `www.` stripped) per file.
    pub per_site_subfolder: bool,
    /// Hard cap on files per batch; extra selected files are ignored.
    pub max_files: usize,
    /// Pause after each download request, regardless of outcome.
    pub download_delay_ms: u64,
    pub include_images: bool,
    pub include_videos: bool,
    pub include_audio: bool,
    pub include_documents: bool,
    /// Per-extension enable map. An absent key means enabled.
    pub formats: BTreeMap<String, bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_path: "pagehaul".to_string(),
            file_naming: NamingStrategy::Original,
            per_site_subfolder: true,
            max_files: 50,
            download_delay_ms: 500,
            include_images: true,
            include_videos: true,
            include_audio: true,
            include_documents: false,
            formats: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Whether a media category is collected by scans.
    pub fn includes(&self, kind: FileKind) -> bool {
        match kind {
            FileKind::Image => self.include_images,
            FileKind::Video => self.include_videos,
            FileKind::Audio => self.include_audio,
            FileKind::Document => self.include_documents,
            FileKind::Unknown => true,
        }
    }

    /// Whether a specific extension is enabled. Unlisted extensions are.
    pub fn format_enabled(&self, extension: &str) -> bool {
        self.formats
            .get(&extension.to_ascii_lowercase())
            .copied()
            .unwrap_or(true)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagehaul")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<Settings> {
    let path = config_path()?;
    if !path.exists() {
        let defaults = Settings::default();
        let toml = toml::to_string_pretty(&defaults)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(defaults);
    }

    let data = fs::read_to_string(&path)?;
    let settings: Settings = toml::from_str(&data)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let s = Settings::default();
        assert_eq!(s.max_files, 50);
        assert_eq!(s.download_delay_ms, 500);
        assert_eq!(s.file_naming, NamingStrategy::Original);
        assert!(s.per_site_subfolder);
        assert!(s.include_images);
        assert!(!s.include_documents);
    }

    #[test]
    fn toml_roundtrip() {
        let s = Settings::default();
        let toml = toml::to_string_pretty(&s).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.max_files, s.max_files);
        assert_eq!(parsed.file_naming, s.file_naming);
        assert_eq!(parsed.save_path, s.save_path);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let toml = r#"
            max_files = 10
            file_naming = "sequential"
        "#;
        let s: Settings = toml::from_str(toml).unwrap();
        assert_eq!(s.max_files, 10);
        assert_eq!(s.file_naming, NamingStrategy::Sequential);
        // Everything else falls back.
        assert_eq!(s.download_delay_ms, 500);
        assert!(s.include_videos);
    }

    #[test]
    fn format_toggles() {
        let toml = r#"
            [formats]
            gif = false
            png = true
        "#;
        let s: Settings = toml::from_str(toml).unwrap();
        assert!(!s.format_enabled("gif"));
        assert!(!s.format_enabled("GIF"));
        assert!(s.format_enabled("png"));
        assert!(s.format_enabled("jpg"));
    }

    #[test]
    fn category_toggles() {
        let mut s = Settings::default();
        assert!(s.includes(FileKind::Image));
        assert!(!s.includes(FileKind::Document));
        s.include_documents = true;
        assert!(s.includes(FileKind::Document));
    }
}
