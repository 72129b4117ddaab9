//! Integration test: full discovery pipeline.
//!
//! Scans a page, replays a HAR capture into the observer, merges the two
//! candidate streams, filters the view, and dispatches the selection with a
//! stub fetcher; no network involved.

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tempfile::{tempdir, NamedTempFile};

use pagehaul_core::candidate::{FileKind, Source};
use pagehaul_core::config::Settings;
use pagehaul_core::dispatch::Fetcher;
use pagehaul_core::session::{Command, Reply, Session};
use pagehaul_core::view::{FilterState, KindFilter, SizeFilter, SizeRange};

const PAGE_URL: &str = "https://gallery.example.com/album";

const PAGE_HTML: &str = r#"
    <html><body>
        <img src="https://cdn.example.com/photos/sunset.jpg" width="4000" height="3000">
        <img src="https://cdn.example.com/photos/thumb.png" width="32" height="32">
        <video src="https://cdn.example.com/clips/surf.mp4" width="1920" height="1080" data-duration="90"></video>
        <a href="https://files.example.com/notes/trip.pdf">itinerary</a>
    </body></html>
"#;

const HAR_BODY: &str = r#"{
    "log": {
        "entries": [
            {
                "startedDateTime": "2024-06-01T09:00:00Z",
                "request": { "url": "https://cdn.example.com/photos/sunset.jpg" },
                "response": {
                    "status": 200,
                    "headers": [
                        { "name": "Content-Type", "value": "image/jpeg" },
                        { "name": "Content-Length", "value": "8388608" }
                    ]
                }
            },
            {
                "startedDateTime": "2024-06-01T09:00:05Z",
                "request": { "url": "https://cdn.example.com/media/bonus-track" },
                "response": {
                    "status": 200,
                    "headers": [
                        { "name": "Content-Type", "value": "audio/mpeg" },
                        { "name": "Content-Length", "value": "3145728" }
                    ]
                }
            }
        ]
    }
}"#;

struct StubFetcher {
    fetched: Mutex<Vec<String>>,
}

impl Fetcher for StubFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        self.fetched.lock().unwrap().push(url.to_string());
        std::fs::write(dest, b"data")?;
        Ok(4)
    }
}

fn settings() -> Settings {
    Settings {
        include_documents: true,
        include_audio: true,
        download_delay_ms: 0,
        per_site_subfolder: false,
        save_path: "haul".to_string(),
        ..Settings::default()
    }
}

fn har_file() -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(HAR_BODY.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

fn files_reply(reply: Reply) -> Vec<pagehaul_core::candidate::Candidate> {
    match reply {
        Reply::Files(files) => files,
        other => panic!("expected Files reply, got {other:?}"),
    }
}

#[tokio::test]
async fn scan_observe_merge_filter_download() {
    let mut session = Session::new(settings());

    // 1. DOM scan.
    let report = match session.handle(Command::ScanPage {
        html: PAGE_HTML.to_string(),
        page_url: PAGE_URL.to_string(),
        scope: None,
    }) {
        Reply::Scan(report) => report,
        other => panic!("expected Scan reply, got {other:?}"),
    };
    assert!(report.error.is_none());
    assert_eq!(report.files.len(), 4);

    // 2. Network capture replay.
    let har = har_file();
    let observed = session.import_har(9, har.path()).unwrap();
    assert_eq!(observed, 2);

    // 3. Merge into the session snapshot.
    let merged = files_reply(session.handle(Command::Refresh {
        page_files: report.files.clone(),
        capture: 9,
    }));
    assert_eq!(merged.len(), 5, "4 page files + 1 network-only");

    let sunset = merged
        .iter()
        .find(|f| f.url.ends_with("sunset.jpg"))
        .unwrap();
    assert_eq!(sunset.source, Source::Both);
    // Header size replaced the dimension-based estimate.
    assert_eq!(sunset.size, Some(8_388_608));
    assert_eq!(sunset.mime_type.as_deref(), Some("image/jpeg"));

    let bonus = merged
        .iter()
        .find(|f| f.url.ends_with("bonus-track"))
        .unwrap();
    assert_eq!(bonus.source, Source::Network);
    assert_eq!(bonus.kind, FileKind::Audio);
    assert!(bonus.name.ends_with(".mp3"));

    // 4. Filter: images over 1 MiB only.
    let filtered = files_reply(session.handle(Command::SetFilter(FilterState {
        kind: KindFilter::Only(FileKind::Image),
        size: SizeFilter::Custom(SizeRange::new(1024 * 1024, None).unwrap()),
        ..Default::default()
    })));
    assert_eq!(filtered.len(), 1);
    assert!(filtered[0].url.ends_with("sunset.jpg"));

    // 5. Dispatch the visible view.
    let dir = tempdir().unwrap();
    let fetcher = Arc::new(StubFetcher {
        fetched: Mutex::new(Vec::new()),
    });
    let batch = session.start_download(dir.path(), fetcher.clone()).await;
    assert_eq!(batch.succeeded, 1);
    assert_eq!(batch.failed, 0);

    let fetched = fetcher.fetched.lock().unwrap();
    assert_eq!(fetched.as_slice(), ["https://cdn.example.com/photos/sunset.jpg"]);
    assert!(dir.path().join("haul/sunset.jpg").exists());
}

#[tokio::test]
async fn selection_limits_the_batch() {
    let mut session = Session::new(settings());
    let report = match session.handle(Command::ScanPage {
        html: PAGE_HTML.to_string(),
        page_url: PAGE_URL.to_string(),
        scope: None,
    }) {
        Reply::Scan(report) => report,
        other => panic!("expected Scan reply, got {other:?}"),
    };
    files_reply(session.handle(Command::Refresh {
        page_files: report.files,
        capture: 1,
    }));

    session.handle(Command::ToggleSelect(
        "https://files.example.com/notes/trip.pdf".to_string(),
    ));

    let dir = tempdir().unwrap();
    let fetcher = Arc::new(StubFetcher {
        fetched: Mutex::new(Vec::new()),
    });
    let batch = session.start_download(dir.path(), fetcher.clone()).await;
    assert_eq!(batch.succeeded, 1);
    assert_eq!(
        fetcher.fetched.lock().unwrap().as_slice(),
        ["https://files.example.com/notes/trip.pdf"]
    );
}
