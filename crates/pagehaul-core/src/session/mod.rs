//! Session router: one owner for all mutable discovery state.
//!
//! The popup/content/background message contract collapses into a command
//! enum handled here. The router owns the observer store, the found-files
//! snapshot, the filter state and the selection; the merge and view engines
//! stay pure functions it calls. Refreshes are last-write-wins on the
//! snapshot; a stale read is tolerated because the next render re-derives
//! the view from the latest snapshot.

mod refresh;

pub use refresh::run_ticks;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::candidate::Candidate;
use crate::config::Settings;
use crate::dispatch::{self, BatchReport, Fetcher};
use crate::merge::merge;
use crate::observe::{self, CaptureId, NetworkObserver};
use crate::scan::{ScanPolicy, ScanReport};
use crate::select::SelectionSet;
use crate::strategy;
use crate::view::{view, FilterState};

/// Requests a front-end (CLI command, test, future UI) can issue.
#[derive(Debug, Clone)]
pub enum Command {
    /// Full-page scan, or a subtree scan when `scope` is set.
    ScanPage {
        html: String,
        page_url: String,
        scope: Option<String>,
    },
    StartMonitoring(CaptureId),
    StopMonitoring(CaptureId),
    CaptureClosed(CaptureId),
    /// Snapshot of a capture's records, newest first.
    NetworkFiles(CaptureId),
    /// Re-merge the given page files with the capture's network records into
    /// the found-files snapshot.
    Refresh {
        page_files: Vec<Candidate>,
        capture: CaptureId,
    },
    /// Open the preview: resets the filter state and returns the view.
    OpenPreview,
    ClosePreview,
    SetFilter(FilterState),
    /// The current filtered, sorted view over the snapshot.
    View,
    ToggleSelect(String),
    SelectAllVisible,
    ClearSelection,
    GetSettings,
}

#[derive(Debug)]
pub enum Reply {
    Scan(ScanReport),
    Files(Vec<Candidate>),
    Settings(Settings),
    /// Selection size after the operation, and whether the toggled URL is
    /// now selected (false for bulk operations).
    Selection { selected: usize, added: bool },
    Ack,
}

pub struct Session {
    settings: Settings,
    filter: FilterState,
    observer: NetworkObserver,
    found: Vec<Candidate>,
    selection: SelectionSet,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            filter: FilterState::default(),
            observer: NetworkObserver::new(),
            found: Vec::new(),
            selection: SelectionSet::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn found(&self) -> &[Candidate] {
        &self.found
    }

    pub fn handle(&mut self, command: Command) -> Reply {
        match command {
            Command::ScanPage { html, page_url, scope } => {
                Reply::Scan(self.scan(&html, &page_url, scope.as_deref()))
            }
            Command::StartMonitoring(id) => {
                self.observer.start_monitoring(id);
                Reply::Ack
            }
            Command::StopMonitoring(id) => {
                self.observer.stop_monitoring(id);
                Reply::Ack
            }
            Command::CaptureClosed(id) => {
                self.observer.capture_closed(id);
                Reply::Ack
            }
            Command::NetworkFiles(id) => Reply::Files(self.observer.files(id)),
            Command::Refresh { page_files, capture } => {
                self.found = merge(&page_files, &self.observer.files(capture));
                Reply::Files(self.found.clone())
            }
            Command::OpenPreview => {
                self.filter = FilterState::default();
                Reply::Files(view(&self.found, &self.filter))
            }
            Command::ClosePreview => Reply::Ack,
            Command::SetFilter(state) => {
                self.filter = state;
                Reply::Files(view(&self.found, &self.filter))
            }
            Command::View => Reply::Files(view(&self.found, &self.filter)),
            Command::ToggleSelect(url) => {
                let added = self.selection.toggle(&url);
                Reply::Selection {
                    selected: self.selection.len(),
                    added,
                }
            }
            Command::SelectAllVisible => {
                let visible = view(&self.found, &self.filter);
                self.selection.select_all(&visible);
                Reply::Selection {
                    selected: self.selection.len(),
                    added: false,
                }
            }
            Command::ClearSelection => {
                self.selection.clear();
                Reply::Selection { selected: 0, added: false }
            }
            Command::GetSettings => Reply::Settings(self.settings.clone()),
        }
    }

    fn scan(&self, html: &str, page_url: &str, scope: Option<&str>) -> ScanReport {
        let policy = ScanPolicy::from_settings(&self.settings);
        let now = now_ms();
        match scope {
            Some(css) => crate::scan::scan_within(html, page_url, css, &policy, now),
            None => strategy::strategy_for(page_url).scan(html, page_url, &policy, now),
        }
    }

    /// Feeds a HAR capture into the observer (starting the capture if the
    /// caller has not), then returns its record count.
    pub fn import_har(&mut self, capture: CaptureId, path: &Path) -> Result<usize> {
        if !self.observer.is_monitoring(capture) {
            self.observer.start_monitoring(capture);
        }
        observe::replay_har(&mut self.observer, capture, path, now_ms())
    }

    /// Replaces heuristic metadata on the snapshot with HEAD-confirmed
    /// values. Blocking; call from `spawn_blocking` in async code.
    pub fn confirm_sizes(&mut self) {
        observe::confirm_candidates(&mut self.found);
    }

    /// Dispatches the current selection (or, with nothing selected, the
    /// whole visible view) and returns the aggregate report.
    pub async fn start_download(
        &mut self,
        root: &Path,
        fetcher: Arc<dyn Fetcher>,
    ) -> BatchReport {
        let visible = view(&self.found, &self.filter);
        let batch = if self.selection.is_empty() {
            visible
        } else {
            self.selection.materialize(&visible)
        };
        dispatch::run_batch(&batch, &self.settings, root, fetcher).await
    }
}

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
