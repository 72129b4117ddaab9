//! Logging init: file under XDG state dir, or graceful fallback to stderr.

use anyhow::Result;
use std::fs;
use std::io;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,pagehaul=debug"))
}

/// Per-event writer handed out by the subscriber: the log file, or stderr
/// when cloning the file handle fails.
enum LogSink {
    File(fs::File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct FileWriter(fs::File);

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = LogSink;

    fn make_writer(&'a self) -> LogSink {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    }
}

/// Initialize structured logging to `~/.local/state/pagehaul/pagehaul.log`.
/// Returns Err when the log file cannot be opened so the caller can fall
/// back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let log_dir = xdg::BaseDirectories::with_prefix("pagehaul")?
        .get_state_home()
        .join("pagehaul");
    fs::create_dir_all(&log_dir)?;
    let path = log_dir.join("pagehaul.log");

    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_writer(FileWriter(file))
        .with_ansi(false)
        .init();

    tracing::info!("logging initialized at {}", path.display());
    Ok(())
}

/// Stderr-only logging, for when the state dir is unwritable.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
