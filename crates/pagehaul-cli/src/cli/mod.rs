//! CLI for the pagehaul batch media downloader.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use pagehaul_core::candidate::FileKind;
use pagehaul_core::config;
use pagehaul_core::view::{
    FilterState, KindFilter, SizeFilter, SizeRange, SortKey, SortOrder, SourceFilter,
};
use std::path::PathBuf;

use commands::{run_completions, run_fetch, run_list, run_scan, run_sniff, run_watch};

/// Top-level CLI for the pagehaul batch media downloader.
#[derive(Debug, Parser)]
#[command(name = "pagehaul")]
#[command(about = "Pagehaul: batch media discovery and download for saved pages and network captures", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Page/capture inputs shared by the preview and download commands.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Path to a saved HTML page.
    #[arg(long, requires = "url")]
    pub page: Option<PathBuf>,

    /// Base URL the page was saved from (resolves relative links).
    #[arg(long)]
    pub url: Option<String>,

    /// Path to a HAR capture (DevTools export).
    #[arg(long)]
    pub har: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SourceArg {
    Page,
    Network,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TypeArg {
    Image,
    Video,
    Audio,
    Document,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SizeArg {
    /// Under 1 MiB.
    Small,
    /// 1–10 MiB.
    Medium,
    /// Over 10 MiB.
    Large,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Time,
    Size,
    Name,
    Type,
}

/// Filter and sort flags shared by `list` and `fetch`.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Keep only candidates from one discovery source.
    #[arg(long, value_enum)]
    pub source: Option<SourceArg>,

    /// Keep only one media type.
    #[arg(long = "type", value_enum)]
    pub kind: Option<TypeArg>,

    /// Size bucket.
    #[arg(long, value_enum, conflicts_with_all = ["min_size", "max_size"])]
    pub size: Option<SizeArg>,

    /// Custom minimum size in bytes (inclusive).
    #[arg(long)]
    pub min_size: Option<u64>,

    /// Custom maximum size in bytes (inclusive; requires --min-size).
    #[arg(long, requires = "min_size")]
    pub max_size: Option<u64>,

    /// Keep only one file extension, e.g. `png`.
    #[arg(long)]
    pub format: Option<String>,

    /// Sort key (default: time).
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Sort ascending (default direction depends on the key).
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,
}

impl FilterArgs {
    /// Validates the flags into engine filter state. An inverted custom
    /// range is rejected here, before it reaches the filter engine.
    pub fn to_state(&self) -> Result<FilterState> {
        let size = if let Some(min) = self.min_size {
            SizeFilter::Custom(SizeRange::new(min, self.max_size)?)
        } else {
            match self.size {
                None => SizeFilter::All,
                Some(SizeArg::Small) => SizeFilter::Small,
                Some(SizeArg::Medium) => SizeFilter::Medium,
                Some(SizeArg::Large) => SizeFilter::Large,
            }
        };

        let sort = match self.sort {
            None => SortKey::Time,
            Some(SortArg::Time) => SortKey::Time,
            Some(SortArg::Size) => SortKey::Size,
            Some(SortArg::Name) => SortKey::Name,
            Some(SortArg::Type) => SortKey::Kind,
        };
        let order = if self.asc {
            SortOrder::Ascending
        } else if self.desc {
            SortOrder::Descending
        } else {
            sort.default_order()
        };

        Ok(FilterState {
            source: match self.source {
                None => SourceFilter::All,
                Some(SourceArg::Page) => SourceFilter::Page,
                Some(SourceArg::Network) => SourceFilter::Network,
            },
            kind: match self.kind {
                None => KindFilter::All,
                Some(TypeArg::Image) => KindFilter::Only(FileKind::Image),
                Some(TypeArg::Video) => KindFilter::Only(FileKind::Video),
                Some(TypeArg::Audio) => KindFilter::Only(FileKind::Audio),
                Some(TypeArg::Document) => KindFilter::Only(FileKind::Document),
            },
            size,
            format: self.format.clone(),
            sort,
            order,
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Scan a saved HTML page for downloadable media.
    Scan {
        /// Path to the HTML file.
        page: PathBuf,

        /// Base URL the page was saved from.
        #[arg(long)]
        url: String,

        /// Restrict the scan to subtrees matching a CSS selector.
        #[arg(long)]
        within: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Ingest a HAR capture and list the media it recorded, newest first.
    Sniff {
        /// Path to the HAR file.
        har: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Merged, filtered, sorted preview of page and capture candidates.
    List {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Confirm sizes and types with HEAD requests before listing.
        #[arg(long)]
        probe: bool,

        #[arg(long)]
        json: bool,
    },

    /// Download the filtered candidates.
    Fetch {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Download only these URLs from the view (repeatable).
        #[arg(long = "pick")]
        picks: Vec<String>,

        /// Download root (default: current directory).
        #[arg(long)]
        out: Option<PathBuf>,

        /// Confirm sizes and types with HEAD requests before downloading.
        #[arg(long)]
        probe: bool,
    },

    /// Re-scan the inputs on a fixed interval and report snapshot changes.
    Watch {
        #[command(flatten)]
        inputs: InputArgs,

        /// Seconds between refresh passes.
        #[arg(long, default_value = "5")]
        interval: u64,

        /// Stop after N passes (0 = run until interrupted).
        #[arg(long, default_value = "0")]
        passes: u64,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let settings = config::load_or_init()?;
        tracing::debug!("loaded settings: {:?}", settings);

        match cli.command {
            CliCommand::Scan {
                page,
                url,
                within,
                json,
            } => run_scan(&settings, &page, &url, within.as_deref(), json),
            CliCommand::Sniff { har, json } => run_sniff(&settings, &har, json),
            CliCommand::List {
                inputs,
                filter,
                probe,
                json,
            } => run_list(&settings, &inputs, &filter, probe, json).await,
            CliCommand::Fetch {
                inputs,
                filter,
                picks,
                out,
                probe,
            } => run_fetch(&settings, &inputs, &filter, picks, out, probe).await,
            CliCommand::Watch {
                inputs,
                interval,
                passes,
            } => run_watch(&settings, &inputs, interval, passes).await,
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests;
