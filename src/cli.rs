use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::chrome::DEFAULT_VIEWPORT;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TraceStyle {
    /// Pretty-printed JSON.
    Pretty,
    /// Single-line JSON for piping into other tools.
    Compact,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Local HTML file of the documentation page to replay against.
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// Fetch the page from a URL instead of reading a local file.
    #[arg(long)]
    pub page_url: Option<Url>,

    /// Replay against the built-in Material-style sample page.
    #[arg(long)]
    pub sample: bool,

    /// JSON timeline file: an optional `initial` state plus a list of
    /// `scroll` and `resize` events.
    #[arg(long)]
    pub timeline: Option<PathBuf>,

    /// Comma-separated absolute scroll offsets to replay in order (shortcut
    /// for a scroll-only timeline).
    #[arg(long, value_delimiter = ',')]
    pub offsets: Vec<u64>,

    /// Scroll offset the page starts at. A timeline file's `initial` block
    /// takes precedence.
    #[arg(long, default_value_t = 0)]
    pub initial_offset: u64,

    /// Viewport width in px until a resize event changes it.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT.width)]
    pub viewport_width: u32,

    /// Viewport height in px until a resize event changes it.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT.height)]
    pub viewport_height: u32,

    /// Where to write the replayed page. Defaults to `<input>-replayed.html`
    /// next to the input file, or `replayed.html` for other sources.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Write a JSON trace of every event and the commands it produced.
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Formatting of the trace file.
    #[arg(long, value_enum, default_value = "pretty")]
    pub trace_style: TraceStyle,

    /// Leave Dark Reader overrides in place instead of stripping them before
    /// the replay.
    #[arg(long)]
    pub keep_dark_reader: bool,

    /// HTTP User-Agent used when fetching the page.
    #[arg(long, default_value = "docs-chrome-replay/0.1")]
    pub user_agent: String,
}
