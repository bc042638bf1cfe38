mod autohide;
mod chrome;
mod cli;
mod darkmode;
mod dom;
mod fetcher;
mod resize;
mod sample;
mod timeline;
mod trace;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use autohide::Autohide;
use chrome::{ChromePresence, Viewport, apply_commands};
use cli::Args;
use dom::DomChrome;
use fetcher::PageFetcher;
use timeline::{InitialState, Timeline, TimelineEvent};
use trace::{ReplayTrace, TraceStep};
use url::Url;

pub use cli::{Args as CliArgs, TraceStyle};

pub async fn run(args: Args) -> anyhow::Result<()> {
    let source = page_source(&args)?;
    let cli_initial = InitialState {
        offset: args.initial_offset,
        viewport: Viewport::new(args.viewport_width, args.viewport_height),
    };
    let (initial, events) = replay_plan(&args, cli_initial)?;

    let html = load_page(&source, &args).await?;
    let input_digest = trace::digest(&html);

    let mut page = DomChrome::parse(&html);

    let dark_reader_stripped = if args.keep_dark_reader {
        false
    } else {
        darkmode::bootstrap(&mut page)
    };

    let presence = ChromePresence::of(&page);
    if !presence.header {
        tracing::warn!("page has no header region; header commands will be dropped");
    }

    let (steps, final_offset) = replay(&page, initial, &events);

    let out_path = args.out.clone().unwrap_or_else(|| default_out_path(&source));
    create_parent_dir(&out_path)?;
    let final_html = page.serialize()?;
    std::fs::write(&out_path, &final_html)
        .with_context(|| format!("write {}", out_path.display()))?;

    let output_digest = trace::digest(&final_html);
    tracing::info!(
        path = %out_path.display(),
        events = events.len(),
        digest = %output_digest,
        "wrote replayed page"
    );

    if let Some(trace_path) = &args.trace {
        let report = ReplayTrace {
            page: source.label(),
            input_digest,
            initial,
            chrome: presence,
            dark_reader_stripped,
            steps,
            final_offset,
            output_digest,
        };
        write_trace(trace_path, args.trace_style, &report)?;
        tracing::info!(path = %trace_path.display(), "wrote replay trace");
    }

    Ok(())
}

enum PageSource {
    Sample,
    File(PathBuf),
    Remote(Url),
}

impl PageSource {
    fn label(&self) -> String {
        match self {
            PageSource::Sample => "sample".to_string(),
            PageSource::File(path) => path.display().to_string(),
            PageSource::Remote(url) => url.to_string(),
        }
    }
}

fn page_source(args: &Args) -> anyhow::Result<PageSource> {
    match (args.sample, &args.page, &args.page_url) {
        (true, None, None) => Ok(PageSource::Sample),
        (false, Some(path), None) => Ok(PageSource::File(path.clone())),
        (false, None, Some(url)) => Ok(PageSource::Remote(url.clone())),
        (false, None, None) => {
            anyhow::bail!("no page to replay against; pass --page, --page-url or --sample")
        }
        _ => anyhow::bail!("--page, --page-url and --sample are mutually exclusive"),
    }
}

async fn load_page(source: &PageSource, args: &Args) -> anyhow::Result<String> {
    match source {
        PageSource::Sample => Ok(sample::sample_page()),
        PageSource::File(path) => {
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
        }
        PageSource::Remote(url) => {
            let fetcher = PageFetcher::new(&args.user_agent)?;
            fetcher.fetch_page(url).await
        }
    }
}

fn replay_plan(
    args: &Args,
    cli_initial: InitialState,
) -> anyhow::Result<(InitialState, Vec<TimelineEvent>)> {
    match (&args.timeline, args.offsets.is_empty()) {
        (Some(_), false) => anyhow::bail!("pass either --timeline or --offsets, not both"),
        (Some(path), true) => {
            let loaded = Timeline::load(path)?;
            Ok((loaded.initial.unwrap_or(cli_initial), loaded.events))
        }
        (None, false) => Ok((cli_initial, timeline::scroll_events(&args.offsets))),
        (None, true) => anyhow::bail!("nothing to replay; pass --timeline or --offsets"),
    }
}

fn replay(page: &DomChrome, initial: InitialState, events: &[TimelineEvent]) -> (Vec<TraceStep>, u64) {
    let mut autohide = Autohide::new(initial.offset);
    let mut viewport = initial.viewport;
    let mut steps = Vec::with_capacity(events.len());

    for (index, event) in events.iter().enumerate() {
        let (delta, commands) = match *event {
            TimelineEvent::Scroll { offset } => {
                let delta = offset as i64 - autohide.prev_offset() as i64;
                (Some(delta), autohide.on_scroll(offset, viewport))
            }
            TimelineEvent::Resize { width, height } => {
                viewport = Viewport::new(width, height);
                (None, resize::on_resize(viewport))
            }
        };

        let applied = apply_commands(page, &commands);
        tracing::debug!(index, ?event, commands = commands.len(), applied, "replayed event");
        steps.push(TraceStep {
            index,
            event: *event,
            delta,
            commands,
            applied,
        });
    }

    (steps, autohide.prev_offset())
}

fn default_out_path(source: &PageSource) -> PathBuf {
    match source {
        PageSource::File(path) => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("page");
            path.with_file_name(format!("{stem}-replayed.html"))
        }
        _ => PathBuf::from("replayed.html"),
    }
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }
    Ok(())
}

fn write_trace(path: &Path, style: TraceStyle, report: &ReplayTrace) -> anyhow::Result<()> {
    let json = match style {
        TraceStyle::Pretty => serde_json::to_string_pretty(report),
        TraceStyle::Compact => serde_json::to_string(report),
    }
    .context("serialize trace")?;
    create_parent_dir(path)?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
