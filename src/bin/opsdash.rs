use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use opsdash::api::DEFAULT_BASE_URL;
use opsdash::chart::layout;
use opsdash::{ChartKind, ChartRenderer, ChartStyle, Client, Dataset, Surface, SurfaceRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "opsdash",
    version,
    about = "Render & refresh freelance-dashboard metric charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one chart from a JSON file or a backend endpoint.
    Render(RenderArgs),
    /// Re-fetch an endpoint on an interval and re-render the chart each tick.
    Watch(WatchArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Bar,
    Line,
}

impl From<KindArg> for ChartKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Bar => ChartKind::Bar,
            KindArg::Line => ChartKind::Line,
        }
    }
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Chart kind (bar or line).
    #[arg(long, value_enum, default_value = "bar")]
    kind: KindArg,
    /// Marker color for line charts (e.g., #4a90e2 or rgb(74, 144, 226)).
    #[arg(long)]
    color: Option<String>,
    /// Bar fill color (rgba(...) allowed).
    #[arg(long)]
    background_color: Option<String>,
    /// Bar outline / line stroke color.
    #[arg(long)]
    border_color: Option<String>,
    /// Stroke width in pixels.
    #[arg(long)]
    border_width: Option<u32>,
    /// Outer margin in pixels on all four sides.
    #[arg(long)]
    padding: Option<u32>,
}

impl StyleArgs {
    fn build(&self) -> Result<ChartStyle> {
        let mut style = ChartStyle {
            kind: self.kind.into(),
            ..ChartStyle::default()
        };
        if let Some(s) = &self.color {
            style.color = s.parse().map_err(|e| anyhow::anyhow!("--color: {e}"))?;
        }
        if let Some(s) = &self.background_color {
            style.background_color = s
                .parse()
                .map_err(|e| anyhow::anyhow!("--background-color: {e}"))?;
        }
        if let Some(s) = &self.border_color {
            style.border_color = s
                .parse()
                .map_err(|e| anyhow::anyhow!("--border-color: {e}"))?;
        }
        if let Some(w) = self.border_width {
            style.border_width = w;
        }
        if let Some(p) = self.padding {
            style.padding = p;
        }
        Ok(style)
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON file holding the dataset (an object of label: number pairs).
    #[arg(long, conflicts_with = "endpoint")]
    data: Option<PathBuf>,
    /// Backend endpoint to fetch instead (e.g., /revenue?months=6).
    #[arg(long)]
    endpoint: Option<String>,
    /// Base url of the dashboard backend.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Pick a nested object out of the payload (e.g., monthly or by_date).
    #[arg(long)]
    key: Option<String>,
    /// Output path (.png via the raster surface, .svg via the SVG backend).
    #[arg(long)]
    out: PathBuf,
    /// Width of the chart (default 800).
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Height of the chart (default 500).
    #[arg(long, default_value_t = 500)]
    height: u32,
    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Args, Debug)]
struct WatchArgs {
    /// Backend endpoint to poll (e.g., /time-tracking?days=30).
    #[arg(long)]
    endpoint: String,
    /// Base url of the dashboard backend.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Pick a nested object out of the payload (e.g., monthly or by_date).
    #[arg(long)]
    key: Option<String>,
    /// Output path rewritten on every tick.
    #[arg(long)]
    out: PathBuf,
    /// Refresh interval in seconds.
    #[arg(long, default_value_t = 30)]
    interval: u64,
    /// Stop after this many refreshes (runs until Ctrl-C when omitted).
    #[arg(long)]
    cycles: Option<u32>,
    /// Width of the chart (default 800).
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Height of the chart (default 500).
    #[arg(long, default_value_t = 500)]
    height: u32,
    #[command(flatten)]
    style: StyleArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Watch(args) => cmd_watch(args),
    }
}

/// Pull the dataset out of a payload, drilling into `key` when given.
fn extract_dataset(payload: serde_json::Value, key: Option<&str>) -> Result<Dataset> {
    let value = match key {
        Some(k) => payload
            .get(k)
            .cloned()
            .with_context(|| format!("key `{k}` not found in payload"))?,
        None => payload,
    };
    serde_json::from_value(value).context("expected an object of label: number pairs")
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let style = args.style.build()?;
    let payload: serde_json::Value = match (&args.data, &args.endpoint) {
        (Some(path), None) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?
        }
        (None, Some(endpoint)) => Client::new(&args.base_url).get_json(endpoint)?,
        _ => bail!("exactly one of --data or --endpoint is required"),
    };
    let dataset = extract_dataset(payload, args.key.as_deref())?;

    write_chart(&dataset, &style, args.width, args.height, &args.out)?;
    eprintln!(
        "Wrote {} chart of {} points to {}",
        match style.kind {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
        },
        dataset.len(),
        args.out.display()
    );
    Ok(())
}

fn write_chart(
    dataset: &Dataset,
    style: &ChartStyle,
    width: u32,
    height: u32,
    out: &Path,
) -> Result<()> {
    if out.extension().and_then(|e| e.to_str()) == Some("svg") {
        let scene = layout::build_scene(dataset, style, width, height);
        opsdash::render::render_to_file(&scene, out, opsdash::render::DEFAULT_CLEAR_COLOR)?;
    } else {
        let mut registry = SurfaceRegistry::new();
        registry.insert("chart", Surface::new(width, height));
        let renderer = ChartRenderer::new(&mut registry, "chart", dataset.clone(), style.clone());
        if renderer.scene().is_none() {
            bail!("chart draw produced no output");
        }
        registry.resolve("chart")?.save_png(out)?;
    }
    Ok(())
}

fn cmd_watch(args: WatchArgs) -> Result<()> {
    let style = args.style.build()?;
    let client = Client::new(&args.base_url);
    let endpoint = args.endpoint.clone();
    let key = args.key.clone();
    let out = args.out.clone();
    let (width, height) = (args.width, args.height);

    let refresh = {
        let style = style.clone();
        move || -> Result<()> {
            let payload = client.get_json(&endpoint)?;
            let dataset = extract_dataset(payload, key.as_deref())?;
            write_chart(&dataset, &style, width, height, &out)?;
            eprintln!("Refreshed {} ({} points)", out.display(), dataset.len());
            Ok(())
        }
    };

    // Eager first render; the scheduler only fires after a full interval.
    refresh()?;

    let ticks = Arc::new(AtomicU32::new(1));
    let mut scheduler = opsdash::RefreshScheduler::new(Duration::from_secs(args.interval));
    scheduler.start({
        let ticks = Arc::clone(&ticks);
        move || {
            if let Err(e) = refresh() {
                log::error!("refresh failed: {e:#}");
            }
            ticks.fetch_add(1, Ordering::Relaxed);
        }
    });

    match args.cycles {
        Some(n) => {
            while ticks.load(Ordering::Relaxed) < n {
                std::thread::sleep(Duration::from_millis(50));
            }
            scheduler.cancel();
        }
        None => loop {
            std::thread::sleep(Duration::from_secs(3600));
        },
    }
    Ok(())
}
