use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "videodb", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a timeline compile request and print its schedule.
    Inspect(InspectArgs),
    /// Compile a timeline into a stream through the API.
    Stream(StreamArgs),
    /// Validate an editor timeline and render it through the API.
    Editor(EditorArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input timeline JSON (`{"request_type": "compile", "timeline": [...]}`).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Args, Debug)]
struct ApiArgs {
    /// API key; falls back to `VIDEO_DB_API_KEY`.
    #[arg(long)]
    api_key: Option<String>,

    /// API endpoint; falls back to `VIDEO_DB_BASE_URL`, then the public API.
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Parser, Debug)]
struct StreamArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    api: ApiArgs,
}

#[derive(Parser, Debug)]
struct EditorArgs {
    /// Input editor timeline JSON (`{"timeline": {...}}` or the bare timeline object).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Only validate and print a summary; do not call the API.
    #[arg(long)]
    check: bool,

    /// Also request a downloadable export of the rendered stream.
    #[arg(long)]
    download: bool,

    #[command(flatten)]
    api: ApiArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Stream(args) => cmd_stream(args),
        Command::Editor(args) => cmd_editor(args),
    }
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    let r = BufReader::new(f);
    let v = serde_json::from_reader(r)
        .with_context(|| format!("parse JSON '{}'", path.display()))?;
    Ok(v)
}

fn read_timeline(path: &Path) -> anyhow::Result<videodb::TimelineRequest> {
    let v = read_json(path)?;
    let req = videodb::TimelineRequest::from_json(&v)
        .with_context(|| format!("validate timeline '{}'", path.display()))?;
    Ok(req)
}

fn open_connection(api: &ApiArgs) -> anyhow::Result<videodb::Connection> {
    let mut config = match api.api_key.as_deref() {
        Some(key) => videodb::ClientConfig::new(key),
        None => videodb::ClientConfig::from_env()?,
    };
    if let Some(url) = api.base_url.as_deref() {
        config = config.base_url(url);
    } else if api.api_key.is_some()
        && let Ok(url) = std::env::var(videodb::BASE_URL_ENV)
    {
        config = config.base_url(url);
    }
    Ok(videodb::Connection::new(&config)?)
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|s| format!("{s:.3}"))
        .unwrap_or_else(|| "?".to_string())
}

fn print_stream(stream: &videodb::StreamRef) {
    println!("stream_url: {}", stream.stream_url);
    if let Some(player) = &stream.player_url {
        println!("player_url: {player}");
    }
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let req = read_timeline(&args.in_path)?;

    println!("fingerprint: {}", req.fingerprint());
    println!("inline:");
    for (i, slot) in req.inline_schedule().iter().enumerate() {
        println!(
            "  [{i}] {} start={} duration={}",
            slot.asset.asset_id(),
            fmt_opt(slot.start_sec),
            fmt_opt(slot.duration_sec)
        );
    }
    println!("overlays:");
    for (i, o) in req.overlays().enumerate() {
        let label = match o.asset() {
            videodb::Asset::Text(t) => format!("\"{}\"", t.text()),
            other => other.asset_id().unwrap_or_default().to_string(),
        };
        println!(
            "  [{i}] {} {label} at={:.3} duration={}",
            o.asset().kind(),
            o.start_offset(),
            fmt_opt(o.asset().duration_sec())
        );
    }
    println!("inline_duration: {}", fmt_opt(req.inline_duration()));
    Ok(())
}

fn cmd_stream(args: StreamArgs) -> anyhow::Result<()> {
    let req = read_timeline(&args.in_path)?;
    let conn = open_connection(&args.api)?;
    let stream = req.resolve(&conn).context("compile timeline")?;
    print_stream(&stream);
    Ok(())
}

fn cmd_editor(args: EditorArgs) -> anyhow::Result<()> {
    let v = read_json(&args.in_path)?;
    let timeline = videodb::editor::EditorTimeline::from_json(&v)
        .with_context(|| format!("validate editor timeline '{}'", args.in_path.display()))?;

    if args.check {
        println!(
            "tracks: {} clips: {} duration: {:.3}",
            timeline.tracks.len(),
            timeline.clip_count(),
            timeline.duration_sec()
        );
        return Ok(());
    }

    let conn = open_connection(&args.api)?;
    let stream = timeline
        .generate_stream(&conn)
        .context("render editor timeline")?;
    print_stream(&stream);

    if args.download {
        let data = timeline
            .download_stream(&conn, &stream.stream_url)
            .context("request download")?;
        println!("{}", serde_json::to_string_pretty(&data)?);
    }
    Ok(())
}
