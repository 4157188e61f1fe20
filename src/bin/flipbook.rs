use std::{
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "flipbook", version)]
struct Cli {
    /// Log library diagnostics to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the assembled pages and their face bindings as JSON.
    Pages(PagesArgs),
    /// Simulate the book frame by frame and print one JSON line per frame.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct PagesArgs {
    /// Input album JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Force full-image pages regardless of the album's setting.
    #[arg(long)]
    single_sided: bool,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input album JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Book configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Simulated duration in seconds.
    #[arg(long, default_value_t = 5.0)]
    seconds: f64,

    /// Page to turn to at the start.
    #[arg(long, allow_negative_numbers = true)]
    target: Option<i64>,

    /// Start with auto-play on.
    #[arg(long)]
    auto_play: bool,

    /// Auto-play speed preset.
    #[arg(long, value_enum)]
    speed: Option<SpeedChoice>,

    /// Curl tuning preset.
    #[arg(long, value_enum, default_value_t = BendChoice::Default)]
    bend: BendChoice,

    /// Pretend an AR session is active.
    #[arg(long)]
    ar: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SpeedChoice {
    Fast,
    Medium,
    Slow,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BendChoice {
    Default,
    Classic,
}

#[derive(serde::Serialize)]
struct FrameLine {
    time_ms: u64,
    target: usize,
    rendered: usize,
    hinges: Vec<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
    match cli.cmd {
        Command::Pages(args) => cmd_pages(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_album(path: &Path) -> anyhow::Result<flipbook::AlbumData> {
    flipbook::AlbumData::from_path(path)
        .with_context(|| format!("load album '{}'", path.display()))
}

fn read_config(path: Option<&Path>) -> anyhow::Result<flipbook::BookConfig> {
    match path {
        Some(p) => flipbook::BookConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(flipbook::BookConfig::default()),
    }
}

fn cmd_pages(args: PagesArgs) -> anyhow::Result<()> {
    let album = read_album(&args.in_path)?;
    let split_mode = album.split_mode() && !args.single_sided;
    let images = album.image_urls();
    let pages = flipbook::assemble(&images, split_mode);
    let faces = flipbook::book_faces(&images, split_mode, &Default::default());

    let out = serde_json::json!({
        "title": album.title(),
        "split_mode": split_mode,
        "page_count": pages.len(),
        "pages": pages,
        "faces": faces,
    });
    let stdout = std::io::stdout();
    let mut w = BufWriter::new(stdout.lock());
    serde_json::to_writer_pretty(&mut w, &out).context("write pages JSON")?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }
    if args.seconds.is_nan() || args.seconds < 0.0 {
        anyhow::bail!("--seconds must be >= 0");
    }

    let album = read_album(&args.in_path)?;
    let mut config = read_config(args.config.as_deref())?;
    if let BendChoice::Classic = args.bend {
        config.bend = flipbook::BendParams::classic();
    }

    let mut session = flipbook::BookSession::with_album(config, &album)?;
    session.set_ar_active(args.ar);
    if let Some(speed) = args.speed {
        session.set_auto_play_preset(match speed {
            SpeedChoice::Fast => flipbook::SpeedPreset::Fast,
            SpeedChoice::Medium => flipbook::SpeedPreset::Medium,
            SpeedChoice::Slow => flipbook::SpeedPreset::Slow,
        });
    }
    if args.auto_play {
        session.set_auto_play(true);
    }
    if let Some(target) = args.target {
        session.set_target_page(target);
    }

    let fps = u64::from(args.fps);
    let frames = (args.seconds * f64::from(args.fps)).round() as u64;

    let stdout = std::io::stdout();
    let mut w = BufWriter::new(stdout.lock());
    let mut elapsed_ms = 0;
    for i in 1..=frames {
        // Whole-millisecond frame times that never drift from i / fps.
        let t = i * 1000 / fps;
        let frame = session.advance(Duration::from_millis(t - elapsed_ms));
        elapsed_ms = t;
        let line = FrameLine {
            time_ms: frame.time.0,
            target: frame.target_page,
            rendered: frame.rendered_page,
            hinges: frame.pages.iter().map(|p| p.hinge.y).collect(),
        };
        serde_json::to_writer(&mut w, &line).context("write frame JSON")?;
        writeln!(w)?;
    }
    w.flush()?;
    session.teardown();
    Ok(())
}
