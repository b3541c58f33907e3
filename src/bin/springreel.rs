use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand};
use springreel::encode::{
    FfmpegSink, FfmpegSinkOpts, PngSequenceSink, is_ffmpeg_on_path, write_png,
};
use springreel::intro::{self, IntroConfig, Variant};
use springreel::{FrameIndex, FrameRange, RenderSession, RenderSessionOpts};

#[derive(Parser, Debug)]
#[command(name = "springreel", version, about = "Render spring-animated intro videos")]
struct Cli {
    /// Log at DEBUG level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the whole sequence as MP4 (requires `ffmpeg` on PATH) or a PNG sequence.
    Render(RenderArgs),
    /// Print the node tree and display list of one frame as JSON.
    Inspect(InspectArgs),
    /// List the available variants.
    Variants,
}

#[derive(Args, Debug)]
struct IntroArgs {
    /// JSON config file; logo and font paths resolve next to it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Variant to build, overriding the config.
    #[arg(long)]
    variant: Option<Variant>,

    /// Output width, overriding the config.
    #[arg(long)]
    width: Option<u32>,

    /// Output height, overriding the config.
    #[arg(long)]
    height: Option<u32>,

    /// Frames per second, overriding the config.
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    intro: IntroArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    intro: IntroArgs,

    /// Output MP4 path.
    #[arg(long, required_unless_present = "png_dir", conflicts_with = "png_dir")]
    out: Option<PathBuf>,

    /// Write numbered PNG frames into this directory instead of encoding MP4.
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Overwrite existing output (`--overwrite false` refuses to).
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    overwrite: bool,

    /// x264 constant rate factor (0-51).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=51))]
    crf: Option<u8>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Enable static-frame elision within chunks.
    #[arg(long, default_value_t = false)]
    static_frame_elision: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    intro: IntroArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Write the JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Variants => {
            for v in Variant::ALL {
                println!("{:<14} {}", v.name(), v.summary());
            }
            Ok(())
        }
    }
}

fn load_config(args: &IntroArgs) -> anyhow::Result<IntroConfig> {
    let mut cfg = match &args.config {
        Some(path) => IntroConfig::from_path(path)?,
        None => IntroConfig::default(),
    };
    if let Some(v) = args.variant {
        cfg.variant = v;
    }
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn session(args: &IntroArgs, opts: RenderSessionOpts) -> anyhow::Result<RenderSession> {
    let cfg = load_config(args)?;
    let comp = intro::build(cfg)?;
    Ok(RenderSession::new(comp, opts)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut sess = session(&args.intro, RenderSessionOpts::default())?;
    let frame = sess.render_frame(FrameIndex(args.frame))?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = RenderSessionOpts {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
        static_frame_elision: args.static_frame_elision,
        ..RenderSessionOpts::default()
    };
    let mut sess = session(&args.intro, opts)?;
    let range = FrameRange::new(
        FrameIndex(0),
        FrameIndex(sess.composition().duration_frames()),
    )?;
    let bg = sess.composition().background();

    let (stats, written) = match (&args.png_dir, &args.out) {
        (Some(dir), _) => {
            let mut sink = PngSequenceSink::new(dir.clone()).with_overwrite(args.overwrite);
            (sess.render_range(range, &mut sink)?, dir.clone())
        }
        (None, Some(out)) => {
            anyhow::ensure!(
                is_ffmpeg_on_path(),
                "ffmpeg not found on PATH; use --png-dir to write frames instead"
            );
            let mut sink = FfmpegSink::new(FfmpegSinkOpts {
                overwrite: args.overwrite,
                bg_rgb: [bg.r, bg.g, bg.b],
                crf: args.crf,
                ..FfmpegSinkOpts::new(out.clone())
            });
            (sess.render_range(range, &mut sink)?, out.clone())
        }
        (None, None) => anyhow::bail!("either --out or --png-dir is required"),
    };

    tracing::info!(
        frames = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "render finished"
    );
    eprintln!("wrote {}", written.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mut sess = session(&args.intro, RenderSessionOpts::default())?;
    let snapshot = sess.evaluate(FrameIndex(args.frame))?;
    let json = serde_json::to_string_pretty(&snapshot).context("serialize frame snapshot")?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
