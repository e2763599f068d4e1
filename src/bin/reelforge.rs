use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reelforge::{
    DropPolicy, FfmpegEncoder, FfmpegEncoderOpts, Fps, MediaBundle, MediaDecoder, RenderConfig,
    RenderSession, Transcript, system_font_families,
};

#[derive(Parser, Debug)]
#[command(name = "reelforge", version, about = "Images + voice + transcript -> captioned MP4")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the MP4 (requires `ffmpeg` and `ffprobe` on PATH).
    Render(RenderArgs),
    /// Print the segment and caption plan as JSON without decoding images.
    Plan(InputArgs),
    /// Render the composite at one instant as a PNG.
    Frame(FrameArgs),
    /// List installed font families usable as `--font`.
    Fonts,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Media directory holding `images/` and the voice track.
    #[arg(long)]
    dir: PathBuf,

    /// Transcript JSON (word list or Whisper result). Omit for no captions.
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Render config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Caption font: a font file path or an installed family name.
    #[arg(long)]
    font: Option<String>,

    /// Voice-track file name inside `--dir`.
    #[arg(long)]
    audio_file: Option<String>,

    /// Re-split the audio across surviving images when some fail to decode.
    #[arg(long, default_value_t = false)]
    redistribute: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Refuse to overwrite an existing output.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// Composite frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Worker threads for compositing and ffmpeg.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Absolute time in seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Fonts => cmd_fonts(),
    }
}

struct Inputs {
    config: RenderConfig,
    bundle: MediaBundle,
    transcript: Transcript,
}

fn load_inputs(args: &InputArgs) -> anyhow::Result<Inputs> {
    let mut config = match args.config.as_ref() {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.fps = Fps::integer(fps)?;
    }
    if let Some(w) = args.width {
        config.canvas.width = w;
    }
    if let Some(h) = args.height {
        config.canvas.height = h;
    }
    if let Some(font) = args.font.as_ref() {
        config.caption.font = font.clone();
    }
    if let Some(audio_file) = args.audio_file.as_ref() {
        config.audio_file = audio_file.clone();
    }
    if args.redistribute {
        config.drop_policy = DropPolicy::Redistribute;
    }

    let bundle = MediaBundle::discover(&args.dir, &config.audio_file)?;
    let transcript = match args.transcript.as_ref() {
        Some(path) => Transcript::from_path(path)?,
        None => Transcript::default(),
    };
    tracing::info!(
        images = bundle.images.len(),
        words = transcript.len(),
        "inputs loaded"
    );
    Ok(Inputs {
        config,
        bundle,
        transcript,
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut inputs = load_inputs(&args.input)?;
    inputs.config.parallel |= args.parallel;
    if args.threads.is_some() {
        inputs.config.threads = args.threads;
    }

    let decoder = MediaDecoder::new();
    let mut encoder = FfmpegEncoder::new(FfmpegEncoderOpts {
        out_path: args.out.clone(),
        overwrite: !args.no_overwrite,
        bg_rgba: inputs.config.background.to_rgba8(),
        threads: inputs.config.threads,
    });
    let mut session = RenderSession::new(inputs.config, &decoder)?;
    let report = session.render(&inputs.bundle, &inputs.transcript, &mut encoder)?;

    for dropped in &report.dropped {
        eprintln!("dropped image {}: {}", dropped.path.display(), dropped.error);
    }
    eprintln!(
        "wrote {} ({} frames, {:.2}s)",
        args.out.display(),
        report.frames,
        report.audio_duration_secs
    );
    Ok(())
}

fn cmd_plan(args: InputArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args)?;
    let decoder = MediaDecoder::new();
    let mut session = RenderSession::new(inputs.config, &decoder)?;
    let spec = session.plan(&inputs.bundle, &inputs.transcript)?;
    let json = serde_json::to_string_pretty(&spec).context("serialize plan")?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    let decoder = MediaDecoder::new();
    let mut session = RenderSession::new(inputs.config, &decoder)?;
    let frame = session.render_still(&inputs.bundle, &inputs.transcript, args.time)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_fonts() -> anyhow::Result<()> {
    let families = system_font_families();
    if families.is_empty() {
        eprintln!("no system fonts found; pass a font file with --font");
    }
    for family in families {
        println!("{family}");
    }
    Ok(())
}
