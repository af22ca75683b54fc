use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use hbc_banner::{
    BannerScene, CpuBackend, DirAssets, FfmpegSink, FrameIndex, FrameInputs,
    GeneratorOpts, OfflineOpts, OfflineRunner, PngSequenceSink, resolve_frame,
};

#[derive(Parser, Debug)]
#[command(name = "hbc-banner", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the frame of one tick as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a PNG sequence.
    Frames(FramesArgs),
    /// Print the draw commands of one frame as JSON.
    Eval(EvalArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Asset root containing `img/` and `audio/`.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Bubble generator seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct DebugArgs {
    /// Start with the debug overlay hidden (it is shown by default).
    #[arg(long, default_value_t = false)]
    no_debug: bool,

    /// Hold the debug key down during this tick (repeatable); consecutive ticks are one press.
    #[arg(long = "toggle-debug-at")]
    toggle_debug_at: Vec<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Tick index (0-based); the frame drawn after that tick's update.
    #[arg(long)]
    tick: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    debug: DebugArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = true)]
    overwrite: bool,

    /// Duration in seconds.
    #[arg(long, conflicts_with = "ticks")]
    seconds: Option<f64>,

    /// Duration in ticks (default: intro plus two loops).
    #[arg(long)]
    ticks: Option<u64>,

    /// Disable audio mixing for this render.
    #[arg(long, default_value_t = false)]
    no_audio: bool,

    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    debug: DebugArgs,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of ticks to render.
    #[arg(long)]
    ticks: u64,

    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    debug: DebugArgs,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Frame counter value.
    #[arg(long)]
    frame: u64,

    /// Resolve as if the intro cue had already started.
    #[arg(long, default_value_t = false)]
    intro_started: bool,

    /// Bubble generator seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Eval(args) => cmd_eval(args),
    }
}

fn build_scene(seed: Option<u64>) -> anyhow::Result<BannerScene> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let scene = BannerScene::generate(&GeneratorOpts::default(), &mut rng)
        .context("generate bubble table")?;
    tracing::info!(?seed, bubbles = scene.bubbles.len(), "scene generated");
    Ok(scene)
}

fn runner(scene: &SceneArgs, debug: DebugArgs, opts: OfflineOpts) -> anyhow::Result<OfflineRunner> {
    let provider = DirAssets::new(&scene.assets);
    let opts = OfflineOpts {
        debug: !debug.no_debug,
        debug_toggles: debug.toggle_debug_at,
        ..opts
    };
    Ok(OfflineRunner::load(&provider, build_scene(scene.seed)?, opts)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let run = runner(
        &args.scene,
        args.debug,
        OfflineOpts {
            ticks: args.tick + 1,
            enable_audio: false,
            ..OfflineOpts::default()
        },
    )?;
    let mut backend = CpuBackend::new(run.scene().canvas, run.sprites())?;
    let frame = run.render_still(args.tick, &mut backend)?;

    hbc_banner::encode::png::write_png(&args.out, &frame, [255, 255, 255, 255])
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let defaults = OfflineOpts::default();
    let ticks = match (args.ticks, args.seconds) {
        (Some(t), _) => t,
        (None, Some(s)) => defaults.fps.secs_to_frames_floor(s),
        (None, None) => defaults.ticks,
    };
    let run = runner(
        &args.scene,
        args.debug,
        OfflineOpts {
            ticks,
            enable_audio: !args.no_audio,
            ..defaults
        },
    )?;
    let mut backend = CpuBackend::new(run.scene().canvas, run.sprites())?;
    let mut sink = FfmpegSink::new(&args.out).with_overwrite(args.overwrite);

    let stats = run
        .render(&mut backend, &mut sink)
        .with_context(|| format!("render '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} ticks, {} loop wraps)",
        args.out.display(),
        stats.ticks,
        stats.wraps
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let run = runner(
        &args.scene,
        args.debug,
        OfflineOpts {
            ticks: args.ticks,
            enable_audio: false,
            ..OfflineOpts::default()
        },
    )?;
    let mut backend = CpuBackend::new(run.scene().canvas, run.sprites())?;
    let mut sink = PngSequenceSink::new(&args.out_dir);
    run.render(&mut backend, &mut sink)
        .with_context(|| format!("render frames into '{}'", args.out_dir.display()))?;

    eprintln!("wrote {} frames to {}", sink.written(), args.out_dir.display());
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let scene = build_scene(args.seed)?;
    let commands = resolve_frame(
        &scene,
        FrameInputs {
            frame: FrameIndex(args.frame),
            intro_started: args.intro_started,
        },
    );
    let json = serde_json::to_string_pretty(&commands).context("serialize draw commands")?;
    println!("{json}");
    Ok(())
}
