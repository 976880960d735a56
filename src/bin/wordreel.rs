use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "wordreel", version, about = "Render vocabulary pronunciation videos")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one word to an MP4 (requires `ffmpeg`).
    Render(RenderArgs),
    /// Render every entry of a JSON manifest into a directory.
    Batch(BatchArgs),
    /// Render a single frame as a PNG.
    Preview(PreviewArgs),
    /// Print the English words found in a piece of text.
    Words(WordsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[arg(long)]
    word: String,

    /// Pronunciation audio, any format ffmpeg decodes.
    #[arg(long)]
    audio: PathBuf,

    /// Illustration image.
    #[arg(long)]
    image: PathBuf,

    /// Translation caption; only the first one is drawn.
    #[arg(long = "translation")]
    translations: Vec<String>,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Pipeline config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stamp placement seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// JSON array of `{ "word", "audio", "image", "translations" }`.
    #[arg(long)]
    manifest: PathBuf,

    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Re-render words whose `<word>.mp4` already exists.
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[arg(long)]
    word: String,

    #[arg(long)]
    image: PathBuf,

    #[arg(long = "translation")]
    translations: Vec<String>,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Frame count of the imagined video.
    #[arg(long, default_value_t = 900)]
    total: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct WordsArgs {
    text: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Words(args) => cmd_words(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<wordreel::PipelineConfig> {
    match path {
        Some(p) => Ok(wordreel::PipelineConfig::from_path(p)?),
        None => Ok(wordreel::PipelineConfig::default()),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if !args.overwrite && args.out.exists() {
        anyhow::bail!(
            "output '{}' already exists (pass --overwrite to replace it)",
            args.out.display()
        );
    }

    let config = load_config(args.config.as_ref())?;
    let mut pipeline = wordreel::VideoPipeline::new(config)?;

    let mut job = wordreel::WordJob::new(
        &args.word,
        &args.audio,
        &args.image,
        args.translations,
        &args.out,
    )?;
    if let Some(seed) = args.seed {
        job = job.with_seed(seed);
    }

    let report = pipeline.process(job)?;
    eprintln!(
        "wrote {} ({} frames, {} stamps, {:.1}s audio)",
        report.output.display(),
        report.total_frames,
        report.stamps,
        report.audio_secs
    );
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    let entries = wordreel::load_manifest(&args.manifest)?;
    let mut pipeline = wordreel::VideoPipeline::new(config)?;

    let policy = if args.overwrite {
        wordreel::OverwritePolicy::Overwrite
    } else {
        wordreel::OverwritePolicy::Skip
    };
    let summary = wordreel::run_batch(&mut pipeline, &entries, &args.out_dir, policy);

    for outcome in &summary.outcomes {
        match outcome {
            wordreel::BatchOutcome::Rendered(r) => eprintln!("rendered {}", r.output.display()),
            wordreel::BatchOutcome::Skipped { output, .. } => {
                eprintln!("skipped {}", output.display());
            }
            wordreel::BatchOutcome::Failed(e) => eprintln!("failed: {e}"),
        }
    }

    if summary.failed() > 0 {
        anyhow::bail!("{} of {} words failed", summary.failed(), entries.len());
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    let mut renderer = wordreel::JobRenderer::new(config)?;

    let mut job = wordreel::WordJob::new(
        &args.word,
        PathBuf::new(),
        &args.image,
        args.translations,
        &args.out,
    )?;
    if let Some(seed) = args.seed {
        job = job.with_seed(seed);
    }

    let surface = renderer.render_preview(&job, args.frame, args.total)?;
    wordreel::ensure_parent_dir(&args.out)?;
    surface
        .save_png(&args.out, wordreel::BACKGROUND)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_words(args: WordsArgs) -> anyhow::Result<()> {
    for word in wordreel::extract_words(&args.text) {
        println!("{word}");
    }
    Ok(())
}
