use std::{
    io::Read as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mathanim", version)]
struct Cli {
    /// Log debug output (engine command line, captured streams).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the steps extracted from an explanation as JSON.
    Steps(StepsArgs),
    /// Print the generated Manim script.
    Script(ScriptArgs),
    /// Render an animation (requires `manim` on PATH) and print the video path.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct StepsArgs {
    /// Explanation text file, or `-` for stdin.
    #[arg(long)]
    explanation: PathBuf,
}

#[derive(Parser, Debug)]
struct ScriptArgs {
    /// Top-level expression (LaTeX).
    #[arg(long)]
    expression: String,

    /// Explanation text file, or `-` for stdin.
    #[arg(long)]
    explanation: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Top-level expression (LaTeX).
    #[arg(long)]
    expression: String,

    /// Explanation text file, or `-` for stdin.
    #[arg(long)]
    explanation: PathBuf,

    /// Quality tier: low, medium, or high. Anything else means medium.
    #[arg(long, default_value = "medium")]
    quality: String,

    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Media output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for the temporary script.
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Engine executable.
    #[arg(long)]
    engine: Option<String>,

    /// Extra engine argument placed before the script path (repeatable).
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    engine_args: Vec<String>,

    /// Kill the engine after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Fail instead of rendering when no steps are found.
    #[arg(long)]
    require_steps: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Steps(args) => cmd_steps(args),
        Command::Script(args) => cmd_script(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_explanation(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read explanation from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("read explanation '{}'", path.display()))
}

fn cmd_steps(args: StepsArgs) -> anyhow::Result<()> {
    let text = read_explanation(&args.explanation)?;
    let steps = mathanim::extract_steps(&text);
    let json = serde_json::to_string_pretty(&steps).context("serialize steps")?;
    println!("{json}");
    Ok(())
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let text = read_explanation(&args.explanation)?;
    let steps = mathanim::extract_steps(&text);
    print!("{}", mathanim::generate_script(&args.expression, &steps));
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => mathanim::AnimatorConfig::from_json_file(path)?,
        None => mathanim::AnimatorConfig::default(),
    };
    if let Some(out) = args.out {
        config.output_dir = out;
    }
    if let Some(dir) = args.temp_dir {
        config.temp_dir = dir;
    }
    if let Some(engine) = args.engine {
        config.engine.program = engine;
    }
    if !args.engine_args.is_empty() {
        config.engine.args = args.engine_args;
    }
    if let Some(secs) = args.timeout_secs {
        config.engine.timeout_secs = secs;
    }
    config.require_steps |= args.require_steps;

    let animator = mathanim::Animator::new(config)?;
    if !animator.engine_available() {
        tracing::warn!(
            engine = %animator.config().engine.program,
            "render engine did not answer --version; attempting render anyway"
        );
    }

    let explanation = read_explanation(&args.explanation)?;
    let request = mathanim::AnimationRequest::new(args.expression, explanation)
        .with_quality(mathanim::Quality::parse_lenient(&args.quality));

    let artifact = animator.animate(&request)?;
    println!("{}", artifact.path.display());
    Ok(())
}
