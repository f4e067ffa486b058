use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "sceneline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a scene document.
    Validate(ValidateArgs),
    /// Resolve every visible object at one time and print the frame as JSON.
    Eval(EvalArgs),
    /// Bake physics-enabled objects into keyframes.
    Bake(BakeArgs),
    /// Merge a keyframe list into one object.
    ImportKeyframes(ImportArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Absolute time in seconds.
    #[arg(long)]
    time: f64,

    /// Treat the viewport camera as user-controlled.
    #[arg(long)]
    camera_override: bool,
}

#[derive(Parser, Debug)]
struct BakeArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output scene JSON (may equal the input).
    #[arg(long)]
    out: PathBuf,

    /// Absolute time the simulation starts at.
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    /// Simulation settings JSON; flags below override it.
    #[arg(long)]
    settings: Option<PathBuf>,

    #[command(flatten)]
    overrides: SimOverrides,
}

#[derive(Args, Debug)]
struct SimOverrides {
    /// Simulated span in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Recording rate.
    #[arg(long)]
    fps: Option<f64>,

    /// Vertical gravity (m/s², negative pulls down).
    #[arg(long, allow_hyphen_values = true)]
    gravity: Option<f64>,

    /// Integration step multiplier.
    #[arg(long)]
    time_scale: Option<f64>,

    /// Simplification tolerance; 0 keeps every sample.
    #[arg(long)]
    tolerance: Option<f64>,

    /// Retiming curve.
    #[arg(long, value_enum)]
    post_easing: Option<PostEasingChoice>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PostEasingChoice {
    None,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl From<PostEasingChoice> for sceneline::PostEasing {
    fn from(choice: PostEasingChoice) -> Self {
        match choice {
            PostEasingChoice::None => Self::None,
            PostEasingChoice::EaseIn => Self::EaseIn,
            PostEasingChoice::EaseOut => Self::EaseOut,
            PostEasingChoice::EaseInOut => Self::EaseInOut,
        }
    }
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output scene JSON (may equal the input).
    #[arg(long)]
    out: PathBuf,

    /// Target object id.
    #[arg(long)]
    object: String,

    /// Keyframe list JSON.
    #[arg(long)]
    keyframes: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Bake(args) => cmd_bake(args),
        Command::ImportKeyframes(args) => cmd_import(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_scene_json(path: &Path) -> anyhow::Result<sceneline::Scene> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scene: sceneline::Scene =
        serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    scene.validate()?;
    Ok(scene)
}

fn write_scene_json(path: &Path, scene: &sceneline::Scene) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, scene.to_json_pretty()?)
        .with_context(|| format!("write scene '{}'", path.display()))?;
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    eprintln!(
        "ok: '{}' with {} objects, ends at {}s",
        scene.name,
        scene.objects.len(),
        scene.end_time()
    );
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    let ctx = sceneline::EvalCtx {
        camera_override_active: args.camera_override,
    };
    let frame = sceneline::Evaluator::evaluate_scene(&scene, args.time, ctx);
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

fn load_settings(args: &BakeArgs) -> anyhow::Result<sceneline::SimulationSettings> {
    let mut settings: sceneline::SimulationSettings = match &args.settings {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open settings '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f)).with_context(|| "parse settings JSON")?
        }
        None => sceneline::SimulationSettings::default(),
    };
    let o = &args.overrides;
    if let Some(v) = o.duration {
        settings.duration = v;
    }
    if let Some(v) = o.fps {
        settings.fps = v;
    }
    if let Some(v) = o.gravity {
        settings.gravity = v;
    }
    if let Some(v) = o.time_scale {
        settings.time_scale = v;
    }
    if let Some(v) = o.tolerance {
        settings.simplification_tolerance = v;
    }
    if let Some(v) = o.post_easing {
        settings.post_easing = v.into();
    }
    settings.validate()?;
    Ok(settings)
}

fn cmd_bake(args: BakeArgs) -> anyhow::Result<()> {
    let mut scene = read_scene_json(&args.in_path)?;
    let settings = load_settings(&args)?;
    let report = sceneline::bake_scene(&mut scene, settings, args.start, None)?;
    write_scene_json(&args.out, &scene)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_import(args: ImportArgs) -> anyhow::Result<()> {
    let mut scene = read_scene_json(&args.in_path)?;
    let json = std::fs::read_to_string(&args.keyframes)
        .with_context(|| format!("read keyframes '{}'", args.keyframes.display()))?;
    let merged = scene
        .require_mut(&args.object)?
        .import_keyframes_json(&json)
        .with_context(|| format!("import keyframes into '{}'", args.object))?;
    write_scene_json(&args.out, &scene)?;
    eprintln!("merged {merged} keyframes into '{}'", args.object);
    Ok(())
}
