use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sceneloom", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the transition-compensated frame plan for a storyboard.
    Plan(PlanArgs),
    /// Decode a scene's overlay objects to pixel space at a canvas size.
    Objects(ObjectsArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Emit the plan as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ObjectsArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scene id to decode.
    #[arg(long)]
    scene: String,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Emit the decoded objects as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Objects(args) => cmd_objects(args),
    }
}

fn read_storyboard(path: &Path) -> anyhow::Result<sceneloom::Storyboard> {
    let f = File::open(path).with_context(|| format!("open storyboard '{}'", path.display()))?;
    let r = BufReader::new(f);
    let storyboard: sceneloom::Storyboard =
        serde_json::from_reader(r).with_context(|| "parse storyboard JSON")?;
    Ok(storyboard)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let storyboard = read_storyboard(&args.in_path)?;
    storyboard.validate()?;

    let plan = storyboard.plan()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!(
        "{} scenes, {} frames total ({:.2}s at {}/{} fps)",
        plan.slots.len(),
        plan.total_frames,
        plan.duration_secs(),
        plan.fps.num,
        plan.fps.den,
    );
    for slot in &plan.slots {
        println!(
            "  {:<12} start {:>5}  visible {:>4}  overlay {:>4}  media {:>4}  fade-out {:>2}",
            slot.scene_id,
            slot.start_frame.0,
            slot.visible_frames,
            slot.overlay_frames,
            slot.media_frames,
            slot.transition_out_frames,
        );
    }
    Ok(())
}

fn cmd_objects(args: ObjectsArgs) -> anyhow::Result<()> {
    let storyboard = read_storyboard(&args.in_path)?;
    storyboard.validate()?;

    let scene = storyboard
        .scenes
        .iter()
        .find(|s| s.id == args.scene)
        .with_context(|| format!("scene '{}' not found in storyboard", args.scene))?;

    let canvas = sceneloom::CanvasSize::new(args.width, args.height);
    if !canvas.is_usable() {
        anyhow::bail!("canvas dimensions must be positive finite numbers");
    }
    let objects = sceneloom::decode_objects(&scene.objects, canvas)?;

    if args.json {
        let rows: Vec<serde_json::Value> = objects
            .iter()
            .map(|obj| {
                serde_json::json!({
                    "text": obj.text,
                    "left": obj.left,
                    "top": obj.top,
                    "width": obj.width,
                    "height": obj.height,
                    "fontSizePx": obj.font_size,
                    "fontFamily": obj.font_family,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{} objects at {}x{} (diag {})",
        objects.len(),
        args.width,
        args.height,
        canvas.diag()
    );
    for obj in &objects {
        println!(
            "  {:<24} left {:>7.1}  top {:>7.1}  w {:>7.1}  h {:>7.1}  font {}",
            truncate(&obj.text, 24),
            obj.left,
            obj.top,
            obj.width,
            obj.height,
            obj.font_size
                .map_or("default".to_string(), |v| format!("{v:.1}px")),
        );
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
