use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use crosshair_tracker::{
    CpuGraphics, CursorOverlay, OverlaySettings, Point, Rect, SharedResources, TickInput,
    Timestamp, visible_fields,
};

#[derive(Parser, Debug)]
#[command(name = "crosshair-tracker", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the default settings as JSON.
    Defaults,
    /// Print the settings fields that apply to a configuration.
    Fields(FieldsArgs),
    /// Replay a pointer trace and write the final frame as a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FieldsArgs {
    /// Settings JSON (defaults when omitted).
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Settings JSON (defaults when omitted).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Pointer trace JSON.
    #[arg(long)]
    trace: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

/// Recorded pointer movement.
#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct PointerTrace {
    /// Active display as `[x0, y0, x1, y1]`.
    #[serde(default)]
    display: Option<[f64; 4]>,
    samples: Vec<PointerSample>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct PointerSample {
    x: f64,
    y: f64,
    /// Seconds since the previous sample.
    dt: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Defaults => cmd_defaults(),
        Command::Fields(args) => cmd_fields(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("crosshair_tracker={level},warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<OverlaySettings> {
    match path {
        Some(p) => OverlaySettings::from_path(p)
            .with_context(|| format!("load settings '{}'", p.display())),
        None => Ok(OverlaySettings::default()),
    }
}

fn cmd_defaults() -> anyhow::Result<()> {
    println!("{}", OverlaySettings::default().to_json_pretty()?);
    Ok(())
}

fn cmd_fields(args: FieldsArgs) -> anyhow::Result<()> {
    let settings = load_settings(args.settings.as_deref())?;
    for name in visible_fields(&settings) {
        println!("{name}");
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let settings = load_settings(args.settings.as_deref())?;
    let f = std::fs::File::open(&args.trace)
        .with_context(|| format!("open trace '{}'", args.trace.display()))?;
    let trace: PointerTrace = serde_json::from_reader(std::io::BufReader::new(f))
        .with_context(|| format!("parse trace '{}'", args.trace.display()))?;
    let display = trace
        .display
        .map(|[x0, y0, x1, y1]| Rect::new(x0, y0, x1, y1));

    let shared = SharedResources::new();
    let mut gfx = CpuGraphics::new();
    let mut overlay = CursorOverlay::new(&settings, &shared);

    let mut now = Timestamp(0);
    for s in &trace.samples {
        now = now.after_secs(s.dt);
        overlay.tick(&TickInput {
            pointer: Some(Point::new(s.x, s.y)),
            display,
            elapsed_secs: s.dt,
            now,
        });
    }

    let (w, h) = overlay.frame_size();
    gfx.begin_frame(w, h)?;
    overlay.render(&mut gfx, now);
    let frame = gfx.finish_frame()?.into_straight();
    overlay.destroy(&mut gfx);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} samples)",
        args.out.display(),
        trace.samples.len()
    );
    Ok(())
}
