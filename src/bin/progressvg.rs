use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "progressvg", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the shape's svg markup.
    Svg(SvgArgs),
    /// Rasterize the shape to a PNG.
    Png(PngArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Circle,
    Semicircle,
    Line,
}

impl From<KindArg> for progressvg::ShapeKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Circle => Self::Circle,
            KindArg::Semicircle => Self::SemiCircle,
            KindArg::Line => Self::Line,
        }
    }
}

#[derive(Args, Debug)]
struct ShapeArgs {
    /// Built-in shape.
    #[arg(long, value_enum, default_value_t = KindArg::Circle)]
    shape: KindArg,

    /// Custom path data; overrides `--shape`.
    #[arg(long)]
    path: Option<String>,

    /// Progress in [0, 1]. Out-of-range values are clamped.
    #[arg(long, default_value_t = 1.0)]
    progress: f64,

    /// Options JSON file (camelCase keys, e.g. `strokeWidth`, `trailColor`).
    #[arg(long)]
    options: Option<PathBuf>,

    /// Inline options JSON, applied instead of `--options`.
    #[arg(long = "options-json", conflicts_with = "options")]
    options_json: Option<String>,

    /// Overlay text.
    #[arg(long)]
    text: Option<String>,

    /// Animate from 0 over this many milliseconds instead of setting the value directly.
    #[arg(long)]
    animate_ms: Option<u64>,

    /// Simulated frame interval used while animating; must be positive.
    #[arg(long, default_value_t = 16.0, value_parser = positive_ms)]
    frame_ms: f64,
}

#[derive(Args, Debug)]
struct SvgArgs {
    #[command(flatten)]
    shape: ShapeArgs,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Keep inline style on the root element.
    #[arg(long)]
    with_style: bool,
}

#[derive(Args, Debug)]
struct PngArgs {
    #[command(flatten)]
    shape: ShapeArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 200)]
    width: u32,

    #[arg(long, default_value_t = 200)]
    height: u32,
}

fn positive_ms(s: &str) -> Result<f64, String> {
    let ms: f64 = s.parse().map_err(|e| format!("'{s}' is not a number: {e}"))?;
    if !ms.is_finite() || ms <= 0.0 {
        return Err(format!("frame interval must be a positive number of ms, got {s}"));
    }
    Ok(ms)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Svg(args) => cmd_svg(args),
        Command::Png(args) => cmd_png(args),
    }
}

fn read_patch(args: &ShapeArgs) -> anyhow::Result<progressvg::OptionsPatch> {
    let patch = match (&args.options, &args.options_json) {
        (_, Some(json)) => progressvg::OptionsPatch::from_json_str(json)
            .context("parse --options-json")?,
        (Some(path), None) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read options '{}'", path.display()))?;
            progressvg::OptionsPatch::from_json_str(&raw)
                .with_context(|| format!("parse options '{}'", path.display()))?
        }
        (None, None) => progressvg::OptionsPatch::default(),
    };
    Ok(match &args.text {
        Some(text) => patch.text_value(text.clone()),
        None => patch,
    })
}

fn build_shape(args: &ShapeArgs) -> anyhow::Result<(progressvg::Host, progressvg::Shape)> {
    let host = progressvg::Host::new();
    {
        let mut doc = host.document_mut();
        let container = doc.create_element("div");
        doc.set_attribute(container, "id", "progress")?;
        let root = doc.root();
        doc.append_child(root, container)?;
    }

    let builder = progressvg::ShapeBuilder::new(&host)
        .container("#progress")
        .options(read_patch(args)?);
    let builder = match &args.path {
        Some(d) => builder.geometry(progressvg::CustomPath::new(d.as_str())?),
        None => builder.kind(args.shape.into()),
    };
    let shape = builder.build()?;

    match args.animate_ms {
        Some(ms) => {
            let opts = progressvg::AnimateOpts::default().duration(ms);
            shape.animate_with(args.progress, opts)?;
            let max_frames = (ms as f64 / args.frame_ms).ceil() as usize + 2;
            let ticks = host.run_until_idle(args.frame_ms, max_frames);
            tracing::info!(ticks, value = shape.value()?, "animation settled");
        }
        None => shape.set(args.progress)?,
    }
    Ok((host, shape))
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let (_host, shape) = build_shape(&args.shape)?;
    let body = if args.with_style {
        shape.svg_markup()?
    } else {
        shape.vector_markup()?
    };

    match &args.out {
        Some(path) => {
            ensure_parent(path)?;
            fs::write(path, body).with_context(|| format!("write svg '{}'", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{body}").context("write svg to stdout")?;
        }
    }
    Ok(())
}

fn cmd_png(args: PngArgs) -> anyhow::Result<()> {
    let (_host, shape) = build_shape(&args.shape)?;
    let raster = progressvg::rasterize_shape(&shape, args.width, args.height)?;
    let png = progressvg::encode_png(&raster)?;

    ensure_parent(&args.out)?;
    fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;
    tracing::info!(path = %args.out.display(), "wrote png");
    Ok(())
}
