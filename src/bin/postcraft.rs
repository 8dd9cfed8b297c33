use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "postcraft", version, about = "Compose photo posts with filters and styled text")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode an upload, cap it at 1000 px and write a quality-70 JPEG.
    Normalize(NormalizeArgs),
    /// Apply a filter and text overlay to a normalized JPEG.
    Compose(ComposeArgs),
    /// Print the CSS preview description as JSON.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Uploaded image file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Declared MIME type, used when the content is not recognised.
    #[arg(long)]
    mime: Option<String>,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    /// Studio config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Normalized JPEG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JPEG path.
    #[arg(long, default_value = postcraft::EXPORT_FILE_NAME)]
    out: PathBuf,

    /// Colour filter.
    #[arg(long, value_enum, default_value_t = FilterChoice::None)]
    filter: FilterChoice,

    #[command(flatten)]
    overlay: OverlayArgs,

    /// Studio config JSON (fonts).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Display width in CSS pixels.
    #[arg(long)]
    width: u32,

    /// Display height in CSS pixels.
    #[arg(long)]
    height: u32,

    /// Colour filter.
    #[arg(long, value_enum, default_value_t = FilterChoice::None)]
    filter: FilterChoice,

    #[command(flatten)]
    overlay: OverlayArgs,
}

#[derive(Args, Debug)]
struct OverlayArgs {
    /// Overlay text; `\n` separates lines.
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read overlay text from a UTF-8 file.
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Text design.
    #[arg(long, value_enum, default_value_t = DesignChoice::Standard)]
    design: DesignChoice,

    /// Fill colour (`#rrggbb`).
    #[arg(long, default_value = "#ffffff", value_parser = parse_rgb)]
    color: postcraft::Rgb8,

    /// Shadow colour (hex or CSS `rgba(...)`).
    #[arg(long, default_value = "rgba(0,0,0,0.7)", value_parser = parse_rgba)]
    shadow_color: postcraft::Rgba8,

    /// Horizontal anchor, percent of width.
    #[arg(long, default_value_t = 50.0)]
    x: f64,

    /// Vertical anchor, percent of height.
    #[arg(long, default_value_t = 50.0)]
    y: f64,

    /// Font scale multiplier (0.5 to 2.0).
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterChoice {
    None,
    Brighten,
    Warm,
    Grayscale,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DesignChoice {
    Standard,
    Serif,
    Pop,
    Impact,
    Neon,
}

impl From<FilterChoice> for postcraft::FilterSpec {
    fn from(c: FilterChoice) -> Self {
        match c {
            FilterChoice::None => Self::None,
            FilterChoice::Brighten => Self::Brighten,
            FilterChoice::Warm => Self::Warm,
            FilterChoice::Grayscale => Self::Grayscale,
        }
    }
}

impl From<DesignChoice> for postcraft::Design {
    fn from(c: DesignChoice) -> Self {
        match c {
            DesignChoice::Standard => Self::Standard,
            DesignChoice::Serif => Self::Serif,
            DesignChoice::Pop => Self::Pop,
            DesignChoice::Impact => Self::Impact,
            DesignChoice::Neon => Self::Neon,
        }
    }
}

fn parse_rgb(s: &str) -> Result<postcraft::Rgb8, String> {
    postcraft::Rgb8::parse(s).map_err(|e| e.to_string())
}

fn parse_rgba(s: &str) -> Result<postcraft::Rgba8, String> {
    postcraft::Rgba8::parse(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Normalize(args) => cmd_normalize(args),
        Command::Compose(args) => cmd_compose(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "postcraft=debug",
        _ => "postcraft=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<postcraft::StudioConfig> {
    let mut cfg = match path {
        Some(p) => postcraft::StudioConfig::load(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => postcraft::StudioConfig::default(),
    };
    cfg.apply_env(|k| std::env::var(k).ok())
        .context("apply environment overrides")?;
    Ok(cfg)
}

impl OverlayArgs {
    fn to_spec(&self) -> anyhow::Result<postcraft::TextOverlaySpec> {
        let text = match (&self.text, &self.text_file) {
            (Some(t), _) => t.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("read text file '{}'", path.display()))?,
            (None, None) => String::new(),
        };
        let spec = postcraft::TextOverlaySpec {
            text,
            design: self.design.into(),
            color: self.color,
            shadow_color: self.shadow_color,
            vertical_pos: self.y,
            horizontal_pos: self.x,
            font_scale: self.scale,
        };
        spec.validate()?;
        Ok(spec)
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let raw = std::fs::read(&args.in_path)
        .with_context(|| format!("read upload '{}'", args.in_path.display()))?;

    let img = postcraft::normalize_with(&raw, args.mime.as_deref(), cfg.ingest.resize_filter)?;
    write_output(&args.out, img.jpeg())?;

    eprintln!(
        "wrote {} ({}x{}, quality {})",
        args.out.display(),
        img.width(),
        img.height(),
        img.quality()
    );
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let overlay = args.overlay.to_spec()?;

    let jpeg = std::fs::read(&args.in_path)
        .with_context(|| format!("read normalized image '{}'", args.in_path.display()))?;
    let img = postcraft::NormalizedImage::from_jpeg(jpeg)?;

    let fonts = postcraft::FontBook::from_config(&cfg.fonts)?;
    let mut compositor = postcraft::Compositor::new(&fonts)?;
    let out = compositor.compose(&img, args.filter.into(), &overlay)?;
    write_output(&args.out, out.jpeg())?;

    eprintln!(
        "wrote {} ({}x{}, quality {})",
        args.out.display(),
        out.width(),
        out.height(),
        out.quality()
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let overlay = args.overlay.to_spec()?;
    let preview = postcraft::describe(args.width, args.height, &args.filter.into(), &overlay)?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &preview).context("serialize preview")?;
    writeln!(stdout).context("write preview")?;
    Ok(())
}
