use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "covergen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a cover from a photo and write it as JPEG.
    Render(RenderArgs),
    /// Print the cover geometry and caption lines as JSON, using a fixed-width text model.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Source photo.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Square crop as `x,y,size` in source pixels. Defaults to the centered square.
    #[arg(long, value_parser = parse_crop)]
    crop: Option<[f64; 3]>,

    /// Caption text (overrides the style file).
    #[arg(long)]
    caption: Option<String>,

    /// Bar color as `#RRGGBB` or `#RRGGBBAA`.
    #[arg(long)]
    bar_color: Option<covergen::Rgba8>,

    /// Caption color as `#RRGGBB` or `#RRGGBBAA`.
    #[arg(long)]
    text_color: Option<covergen::Rgba8>,

    /// Logo image (raster or SVG) drawn in the top-left corner.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Font file used for the caption. Required when the caption is not empty.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Style JSON (bar_color, text_color, caption, show_logo).
    #[arg(long)]
    style: Option<PathBuf>,

    /// Engine config JSON (export_side, preview_margin, jpeg_quality).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Container width used to size the preview.
    #[arg(long, default_value_t = 600)]
    container_width: u32,

    /// Output JPEG path. Defaults to a name derived from the caption.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also write the preview surface as PNG.
    #[arg(long)]
    preview_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Cover side length in pixels.
    #[arg(long, default_value_t = 500)]
    side: u32,

    /// Caption text.
    #[arg(long, default_value = "")]
    caption: String,

    /// Width of one character as a fraction of the font size.
    #[arg(long, default_value_t = 0.5)]
    char_width: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn parse_crop(s: &str) -> Result<[f64; 3], String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, side] => Ok([*x, *y, *side]),
        _ => Err(format!("expected x,y,size, got '{s}'")),
    }
}

fn read_bytes(path: &Path, what: &str) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn make_surface(font: Option<&[u8]>) -> anyhow::Result<covergen::CpuSurface> {
    Ok(match font {
        Some(bytes) => covergen::CpuSurface::with_font(bytes.to_vec())?,
        None => covergen::CpuSurface::new(),
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => covergen::EngineConfig::from_json_file(path)?,
        None => covergen::EngineConfig::default(),
    };
    let mut style = match &args.style {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read style '{}'", path.display()))?;
            covergen::StyleConfig::from_json_str(&raw)?
        }
        None => covergen::StyleConfig::default(),
    };
    if let Some(caption) = args.caption {
        style.caption = caption;
    }
    if let Some(color) = args.bar_color {
        style.bar_color = color;
    }
    if let Some(color) = args.text_color {
        style.text_color = color;
    }

    let mut session = covergen::CoverSession::new(&config, args.container_width)?;
    if let Some(path) = &args.logo {
        let logo = covergen::LogoImage::decode(&read_bytes(path, "logo")?)?;
        session.set_logo(Some(logo))?;
        style.show_logo = true;
    }
    session.update_style(|s| *s = style)?;

    let photo = read_bytes(&args.in_path, "photo")?;
    let ticket = session.begin_load();
    let decoded = covergen::decode_image(&photo);
    let mut pending = match session.finish_load(ticket, decoded)? {
        covergen::LoadOutcome::Installed(pending) => pending,
        covergen::LoadOutcome::Superseded => anyhow::bail!("photo load was superseded"),
    };
    if let Some([x, y, side]) = args.crop
        && let Some(p) = session.set_crop(x, y, side, side)?
    {
        pending = p;
    }

    let font = args
        .font
        .as_deref()
        .map(|p| read_bytes(p, "font"))
        .transpose()?;
    let mut preview = make_surface(font.as_deref())?;
    let mut export = make_surface(font.as_deref())?;

    match session.complete(&pending, &mut preview, &mut export)? {
        covergen::RenderOutcome::Rendered { export: layout, .. } => {
            tracing::info!(lines = layout.lines.len(), "composed cover");
        }
        covergen::RenderOutcome::Superseded { .. } => anyhow::bail!("render was superseded"),
    }

    let frame = export.readback()?;
    let jpeg = covergen::encode_jpeg(&frame, config.jpeg_quality)?;
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(session.export_file_name()));
    covergen::write_output(&out, &jpeg)?;
    session.mark_saved();
    eprintln!("wrote {}", out.display());

    if let Some(path) = &args.preview_out {
        let png = covergen::encode_png(&preview.readback()?)?;
        covergen::write_output(path, &png)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let spec = covergen::SurfaceSpec::export(args.side)?;
    let image = covergen::SourceImage::from_rgba8(1, 1, vec![0, 0, 0, 255])?;
    let style = covergen::StyleConfig {
        caption: args.caption,
        ..Default::default()
    };
    let mut surface = covergen::RecordingSurface::new(args.char_width);
    let layout = covergen::render_cover(
        &mut surface,
        spec,
        covergen::CoverInputs {
            image: &image,
            crop: None,
            style: &style,
            logo: None,
        },
    )?;
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}
