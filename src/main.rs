use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use flowlink::config::LineConfig;
use flowlink::connector::{DrawInfo, compute_connector_geometry};
use flowlink::preview::{PreviewStyle, render_preview};
use flowlink::scene::SceneFile;
use flowlink::{Error, Result};
use resvg::usvg;
use tiny_skia::{Pixmap, Transform};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Route a connector through a scene and export the geometry or a preview
#[derive(Parser, Debug)]
#[command(name = "flowlink")]
#[command(about = "Route a Manhattan connector with sticky node snapping", long_about = None)]
struct Args {
    /// Scene file with nodes and one connector request (.json, .yaml or .yml)
    #[arg(value_name = "SCENE", required_unless_present = "completions")]
    input: Option<PathBuf>,

    /// Output file path (extension determines format: .json, .svg, .png or .pdf)
    #[arg(short, long, value_name = "OUTPUT", required_unless_present = "completions")]
    output: Option<PathBuf>,

    /// Built-in line preset used when the scene has no lineConfig
    #[arg(short, long, value_name = "NAME", conflicts_with = "line_config")]
    preset: Option<String>,

    /// Line config file (TOML or YAML) used when the scene has no lineConfig
    #[arg(long, value_name = "FILE")]
    line_config: Option<PathBuf>,

    /// Raster scale multiplier for PNG output (e.g. 2.0 for sharper output)
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,

    /// Outline the connector's local canvas and tip hit-box in previews
    #[arg(long)]
    show_frame: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(shell) = args.completions {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "flowlink", &mut std::io::stdout());
        return Ok(());
    }
    let input = args
        .input
        .as_deref()
        .ok_or(Error::MissingArgument("SCENE"))?;
    let output = args
        .output
        .as_deref()
        .ok_or(Error::MissingArgument("--output"))?;

    let fallback = load_line_config(args.preset.as_deref(), args.line_config.as_deref())?;
    let (scene, request) = SceneFile::load(input)?.into_parts(fallback)?;

    let mut draw = DrawInfo::default();
    compute_connector_geometry(&mut draw, &request, &scene.view());
    info!(
        connected = draw.is_connected_node,
        points = draw.line_info.broken_line_points.len(),
        "routed connector"
    );

    let output_ext = output
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let bytes = match output_ext.as_str() {
        "json" => serde_json::to_vec_pretty(&draw)?,
        "svg" | "png" | "pdf" => {
            let style = PreviewStyle {
                show_frame: args.show_frame,
                ..PreviewStyle::default()
            };
            let svg = render_preview(&scene.view(), &request, &draw, &style);
            match output_ext.as_str() {
                "png" => svg_to_png(&svg, args.png_scale)?,
                "pdf" => svg_to_pdf(&svg)?,
                _ => svg.into_bytes(),
            }
        }
        _ => {
            return Err(Error::UnsupportedFormat {
                kind: "output",
                ext: output_ext,
            });
        }
    };

    std::fs::write(output, bytes).map_err(|source| Error::Write {
        path: output.to_path_buf(),
        source,
    })?;
    eprintln!("{} saved to: {}", output_ext.to_ascii_uppercase(), output.display());
    Ok(())
}

fn load_line_config(preset: Option<&str>, file: Option<&Path>) -> Result<LineConfig> {
    if let Some(name) = preset {
        return LineConfig::from_preset(name);
    }
    let Some(path) = file else {
        return Ok(LineConfig::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => LineConfig::from_yaml(&content),
        Some("toml") => LineConfig::from_toml(&content),
        // Try TOML first, then YAML
        _ => LineConfig::from_toml(&content).or_else(|_| LineConfig::from_yaml(&content)),
    }
}

fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::Export(format!("invalid --png-scale value: {scale}")));
    }

    let mut opts = usvg::Options::default();
    opts.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| Error::Export(format!("failed to parse SVG: {e}")))?;

    let width = (tree.size().width() * scale).ceil() as u32;
    let height = (tree.size().height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Export("failed to create pixmap".to_string()))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| Error::Export(format!("failed to encode PNG: {e}")))
}

fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    use svg2pdf::usvg::fontdb;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let mut opts = svg2pdf::usvg::Options::default();
    opts.fontdb = Arc::new(db);

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opts)
        .map_err(|e| Error::Export(format!("failed to parse SVG: {e}")))?;

    // Labels as paths; embedding fails on hosts without the requested family.
    let mut options = svg2pdf::ConversionOptions::default();
    options.embed_text = false;

    svg2pdf::to_pdf(&tree, options, svg2pdf::PageOptions::default())
        .map_err(|e| Error::Export(format!("failed to convert SVG to PDF: {e}")))
}
