// File: crates/harvest-demo/src/main.rs
// Summary: Loads exports + yield CSVs, builds the stalk scene, and writes SVG (plus optional PNG/JSON).

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use harvest_core::{load_pair, theme, ChartBuilder, LeafUnit, RenderTarget, UiState, YieldAggregation};
use harvest_render_skia::{RenderOptions, SkiaRenderer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render grain exports and yields as one wheat stalk per year", long_about = None)]
struct Cli {
    /// Exports CSV (Commodity_Description, Calendar_Year, Value)
    #[arg(long, default_value = "data/exports_data.csv", value_hint = ValueHint::FilePath)]
    exports: PathBuf,

    /// Yield CSV (same columns as the exports file)
    #[arg(long = "yield", default_value = "data/yield_data.csv", value_hint = ValueHint::FilePath)]
    yields: PathBuf,

    /// Output SVG path
    #[arg(short, long, default_value = "target/out/harvest.svg", value_hint = ValueHint::FilePath)]
    out: PathBuf,

    /// Also rasterize to this PNG path
    #[arg(long, value_hint = ValueHint::FilePath)]
    png: Option<PathBuf>,

    /// Also dump the scene as JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    json: Option<PathBuf>,

    /// Theme preset (field, dark, high-contrast)
    #[arg(long, default_value = "field")]
    theme: String,

    /// How yield rows of one crop are combined: sum or mean
    #[arg(long, default_value = "sum")]
    aggregation: YieldAggregation,

    /// What one leaf stands for: kmt (1000 MT) or tha (MT/HA).
    /// Defaults to the yield file's Unit_Description, else kmt.
    #[arg(long)]
    unit: Option<LeafUnit>,

    /// Highlight this crop's leaves
    #[arg(long)]
    select: Option<String>,

    /// PNG pixel density
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    // Output locations are checked before anything is loaded.
    let svg_target = RenderTarget::prepare(&cli.out).context("cannot write SVG output")?;
    let png_target = cli
        .png
        .as_deref()
        .map(|p| RenderTarget::prepare(p))
        .transpose()
        .context("cannot write PNG output")?;
    let json_target = cli
        .json
        .as_deref()
        .map(|p| RenderTarget::prepare(p))
        .transpose()
        .context("cannot write JSON output")?;

    let exports_path = resolve_path(&cli.exports)?;
    let yields_path = resolve_path(&cli.yields)?;
    info!(exports = %exports_path.display(), yields = %yields_path.display(), "loading CSV data");

    let (exports, yields) = load_pair(&exports_path, &yields_path).context("failed to load CSV data")?;
    println!("Loaded {} export rows and {} yield rows", exports.len(), yields.len());
    if exports.is_empty() && yields.is_empty() {
        warn!("both datasets are empty; every stalk will be bare");
    }

    let mut builder = ChartBuilder::new(&exports, &yields).aggregation(cli.aggregation);
    if let Some(unit) = cli.unit {
        builder = builder.unit(unit);
    }
    let scene = builder.build();
    info!(
        max_exports = scene.max_exports,
        leaves = scene.total_leaves(),
        aggregation = %scene.aggregation,
        unit = %scene.unit,
        "scene ready"
    );

    let mut ui = UiState::new();
    if let Some(crop) = cli.select.as_deref() {
        if !scene.crops().contains(crop) {
            warn!(crop, "selected crop does not appear in the data");
        }
        ui.toggle_crop(crop);
    }

    let theme = theme::find(&cli.theme);
    if !theme.name.eq_ignore_ascii_case(&cli.theme) {
        warn!(requested = %cli.theme, using = theme.name, "unknown theme");
    }

    svg_target.write(harvest_core::render_svg(&scene, &theme, &ui))?;
    println!("Wrote {}", svg_target.path().display());

    if let Some(target) = png_target {
        let opts = RenderOptions { theme, scale: cli.scale, ..RenderOptions::default() };
        let bytes = SkiaRenderer::new().render_to_png_bytes(&scene, &ui, &opts)?;
        target.write(&bytes)?;
        println!("Wrote {}", target.path().display());
    }

    if let Some(target) = json_target {
        target.write(scene.to_json()?)?;
        println!("Wrote {}", target.path().display());
    }

    Ok(())
}

/// Resolve path, trying the .csv/.cvs swap if the given name does not exist.
fn resolve_path(p: &Path) -> Result<PathBuf> {
    if p.exists() {
        return Ok(p.to_path_buf());
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            warn!(requested = %p.display(), using = %alt.display(), "extension swapped between .csv/.cvs");
            return Ok(alt);
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}
