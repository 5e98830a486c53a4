//! colormap-lens - print colormaps as curves in perceptual color spaces
//!
//! Tables are written to stdout, logs to stderr.

use std::io::{self, BufWriter, Write};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colormap_lens::{palettes, ColorRange, Curve, DerivativeCurve, ExtractOptions,
                    PerceptualModel, DEDUP_TOLERANCE, DEFAULT_RESOLUTION};
use rayon::prelude::*;
use rgb::RGBA;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod table;
use table::View;

#[derive(Parser)]
#[command(name = "colormap-lens")]
#[command(author, version, about = "Colormaps in perceptual color spaces")]
#[command(long_about = "
Sample colormaps on a dense grid, drop the repeated colors and print
their coordinates (or derivatives) in a perceptual color space.

Examples:
  colormap-lens show viridis magma          # L, a, b in OKLab
  colormap-lens lightness greys -s 'CIE Lab'
  colormap-lens absdv viridis --levels 0    # no lookup table
  colormap-lens summary viridis plasma hue
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Colour space to use
    #[arg(short, long, global = true, default_value = "OKLab")]
    space: PerceptualModel,

    /// Number of samples on [0, 1]
    #[arg(short = 'n', long, global = true, default_value_t = DEFAULT_RESOLUTION)]
    resolution: usize,

    /// Size of the colormap lookup table (0 = evaluate directly)
    #[arg(long, global = true, default_value_t = 256)]
    levels: usize,

    /// Distance under which consecutive colors are merged
    #[arg(long, global = true, default_value_t = DEDUP_TOLERANCE)]
    tolerance: f64,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Coordinates of the colors
    Show(Colormaps),
    /// Lightness against the parameter
    Lightness(Colormaps),
    /// Chroma against the parameter
    Chroma(Colormaps),
    /// Hue against the parameter
    Hue(Colormaps),
    /// Derivatives of the coordinates
    Dv(Colormaps),
    /// Norm of the derivatives
    Absdv(Colormaps),
    /// One line of statistics per colormap
    Summary(Colormaps),
    /// List the known colormaps
    List,
}

#[derive(Args)]
struct Colormaps {
    /// Colormap names
    #[arg(required = true)]
    cmaps: Vec<String>,
}

/// How every colormap is sampled.
struct Settings {
    opts: ExtractOptions,
    levels: usize,
}

fn analyze(name: &str, settings: &Settings) -> Result<Curve> {
    let cmap = palettes::colormap::<RGBA<f64>>(name)?;
    let curve = if settings.levels > 0 {
        Curve::extract(&cmap.quantized(settings.levels).sampled(),
                       &settings.opts)
    } else {
        Curve::extract(&cmap.sampled(), &settings.opts)
    }.with_context(|| format!("Failed to sample colormap “{name}”"))?;
    info!(name, kept = curve.len(), dropped = curve.dropped(), "sampled");
    Ok(curve)
}

/// Analyze all colormaps in parallel, keeping their order.
fn analyze_all(names: &[String], settings: &Settings)
               -> Result<Vec<(String, Curve)>> {
    names.par_iter()
        .map(|name| Ok((name.clone(), analyze(name, settings)?)))
        .collect()
}

fn differentiate(name: &str, curve: &Curve) -> Result<DerivativeCurve> {
    curve.differentiate()
        .with_context(|| format!("Failed to differentiate “{name}”"))
}

fn curves(w: &mut impl Write, args: &Colormaps, settings: &Settings,
          view: View) -> Result<()> {
    for (name, curve) in analyze_all(&args.cmaps, settings)? {
        table::curve(w, &name, &curve, view)?;
    }
    Ok(())
}

fn derivatives(w: &mut impl Write, args: &Colormaps, settings: &Settings,
               norm: bool) -> Result<()> {
    for (name, curve) in analyze_all(&args.cmaps, settings)? {
        let dv = differentiate(&name, &curve)?;
        table::derivatives(w, &name, &dv, norm)?;
    }
    Ok(())
}

fn summary(w: &mut impl Write, args: &Colormaps, settings: &Settings)
           -> Result<()> {
    table::summary_header(w)?;
    for (name, curve) in analyze_all(&args.cmaps, settings)? {
        let dv = differentiate(&name, &curve)?;
        table::summary(w, &name, &curve, &dv)?;
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
              .unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let settings = Settings {
        opts: ExtractOptions::default().model(cli.space)
            .resolution(cli.resolution).tolerance(cli.tolerance),
        levels: cli.levels,
    };
    let mut out = BufWriter::new(io::stdout().lock());

    match cli.command {
        Commands::Show(args) => curves(&mut out, &args, &settings, View::Coords)?,
        Commands::Lightness(args) =>
            curves(&mut out, &args, &settings, View::Lightness)?,
        Commands::Chroma(args) => curves(&mut out, &args, &settings, View::Chroma)?,
        Commands::Hue(args) => curves(&mut out, &args, &settings, View::Hue)?,
        Commands::Dv(args) => derivatives(&mut out, &args, &settings, false)?,
        Commands::Absdv(args) => derivatives(&mut out, &args, &settings, true)?,
        Commands::Summary(args) => summary(&mut out, &args, &settings)?,
        Commands::List => {
            for (name, typ) in palettes::names() {
                writeln!(out, "{name}\t{typ:?}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
