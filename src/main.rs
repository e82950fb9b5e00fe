//! Render a double-occurrence word as a chord diagram.
//!
//! Every distinct symbol of the word must appear exactly twice; the two
//! occurrences become the endpoints of one curve on the skeleton circle.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use chorddraw::{ChordDiagram, RenderOptions};

#[derive(Parser)]
#[command(
    name = "chorddraw",
    version,
    about = "Render a double-occurrence word as a chord diagram"
)]
struct Cli {
    /// Symbols of the chord word; every symbol must appear exactly twice
    #[arg(required = true)]
    symbols: Vec<String>,

    /// Output image path; a .png extension switches to raster export
    #[arg(short, long, default_value = "out.svg")]
    output: PathBuf,

    /// Pixel scale factor for PNG export
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Canvas background ("transparent" leaves it unfilled)
    #[arg(long, default_value = "transparent")]
    background: String,

    /// JSON file overriding the default drawing options
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    let options = load_options(cli.config.as_deref())?;

    let diagram = ChordDiagram::parse(&cli.symbols)?;
    log::debug!(
        "chord word of {} chords: {:?}",
        diagram.word().n(),
        diagram.word().symbols()
    );

    let is_png = cli
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        let png = diagram.render_png(&options, &cli.background, cli.scale)?;
        fs::write(&cli.output, png)
            .with_context(|| format!("failed to write {}", cli.output.display()))?;
    } else {
        let svg = diagram.render_svg(&options, &cli.background)?;
        fs::write(&cli.output, svg)
            .with_context(|| format!("failed to write {}", cli.output.display()))?;
    }

    log::debug!("wrote {}", cli.output.display());
    Ok(())
}

fn load_options(path: Option<&Path>) -> Result<RenderOptions> {
    let Some(path) = path else {
        return Ok(RenderOptions::default());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    let options = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse options file {}", path.display()))?;
    Ok(options)
}
