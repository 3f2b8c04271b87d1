use anyhow::Context;
use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;

use cube_scanner::capture::FaceCapture;
use cube_scanner::config::AppConfig;
use cube_scanner::logger;
use cube_scanner::render::render_face;

/// Classify one face from a still photo, e.g. a frame saved with --save-captures.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Photo of a single face, centered
    image: PathBuf,

    /// Pixel size of one sampled cell (overrides config)
    #[arg(short, long)]
    box_size: Option<u32>,

    /// Configuration file, read only
    #[arg(long, default_value = AppConfig::DEFAULT_PATH)]
    config: PathBuf,

    /// Write the rendered face swatch here
    #[arg(short, long)]
    swatch: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init();

    let mut config = AppConfig::read(&cli.config)?;
    if let Some(size) = cli.box_size {
        config.grid.box_size = size;
    }
    config.validate()?;

    let frame = ImageReader::open(&cli.image)
        .with_context(|| format!("Failed to open {}", cli.image.display()))?
        .decode()?
        .to_rgb8();
    println!("Loaded {} ({}x{})", cli.image.display(), frame.width(), frame.height());

    let capture = FaceCapture::from_config(&config);
    let grid = capture.classify_frame(&frame)?;
    println!("{}", grid.to_letters());

    if let Some(path) = &cli.swatch {
        render_face(&grid, config.grid.box_size).save(path)?;
        println!("Wrote swatch to {}", path.display());
    }
    Ok(())
}
