use anyhow::Context;
use clap::Parser;
use colored::*;
use std::fs;

use cube_scanner::args::Args;
use cube_scanner::camera::{list_cameras, CameraSource};
use cube_scanner::capture::FaceCapture;
use cube_scanner::config::AppConfig;
use cube_scanner::cube::ColorCube;
use cube_scanner::logger;
use cube_scanner::output::WindowFrontend;
use cube_scanner::session::ScanSession;
use cube_scanner::types::FaceId;
use cube_scanner::ScanError;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init();

    if args.list {
        let cameras = list_cameras()?;
        println!("Available Cameras:");
        println!("{:<5} | {:<30} | {:<10}", "Index", "Name", "Misc");
        println!("{}", "-".repeat(60));
        for cam in cameras {
            println!("{:<5} | {:<30} | {:?}", cam.index(), cam.human_name(), cam.misc());
        }
        return Ok(());
    }

    let mut config = AppConfig::load(&args.config)?;
    args.apply(&mut config);
    config.validate()?;

    let camera = CameraSource::new(config.camera.index)
        .with_context(|| format!("Failed to open camera {}", config.camera.index))?;
    println!("{}", format!("Opened camera: {}", camera.name()).green());
    println!("Controls: [SPACE] capture  [N] accept  [R] rescan  [ESC] cancel");

    let session = ScanSession::new(camera, WindowFrontend::new(), FaceCapture::from_config(&config));
    let mut cube = ColorCube::new();
    match session.scan(&mut cube) {
        Ok(_) => {}
        Err(ScanError::Cancelled) => {
            println!("{}", "Scan cancelled.".yellow());
            return Ok(());
        }
        Err(e) => return Err(e).context("Scan failed"),
    }

    println!("{}", "All six faces scanned.".green());
    print_cube(&cube);

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&cube)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote cube to {}", path.display());
    }

    Ok(())
}

fn print_cube(cube: &ColorCube) {
    for face in FaceId::ALL {
        println!("{}:", face.name().bold());
        for line in cube.face(face).to_letters().lines() {
            println!("  {}", line);
        }
    }

    let counts = cube.color_counts();
    let uneven: Vec<String> = counts
        .iter()
        .filter(|(_, n)| *n != 0 && *n != 9)
        .map(|(c, n)| format!("{:?}={}", c, n))
        .collect();
    if !uneven.is_empty() {
        println!("{}", format!("Warning: expected 9 of each color, got {}", uneven.join(", ")).yellow());
    }
}
