use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Camera index (overrides config, default 0)
    #[arg(short, long)]
    pub cam_index: Option<u32>,

    /// Pixel size of one sampled cell (overrides config, default 60)
    #[arg(short, long)]
    pub box_size: Option<u32>,

    /// Configuration file
    #[arg(long, default_value = AppConfig::DEFAULT_PATH)]
    pub config: PathBuf,

    /// Write the scanned cube as JSON here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Save every capture frame as PNG into this directory
    #[arg(long)]
    pub save_captures: Option<PathBuf>,

    /// List available cameras
    #[arg(long)]
    pub list: bool,
}

impl Args {
    /// Command line values take precedence over the file.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(index) = self.cam_index {
            config.camera.index = index;
        }
        if let Some(size) = self.box_size {
            config.grid.box_size = size;
        }
        if let Some(dir) = &self.save_captures {
            config.output.save_captures = Some(dir.clone());
        }
    }
}
