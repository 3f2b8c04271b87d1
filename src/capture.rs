use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::classifier::{classify, ClassifierParams};
use crate::config::AppConfig;
use crate::error::{Result, ScanError};
use crate::frontend::{FrameSource, ScanEvent, ScanFrontend};
use crate::render::draw_grid_overlay;
use crate::sampler::sample_median;
use crate::types::FaceGrid;

/// Placement of the centered 3x3 sampling grid on a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub start_x: u32,
    pub start_y: u32,
    pub box_size: u32,
}

impl GridGeometry {
    pub fn from_frame(width: u32, height: u32, box_size: u32) -> Result<Self> {
        let span = box_size.saturating_mul(3);
        if box_size == 0 || width < span || height < span {
            return Err(ScanError::FrameTooSmall { width, height, grid: span });
        }
        Ok(Self {
            start_x: (width - span) / 2,
            start_y: (height - span) / 2,
            box_size,
        })
    }

    pub fn span(&self) -> u32 {
        self.box_size * 3
    }

    /// Sample point of cell (`row`, `col`).
    pub fn cell_center(&self, row: u32, col: u32) -> (u32, u32) {
        let half = self.box_size / 2;
        (
            self.start_x + col * self.box_size + half,
            self.start_y + row * self.box_size + half,
        )
    }
}

/// Captures and classifies single faces.
#[derive(Debug, Clone)]
pub struct FaceCapture {
    pub box_size: u32,
    pub sample_region: u32,
    pub max_frame_failures: u32,
    pub params: ClassifierParams,
    pub save_dir: Option<PathBuf>,
}

impl Default for FaceCapture {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl FaceCapture {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            box_size: config.grid.box_size,
            sample_region: config.grid.sample_region,
            max_frame_failures: config.camera.max_frame_failures,
            params: config.classifier.clone(),
            save_dir: config.output.save_captures.clone(),
        }
    }

    /// Samples and classifies the 9 cells of `frame` in row-major order.
    pub fn classify_frame(&self, frame: &RgbImage) -> Result<FaceGrid> {
        let geometry = GridGeometry::from_frame(frame.width(), frame.height(), self.box_size)?;
        let mut grid = FaceGrid::default();
        for row in 0..3 {
            for col in 0..3 {
                let (x, y) = geometry.cell_center(row, col);
                let sample = sample_median(frame, x as i64, y as i64, self.sample_region)
                    .ok_or(ScanError::EmptyNeighborhood { x: x as i64, y: y as i64 })?;
                let color = classify(sample, &self.params);
                debug!(row, col, ?sample, ?color, "classified cell");
                grid.set(row as usize, col as usize, color);
            }
        }
        Ok(grid)
    }

    /// Shows the live preview until the user triggers a capture, then
    /// classifies one fresh frame.
    ///
    /// Failed preview reads are skipped; `max_frame_failures` in a row means
    /// the source is gone. A failed capture read is returned as
    /// `FrameRead` so the caller can rescan.
    pub fn capture_face<S, F>(&self, source: &mut S, frontend: &mut F) -> Result<FaceGrid>
    where
        S: FrameSource + ?Sized,
        F: ScanFrontend + ?Sized,
    {
        let mut failures = 0u32;
        loop {
            match source.next_frame() {
                Ok(mut frame) => {
                    failures = 0;
                    draw_grid_overlay(&mut frame, self.box_size);
                    frontend.show_preview(&frame)?;
                }
                Err(e) => {
                    failures += 1;
                    warn!("Preview frame dropped ({}/{}): {}", failures, self.max_frame_failures, e);
                    if failures >= self.max_frame_failures {
                        return Err(ScanError::SourceLost(failures));
                    }
                }
            }

            match frontend.poll_event()? {
                Some(ScanEvent::Capture) => break,
                Some(ScanEvent::Cancel) => return Err(ScanError::Cancelled),
                _ => {}
            }
        }

        let frame = source.next_frame()?;
        if let Some(dir) = &self.save_dir {
            if let Err(e) = self.save_capture(dir, &frame) {
                warn!("Could not save capture frame: {}", e);
            }
        }
        self.classify_frame(&frame)
    }

    fn save_capture(&self, dir: &Path, frame: &RgbImage) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let path = dir.join(format!("capture_{}.png", timestamp));
        frame.save(&path)?;
        info!("Saved capture frame to {}", path.display());
        Ok(path)
    }
}
