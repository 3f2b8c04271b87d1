//! Drives a full six-face scan.
//!
//! Per face: `Scanning -> Preview -> Accepted`, or back to `Scanning` on
//! reject. A face reaches the cube state only when accepted, as nine
//! consecutive `set_color` calls. `Cancel` ends the session at either wait.

use tracing::{info, warn};

use crate::capture::FaceCapture;
use crate::cube::CubeState;
use crate::error::{Result, ScanError};
use crate::frontend::{FrameSource, ScanEvent, ScanFrontend};
use crate::render::{render_cube, render_face};
use crate::types::{CubeGrid, FaceGrid, FaceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceState {
    Scanning,
    Preview(FaceGrid),
    Accepted(FaceGrid),
}

/// Owns the camera and the frontend for one session. Both are dropped when
/// the session ends, whatever the outcome.
pub struct ScanSession<S: FrameSource, F: ScanFrontend> {
    source: S,
    frontend: F,
    capture: FaceCapture,
    grid: CubeGrid,
}

impl<S: FrameSource, F: ScanFrontend> ScanSession<S, F> {
    pub fn new(source: S, frontend: F, capture: FaceCapture) -> Self {
        Self {
            source,
            frontend,
            capture,
            grid: CubeGrid::new(),
        }
    }

    /// Scans all six faces in `FaceId::ALL` order, committing each accepted
    /// face to `cube`. Returns the assembled grid.
    pub fn scan<C: CubeState + ?Sized>(mut self, cube: &mut C) -> Result<CubeGrid> {
        for face in FaceId::ALL {
            info!("Scanning face {} ({}/6)", face.name(), face.index() + 1);
            let grid = self.scan_face(face)?;
            commit_face(cube, face, &grid);
            self.frontend.close_review()?;
            info!("Accepted face {}:\n{}", face.name(), grid.to_letters());
        }
        Ok(self.grid)
    }

    fn scan_face(&mut self, face: FaceId) -> Result<FaceGrid> {
        let mut state = FaceState::Scanning;
        loop {
            state = match state {
                FaceState::Scanning => match self.capture.capture_face(&mut self.source, &mut self.frontend) {
                    Ok(grid) => {
                        self.grid.set_face(face, grid);
                        let face_image = render_face(&grid, self.capture.box_size);
                        let cube_image = render_cube(&self.grid, self.capture.box_size);
                        self.frontend.show_review(face, &face_image, &cube_image)?;
                        FaceState::Preview(grid)
                    }
                    Err(e @ (ScanError::FrameRead(_) | ScanError::FrameTooSmall { .. })) => {
                        warn!("Capture of {} failed, rescanning: {}", face.name(), e);
                        FaceState::Scanning
                    }
                    Err(e) => return Err(e),
                },
                FaceState::Preview(grid) => match self.frontend.wait_decision()? {
                    ScanEvent::Accept => FaceState::Accepted(grid),
                    ScanEvent::Reject => {
                        info!("Rescanning face {}", face.name());
                        FaceState::Scanning
                    }
                    ScanEvent::Cancel => return Err(ScanError::Cancelled),
                    ScanEvent::Capture => FaceState::Preview(grid),
                },
                FaceState::Accepted(grid) => return Ok(grid),
            };
        }
    }
}

/// Writes all nine cells of `grid` in row-major order.
pub fn commit_face<C: CubeState + ?Sized>(cube: &mut C, face: FaceId, grid: &FaceGrid) {
    for (row, col, color) in grid.iter() {
        cube.set_color(face, row, col, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    struct Recorder(Vec<(FaceId, usize, usize, Color)>);

    impl CubeState for Recorder {
        fn set_color(&mut self, face: FaceId, row: usize, col: usize, color: Color) {
            self.0.push((face, row, col, color));
        }
    }

    #[test]
    fn test_commit_writes_nine_cells_row_major() {
        let mut rec = Recorder(Vec::new());
        let mut grid = FaceGrid::filled(Color::Blue);
        grid.set(2, 2, Color::Red);
        commit_face(&mut rec, FaceId::Left, &grid);

        assert_eq!(rec.0.len(), 9);
        assert!(rec.0.iter().all(|(f, ..)| *f == FaceId::Left));
        assert_eq!(rec.0[1], (FaceId::Left, 0, 1, Color::Blue));
        assert_eq!(rec.0[8], (FaceId::Left, 2, 2, Color::Red));
    }
}
