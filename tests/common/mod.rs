#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use cube_scanner::cube::CubeState;
use cube_scanner::frontend::{FrameSource, ScanEvent, ScanFrontend};
use cube_scanner::types::{Color, FaceId};
use cube_scanner::{Result, ScanError};
use image::{Rgb, RgbImage};

pub const BACKGROUND: Rgb<u8> = Rgb([40, 40, 40]);

/// Sticker colors that classify cleanly with the default thresholds.
pub fn sticker(color: Color) -> Rgb<u8> {
    match color {
        Color::White => Rgb([255, 255, 255]),
        Color::Red => Rgb([220, 20, 60]),
        Color::Orange => Rgb([255, 100, 0]),
        Color::Yellow => Rgb([255, 200, 0]),
        Color::Green => Rgb([0, 200, 60]),
        Color::Blue => Rgb([0, 60, 200]),
        Color::Unknown => Rgb([50, 50, 50]),
    }
}

/// `width` x `height` frame with the 3x3 cells of the centered grid painted.
pub fn face_frame(width: u32, height: u32, box_size: u32, cells: [[Color; 3]; 3]) -> RgbImage {
    let start_x = (width - 3 * box_size) / 2;
    let start_y = (height - 3 * box_size) / 2;
    let mut frame = RgbImage::from_pixel(width, height, BACKGROUND);
    for (row, cols) in cells.iter().enumerate() {
        for (col, color) in cols.iter().enumerate() {
            let x0 = start_x + col as u32 * box_size;
            let y0 = start_y + row as u32 * box_size;
            for y in y0..y0 + box_size {
                for x in x0..x0 + box_size {
                    frame.put_pixel(x, y, sticker(*color));
                }
            }
        }
    }
    frame
}

/// Center pixel of `face`'s cell (`row`, `col`) in a net rendered at `box_size`.
pub fn net_cell_center(face: FaceId, row: u32, col: u32, box_size: u32) -> (u32, u32) {
    let (net_row, net_col) = face.net_origin();
    let inner = (box_size - 5) / 2;
    (
        (net_col + col) * box_size + inner,
        (net_row + row) * box_size + inner,
    )
}

pub fn solid_face(color: Color) -> RgbImage {
    face_frame(400, 400, 60, [[color; 3]; 3])
}

/// Hands out queued frames, then repeats `fallback`.
pub struct ScriptedSource {
    pub frames: VecDeque<Result<RgbImage>>,
    pub fallback: RgbImage,
    pub reads: Rc<RefCell<usize>>,
}

impl ScriptedSource {
    pub fn new(fallback: RgbImage) -> Self {
        Self {
            frames: VecDeque::new(),
            fallback,
            reads: Rc::new(RefCell::new(0)),
        }
    }

    pub fn push(&mut self, frame: RgbImage) {
        self.frames.push_back(Ok(frame));
    }

    pub fn push_failure(&mut self) {
        self.frames.push_back(Err(ScanError::FrameRead("dropped".into())));
    }
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<RgbImage> {
        *self.reads.borrow_mut() += 1;
        self.frames.pop_front().unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

#[derive(Debug, Default)]
pub struct FrontendLog {
    pub previews: usize,
    pub reviews: Vec<(FaceId, (u32, u32), (u32, u32))>,
    /// Cube net shown with each review, before the decision is read.
    pub nets: Vec<RgbImage>,
    pub closed_reviews: usize,
}

/// Replays scripted input. Polls with nothing queued trigger a capture;
/// decisions with nothing queued accept.
pub struct ScriptedFrontend {
    pub polls: VecDeque<Option<ScanEvent>>,
    pub decisions: VecDeque<ScanEvent>,
    pub log: Rc<RefCell<FrontendLog>>,
}

impl ScriptedFrontend {
    pub fn new() -> Self {
        Self {
            polls: VecDeque::new(),
            decisions: VecDeque::new(),
            log: Rc::new(RefCell::new(FrontendLog::default())),
        }
    }
}

impl ScanFrontend for ScriptedFrontend {
    fn show_preview(&mut self, _frame: &RgbImage) -> Result<()> {
        self.log.borrow_mut().previews += 1;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<ScanEvent>> {
        Ok(self.polls.pop_front().unwrap_or(Some(ScanEvent::Capture)))
    }

    fn show_review(&mut self, face: FaceId, face_image: &RgbImage, cube_image: &RgbImage) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.reviews.push((face, face_image.dimensions(), cube_image.dimensions()));
        log.nets.push(cube_image.clone());
        Ok(())
    }

    fn wait_decision(&mut self) -> Result<ScanEvent> {
        Ok(self.decisions.pop_front().unwrap_or(ScanEvent::Accept))
    }

    fn close_review(&mut self) -> Result<()> {
        self.log.borrow_mut().closed_reviews += 1;
        Ok(())
    }
}

/// Cube state that records every `set_color` call.
#[derive(Default)]
pub struct RecordingCube {
    pub calls: Vec<(FaceId, usize, usize, Color)>,
}

impl CubeState for RecordingCube {
    fn set_color(&mut self, face: FaceId, row: usize, col: usize, color: Color) {
        self.calls.push((face, row, col, color));
    }
}
