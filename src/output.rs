use image::RgbImage;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::error::{Result, ScanError};
use crate::frontend::{ScanEvent, ScanFrontend};
use crate::types::FaceId;

const PREVIEW_TITLE: &str = "Align Cube Face";
const REVIEW_TITLE: &str = "Scanned Face";
const NET_TITLE: &str = "Cube Net";

/// One minifb window plus its ARGB back buffer.
struct Surface {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl Surface {
    fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| ScanError::Display(format!("Failed to create window: {}", e)))?;

        // ~30ms per update, doubles as the input poll interval
        window.set_target_fps(33);

        Ok(Self {
            window,
            buffer: vec![0; width * height],
            width,
            height,
        })
    }

    fn fits(&self, img: &RgbImage) -> bool {
        self.width == img.width() as usize && self.height == img.height() as usize
    }

    fn present(&mut self, img: &RgbImage) -> Result<()> {
        self.width = img.width() as usize;
        self.height = img.height() as usize;
        self.buffer.resize(self.width * self.height, 0);

        // RGB8 -> 0RGB u32
        for (dst, px) in self.buffer.iter_mut().zip(img.pixels()) {
            *dst = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
        }

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| ScanError::Display(format!("Window update failed: {}", e)))
    }

    fn pump(&mut self) {
        self.window.update();
    }

    fn is_open(&self) -> bool {
        self.window.is_open()
    }

    fn keys(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::No)
    }
}

fn present_into(slot: &mut Option<Surface>, title: &str, img: &RgbImage) -> Result<()> {
    if !slot.as_ref().is_some_and(|s| s.fits(img)) {
        *slot = Some(Surface::new(title, img.width() as usize, img.height() as usize)?);
    }
    match slot.as_mut() {
        Some(surface) => surface.present(img),
        None => Ok(()),
    }
}

/// Desktop frontend: live preview, scanned face and cube net windows.
/// Space captures, N accepts, R rescans, Escape or closing a window cancels.
#[derive(Default)]
pub struct WindowFrontend {
    preview: Option<Surface>,
    review: Option<Surface>,
    net: Option<Surface>,
}

impl WindowFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    fn surfaces_mut(&mut self) -> impl Iterator<Item = &mut Surface> {
        [&mut self.preview, &mut self.review, &mut self.net]
            .into_iter()
            .filter_map(|s| s.as_mut())
    }
}

impl ScanFrontend for WindowFrontend {
    fn show_preview(&mut self, frame: &RgbImage) -> Result<()> {
        present_into(&mut self.preview, PREVIEW_TITLE, frame)
    }

    fn poll_event(&mut self) -> Result<Option<ScanEvent>> {
        let Some(preview) = self.preview.as_ref() else {
            return Ok(None);
        };
        if !preview.is_open() {
            return Ok(Some(ScanEvent::Cancel));
        }
        for key in preview.keys() {
            match key {
                Key::Space => return Ok(Some(ScanEvent::Capture)),
                Key::Escape => return Ok(Some(ScanEvent::Cancel)),
                _ => {}
            }
        }
        Ok(None)
    }

    fn show_review(&mut self, face: FaceId, face_image: &RgbImage, cube_image: &RgbImage) -> Result<()> {
        let title = format!("{} - {}", REVIEW_TITLE, face.name());
        present_into(&mut self.review, &title, face_image)?;
        present_into(&mut self.net, NET_TITLE, cube_image)
    }

    fn wait_decision(&mut self) -> Result<ScanEvent> {
        if self.surfaces_mut().next().is_none() {
            return Err(ScanError::Display("no window to read a decision from".into()));
        }
        loop {
            for surface in self.surfaces_mut() {
                surface.pump();
                if !surface.is_open() {
                    return Ok(ScanEvent::Cancel);
                }
                for key in surface.keys() {
                    match key {
                        Key::N => return Ok(ScanEvent::Accept),
                        Key::R => return Ok(ScanEvent::Reject),
                        Key::Escape => return Ok(ScanEvent::Cancel),
                        _ => {}
                    }
                }
            }
        }
    }

    fn close_review(&mut self) -> Result<()> {
        self.review = None;
        Ok(())
    }
}
