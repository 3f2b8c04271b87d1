use image::RgbImage;

use crate::error::Result;
use crate::types::FaceId;

/// Discrete user inputs understood by a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// Take the capture frame for the face being aligned.
    Capture,
    /// Keep the reviewed face and move on.
    Accept,
    /// Discard the reviewed face and scan it again.
    Reject,
    /// Abort the whole session.
    Cancel,
}

/// Source of camera frames.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<RgbImage>;
}

/// Where previews and reviews are shown and where user input comes from.
pub trait ScanFrontend {
    /// Show one preview frame, overlay already drawn.
    fn show_preview(&mut self, frame: &RgbImage) -> Result<()>;

    /// Non-blocking check for input, called once per preview frame.
    fn poll_event(&mut self) -> Result<Option<ScanEvent>>;

    /// Show the freshly classified face next to the cube net.
    fn show_review(&mut self, face: FaceId, face_image: &RgbImage, cube_image: &RgbImage) -> Result<()>;

    /// Block until the user decides on the reviewed face.
    fn wait_decision(&mut self) -> Result<ScanEvent>;

    /// Called once a face has been accepted.
    fn close_review(&mut self) -> Result<()> {
        Ok(())
    }
}
