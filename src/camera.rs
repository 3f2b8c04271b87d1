use image::RgbImage;
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{ApiBackend, CameraIndex, CameraInfo, RequestedFormat, RequestedFormatType},
    Camera,
};
use tracing::{info, warn};

use crate::error::{Result, ScanError};
use crate::frontend::FrameSource;

/// Webcam frame source. The stream is stopped when this is dropped.
pub struct CameraSource {
    camera: Camera,
}

impl CameraSource {
    /// Opens camera `index` or fails with `CameraUnavailable`; there is no retry.
    pub fn new(index: u32) -> Result<Self> {
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| ScanError::CameraUnavailable(format!("camera {}: {}", index, e)))?;

        camera
            .open_stream()
            .map_err(|e| ScanError::CameraUnavailable(format!("camera {} stream: {}", index, e)))?;

        info!("Opened camera: {} ({})", camera.info().human_name(), camera.camera_format());
        Ok(Self { camera })
    }

    pub fn name(&self) -> String {
        self.camera.info().human_name()
    }
}

impl FrameSource for CameraSource {
    fn next_frame(&mut self) -> Result<RgbImage> {
        let frame = self
            .camera
            .frame()
            .map_err(|e| ScanError::FrameRead(e.to_string()))?;
        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| ScanError::FrameRead(e.to_string()))?;
        let (width, height) = (decoded.width(), decoded.height());
        RgbImage::from_raw(width, height, decoded.into_raw())
            .ok_or_else(|| ScanError::FrameRead(format!("short buffer for {}x{} frame", width, height)))
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            warn!("Failed to stop camera stream: {}", e);
        }
    }
}

pub fn list_cameras() -> Result<Vec<CameraInfo>> {
    nokhwa::query(ApiBackend::Auto).map_err(|e| ScanError::CameraUnavailable(e.to_string()))
}
