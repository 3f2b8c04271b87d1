use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Failed to read frame: {0}")]
    FrameRead(String),

    #[error("Frame {width}x{height} is smaller than the {grid}x{grid} sampling grid")]
    FrameTooSmall { width: u32, height: u32, grid: u32 },

    /// Only reachable by sampling around a point whose neighborhood misses the
    /// frame entirely. `classify_frame` rejects frames smaller than the grid with
    /// `FrameTooSmall` first, so every cell center it samples is in bounds.
    #[error("No in-bounds pixels around ({x}, {y})")]
    EmptyNeighborhood { x: i64, y: i64 },

    #[error("Frame source lost after {0} consecutive failed reads")]
    SourceLost(u32),

    #[error("Display error: {0}")]
    Display(String),

    #[error("Scan cancelled by user")]
    Cancelled,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ScanError>;
