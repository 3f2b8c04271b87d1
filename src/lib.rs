pub mod args;
pub mod capture;
pub mod classifier;
pub mod config;
pub mod cube;
pub mod error;
pub mod font;
pub mod frontend;
pub mod logger;
pub mod render;
pub mod sampler;
pub mod session;
pub mod types;

#[cfg(feature = "live")]
pub mod camera;
#[cfg(feature = "live")]
pub mod output;

pub use error::{Result, ScanError};
