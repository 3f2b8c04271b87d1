use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::classifier::ClassifierParams;
use crate::error::ScanError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub camera: CameraConfig,
    pub grid: GridConfig,
    pub classifier: ClassifierParams,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub index: u32,
    /// Consecutive failed preview reads before the camera counts as lost.
    pub max_frame_failures: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Side of one sampled cell in pixels; also sizes the overlay and swatches.
    pub box_size: u32,
    /// Side of the median neighborhood around each cell center.
    pub sample_region: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Save every capture frame as PNG here when set.
    pub save_captures: Option<PathBuf>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            max_frame_failures: 30,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            box_size: 60,
            sample_region: 5,
        }
    }
}

impl AppConfig {
    pub const DEFAULT_PATH: &'static str = "cube_scanner.json";

    /// Loads `path`, falling back to defaults.
    ///
    /// A missing file is created with the defaults. A readable file is written
    /// back so newly added fields show up in it. An unparseable file is left
    /// untouched.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("Configuration file not found. Creating default at {}", path.display());
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        match Self::parse_file(path)? {
            Some(config) => {
                config.save(path)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Like [`AppConfig::load`], but never touches the file system beyond
    /// reading `path`. For tools that only consume the configuration.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Ok(Self::parse_file(path)?.unwrap_or_default())
    }

    /// `None` when the file exists but does not parse.
    fn parse_file(path: &Path) -> Result<Option<Self>> {
        let content = fs::read_to_string(path)?;
        match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                Ok(Some(config))
            }
            Err(e) => {
                warn!("Error parsing config {}: {}. Loading defaults.", path.display(), e);
                Ok(None)
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), ScanError> {
        if self.grid.box_size == 0 {
            return Err(ScanError::InvalidConfig("grid.box_size must be positive".into()));
        }
        if self.grid.sample_region == 0 || self.grid.sample_region % 2 == 0 {
            return Err(ScanError::InvalidConfig(format!(
                "grid.sample_region must be odd and positive, got {}",
                self.grid.sample_region
            )));
        }
        if self.camera.max_frame_failures == 0 {
            return Err(ScanError::InvalidConfig("camera.max_frame_failures must be positive".into()));
        }
        for (band, color) in self.classifier.bands() {
            if band.low > band.high {
                return Err(ScanError::InvalidConfig(format!(
                    "{:?} hue band is empty: {} > {}",
                    color, band.low, band.high
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::HueBand;
    use crate::types::Color;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.camera.index, 0);
        assert_eq!(config.grid.box_size, 60);
        assert_eq!(config.grid.sample_region, 5);
        assert_eq!(config.classifier.fallback, Color::White);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scanner.json");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scanner.json");
        fs::write(&path, r#"{ "grid": { "box_size": 80 }, "classifier": { "fallback": "unknown" } }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.grid.box_size, 80);
        assert_eq!(config.grid.sample_region, 5);
        assert_eq!(config.classifier.fallback, Color::Unknown);
        assert_eq!(config.classifier.white_min, 200);

        // written back with every field present
        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.contains("max_frame_failures"));
    }

    #[test]
    fn test_broken_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scanner.json");
        fs::write(&path, "{ not json").unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_read_does_not_create_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scanner.json");
        let config = AppConfig::read(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_read_leaves_existing_file_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scanner.json");
        let partial = r#"{ "grid": { "box_size": 80 } }"#;
        fs::write(&path, partial).unwrap();

        let config = AppConfig::read(&path).unwrap();
        assert_eq!(config.grid.box_size, 80);
        assert_eq!(config.grid.sample_region, 5);
        assert_eq!(fs::read_to_string(&path).unwrap(), partial);

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppConfig::read(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.grid.sample_region = 4;
        assert!(matches!(config.validate(), Err(ScanError::InvalidConfig(_))));

        let mut config = AppConfig::default();
        config.classifier.green = HueBand::new(90, 60);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.grid.box_size = 0;
        assert!(config.validate().is_err());
    }
}
