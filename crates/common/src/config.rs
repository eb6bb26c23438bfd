//! Application configuration.
//!
//! Configuration is read from an optional JSON file and then overridden by
//! command-line flags. Every field has a default, so an empty `{}` file is a
//! valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ImuframeError, ImuframeResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log-to-frames conversion settings.
    pub conversion: ConversionConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Parameters of one gcsv to framed-protobuf conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Source IMU log.
    pub input_path: PathBuf,

    /// Destination framed binary file.
    pub output_path: PathBuf,

    /// Video frames per second.
    pub video_frame_rate: f64,

    /// IMU samples per second.
    pub imu_sample_rate: f64,

    /// Seconds per raw timestamp unit.
    pub time_scale: f64,

    /// Prefer the `tscale` entry of the log preamble over `time_scale`.
    pub time_scale_from_log: bool,

    /// Camera and clip metadata stamped on the first record, if any.
    pub header: Option<HeaderConfig>,
}

/// Camera and clip description written into the first frame record.
///
/// Frame rates and the IMU sample rate are taken from [`ConversionConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub camera_brand: String,
    pub camera_model: String,
    pub firmware_version: Option<String>,
    pub lens_brand: String,
    pub lens_model: String,
    pub sensor_pixel_width: u32,
    pub sensor_pixel_height: u32,
    pub crop_factor: f32,

    /// Path to a lens profile JSON file embedded verbatim.
    pub lens_profile_path: Option<PathBuf>,

    pub frame_width: u32,
    pub frame_height: u32,
    pub rotation_degrees: i32,
    pub pixel_aspect_ratio: f32,
    pub frame_readout_time_us: f32,
    pub frame_readout_direction: ReadoutDirection,
}

/// Rolling-shutter readout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadoutDirection {
    #[default]
    TopToBottom,
    BottomToTop,
    LeftToRight,
    RightToLeft,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "imuframe=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input.gcsv"),
            output_path: PathBuf::from("output.bin"),
            video_frame_rate: 60.0,
            imu_sample_rate: 1000.0,
            time_scale: 1e-6,
            time_scale_from_log: false,
            header: None,
        }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            camera_brand: String::new(),
            camera_model: String::new(),
            firmware_version: None,
            lens_brand: String::new(),
            lens_model: String::new(),
            sensor_pixel_width: 0,
            sensor_pixel_height: 0,
            crop_factor: 1.0,
            lens_profile_path: None,
            frame_width: 0,
            frame_height: 0,
            rotation_degrees: 0,
            pixel_aspect_ratio: 1.0,
            frame_readout_time_us: 0.0,
            frame_readout_direction: ReadoutDirection::TopToBottom,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from a JSON file.
    pub fn load_from(path: &Path) -> ImuframeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ImuframeError::io(path, e))?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

impl ConversionConfig {
    /// Reject rates and scales that cannot drive a conversion.
    pub fn validate(&self) -> ImuframeResult<()> {
        check_positive("video_frame_rate", self.video_frame_rate)?;
        check_positive("imu_sample_rate", self.imu_sample_rate)?;
        check_positive("time_scale", self.time_scale)?;
        Ok(())
    }
}

fn check_positive(name: &str, value: f64) -> ImuframeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ImuframeError::config(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_converter() {
        let config = ConversionConfig::default();
        assert_eq!(config.video_frame_rate, 60.0);
        assert_eq!(config.imu_sample_rate, 1000.0);
        assert_eq!(config.time_scale, 1e-6);
        assert!(config.header.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"conversion": {"video_frame_rate": 30.0}}"#).unwrap();
        assert_eq!(config.conversion.video_frame_rate, 30.0);
        assert_eq!(config.conversion.imu_sample_rate, 1000.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_header_json() {
        let config: ConversionConfig = serde_json::from_str(
            r#"{"header": {"camera_brand": "ACME", "frame_readout_direction": "bottom_to_top"}}"#,
        )
        .unwrap();
        let header = config.header.unwrap();
        assert_eq!(header.camera_brand, "ACME");
        assert_eq!(header.frame_readout_direction, ReadoutDirection::BottomToTop);
        assert_eq!(header.crop_factor, 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let mut config = ConversionConfig::default();
        config.video_frame_rate = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ImuframeError::Config { .. })
        ));

        let mut config = ConversionConfig::default();
        config.imu_sample_rate = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = ConversionConfig::default();
        config.time_scale = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("imuframe_test_config_missing.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ImuframeError::FileNotFound { .. })
        ));
    }
}
