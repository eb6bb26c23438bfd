//! Convert a gcsv IMU log into framed protobuf records.

use std::path::PathBuf;

use anyhow::Context;
use imuframe_common::config::ConversionConfig;

pub struct ConvertArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub fps: Option<f64>,
    pub imu_rate: Option<f64>,
    pub tscale: Option<f64>,
    pub tscale_from_log: bool,
}

pub fn run(args: ConvertArgs, base: ConversionConfig) -> anyhow::Result<()> {
    let config = resolve_config(args, base);

    println!(
        "Converting {} -> {}",
        config.input_path.display(),
        config.output_path.display()
    );

    let summary = imuframe_framing::convert(&config).with_context(|| {
        format!(
            "Failed to convert {} to {}",
            config.input_path.display(),
            config.output_path.display()
        )
    })?;

    println!("  Data lines: {}", summary.data_lines);
    println!("  Samples: {}", summary.samples);
    if summary.rejected_lines > 0 {
        println!("  Skipped lines: {}", summary.rejected_lines);
    }
    println!("  Time scale: {} s/unit", summary.time_scale);
    println!("  Samples per frame: {}", summary.samples_per_frame);
    println!("  Frames written: {}", summary.frames_written);
    if summary.dropped_samples > 0 {
        println!("  Trailing samples dropped: {}", summary.dropped_samples);
    }
    println!("  Bytes written: {}", summary.bytes_written);
    println!("\nDone.");

    Ok(())
}

/// Layer command-line flags over the configured conversion.
///
/// Output precedence: `--output`, then INPUT with a `.bin` extension, then
/// the configured `output_path`.
fn resolve_config(args: ConvertArgs, mut config: ConversionConfig) -> ConversionConfig {
    if let Some(input) = args.input {
        config.output_path = input.with_extension("bin");
        config.input_path = input;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if let Some(fps) = args.fps {
        config.video_frame_rate = fps;
    }
    if let Some(rate) = args.imu_rate {
        config.imu_sample_rate = rate;
    }
    if let Some(scale) = args.tscale {
        config.time_scale = scale;
    }
    config.time_scale_from_log |= args.tscale_from_log;

    tracing::debug!(?config, "resolved conversion config");
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::load_app_config;

    fn args(input: Option<&str>) -> ConvertArgs {
        ConvertArgs {
            input: input.map(PathBuf::from),
            output: None,
            fps: None,
            imu_rate: None,
            tscale: None,
            tscale_from_log: false,
        }
    }

    #[test]
    fn test_default_output_path() {
        let config = resolve_config(
            args(Some("logs/HOVER_0025.gcsv")),
            ConversionConfig::default(),
        );
        assert_eq!(config.output_path, PathBuf::from("logs/HOVER_0025.bin"));
        assert_eq!(config.video_frame_rate, 60.0);
    }

    #[test]
    fn test_paths_fall_back_to_config() {
        let base = ConversionConfig {
            input_path: PathBuf::from("cfg/in.gcsv"),
            output_path: PathBuf::from("cfg/out.bin"),
            ..ConversionConfig::default()
        };
        let config = resolve_config(args(None), base);
        assert_eq!(config.input_path, PathBuf::from("cfg/in.gcsv"));
        assert_eq!(config.output_path, PathBuf::from("cfg/out.bin"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join("imuframe_test_cli_config.json");
        std::fs::write(
            &path,
            r#"{"conversion": {"video_frame_rate": 30.0, "imu_sample_rate": 200.0}}"#,
        )
        .unwrap();

        let mut a = args(Some("in.gcsv"));
        a.imu_rate = Some(400.0);
        a.output = Some(PathBuf::from("out/frames.bin"));
        let base = load_app_config(Some(&path)).unwrap().conversion;
        let config = resolve_config(a, base);

        assert_eq!(config.video_frame_rate, 30.0);
        assert_eq!(config.imu_sample_rate, 400.0);
        assert_eq!(config.output_path, PathBuf::from("out/frames.bin"));
        assert_eq!(config.input_path, PathBuf::from("in.gcsv"));

        std::fs::remove_file(&path).ok();
    }
}
