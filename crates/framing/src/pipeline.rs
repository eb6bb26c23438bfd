//! The gcsv to framed-protobuf conversion, end to end.
//!
//! Everything is held in memory: the log is read and parsed in full, all
//! records are built and encoded, and only then is the output opened. An
//! encoding failure therefore aborts the run before the output is touched.

use std::path::PathBuf;

use imuframe_common::config::{ConversionConfig, HeaderConfig};
use imuframe_common::error::{ImuframeError, ImuframeResult};
use imuframe_imu_log::{read_log, ImuLog, SampleParser};

use crate::encode::encode_record;
use crate::record::{build_records, StreamHeader};
use crate::segment::FrameSegmenter;
use crate::writer::FramedWriter;

/// What a conversion run did.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub output_path: PathBuf,
    pub data_lines: usize,
    pub samples: usize,
    pub rejected_lines: usize,
    pub time_scale: f64,
    pub samples_per_frame: usize,
    pub frames_written: u64,
    pub dropped_samples: usize,
    pub bytes_written: u64,
}

/// Convert `config.input_path` into a framed record file at `config.output_path`.
pub fn convert(config: &ConversionConfig) -> ImuframeResult<ConversionSummary> {
    config.validate()?;

    let log = read_log(&config.input_path)?;
    let time_scale = resolve_time_scale(config, &log);
    let parsed = SampleParser::new(time_scale).parse_lines(&log.data_lines);

    let segmenter = FrameSegmenter::from_rates(config.imu_sample_rate, config.video_frame_rate);
    if segmenter.samples_per_frame() == 0 {
        tracing::warn!(
            imu_sample_rate = config.imu_sample_rate,
            video_frame_rate = config.video_frame_rate,
            "IMU rate is below the frame rate; no frames will be produced"
        );
    }

    let header = config
        .header
        .as_ref()
        .map(|h| load_header(h, config))
        .transpose()?;
    let records = build_records(segmenter.segments(&parsed.samples), header);
    let payloads = records
        .iter()
        .map(encode_record)
        .collect::<ImuframeResult<Vec<_>>>()?;

    let mut writer = FramedWriter::create(&config.output_path)?;
    for payload in &payloads {
        writer.write_block(payload)?;
    }
    let (frames_written, bytes_written) = writer.finish()?;

    let summary = ConversionSummary {
        output_path: config.output_path.clone(),
        data_lines: log.data_lines.len(),
        samples: parsed.samples.len(),
        rejected_lines: parsed.rejected,
        time_scale,
        samples_per_frame: segmenter.samples_per_frame(),
        frames_written,
        dropped_samples: segmenter.dropped_samples(parsed.samples.len()),
        bytes_written,
    };

    if summary.rejected_lines > 0 {
        tracing::warn!(
            rejected = summary.rejected_lines,
            "skipped malformed data lines"
        );
    }
    tracing::info!(
        input = %config.input_path.display(),
        output = %summary.output_path.display(),
        samples = summary.samples,
        samples_per_frame = summary.samples_per_frame,
        frames = summary.frames_written,
        dropped = summary.dropped_samples,
        bytes = summary.bytes_written,
        "conversion complete"
    );

    Ok(summary)
}

fn resolve_time_scale(config: &ConversionConfig, log: &ImuLog) -> f64 {
    if !config.time_scale_from_log {
        return config.time_scale;
    }
    match log.time_scale().filter(|s| s.is_finite() && *s > 0.0) {
        Some(scale) => {
            tracing::debug!(tscale = scale, "using time scale from log preamble");
            scale
        }
        None => {
            tracing::warn!(
                fallback = config.time_scale,
                "log has no usable tscale entry; using configured time scale"
            );
            config.time_scale
        }
    }
}

fn load_header(header: &HeaderConfig, config: &ConversionConfig) -> ImuframeResult<StreamHeader> {
    let lens_profile = header
        .lens_profile_path
        .as_ref()
        .map(|path| std::fs::read_to_string(path).map_err(|e| ImuframeError::io(path, e)))
        .transpose()?;

    Ok(StreamHeader::from_config(
        header,
        config.video_frame_rate,
        config.imu_sample_rate,
        lens_profile,
    ))
}
