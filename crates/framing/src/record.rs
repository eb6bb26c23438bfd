//! Frame records: one batch of IMU samples per video frame.

use imuframe_common::config::{HeaderConfig, ReadoutDirection};
use imuframe_imu_log::ImuSample;

/// Format identifier stamped on every record.
pub const MAGIC_STRING: &str = "GyroflowProtobuf";

/// Schema version stamped on every record.
pub const PROTOCOL_VERSION: u32 = 1;

/// One video-frame-aligned batch of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub magic_string: &'static str,
    pub protocol_version: u32,

    /// 1-based position in the output.
    pub frame_number: u64,
    pub start_timestamp_us: f64,
    pub end_timestamp_us: f64,

    /// Never empty.
    pub samples: Vec<ImuSample>,

    /// Camera and clip description, carried by the first record only.
    pub header: Option<StreamHeader>,
}

impl FrameRecord {
    /// Build a record from a batch, or `None` if the batch is empty.
    pub fn from_segment(frame_number: u64, samples: &[ImuSample]) -> Option<Self> {
        let (first, last) = (samples.first()?, samples.last()?);
        Some(Self {
            magic_string: MAGIC_STRING,
            protocol_version: PROTOCOL_VERSION,
            frame_number,
            start_timestamp_us: first.timestamp_us,
            end_timestamp_us: last.timestamp_us,
            samples: samples.to_vec(),
            header: None,
        })
    }
}

/// Camera and clip metadata resolved for a conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamHeader {
    pub camera_brand: String,
    pub camera_model: String,
    pub firmware_version: Option<String>,
    pub lens_brand: String,
    pub lens_model: String,
    pub sensor_pixel_width: u32,
    pub sensor_pixel_height: u32,
    pub crop_factor: f32,
    pub lens_profile: Option<String>,

    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_rate: f64,
    pub rotation_degrees: i32,
    pub imu_sample_rate: f64,
    pub pixel_aspect_ratio: f32,
    pub frame_readout_time_us: f32,
    pub frame_readout_direction: ReadoutDirection,
}

impl StreamHeader {
    /// Combine configured metadata with the run's rates and lens profile text.
    pub fn from_config(
        config: &HeaderConfig,
        video_frame_rate: f64,
        imu_sample_rate: f64,
        lens_profile: Option<String>,
    ) -> Self {
        Self {
            camera_brand: config.camera_brand.clone(),
            camera_model: config.camera_model.clone(),
            firmware_version: config.firmware_version.clone(),
            lens_brand: config.lens_brand.clone(),
            lens_model: config.lens_model.clone(),
            sensor_pixel_width: config.sensor_pixel_width,
            sensor_pixel_height: config.sensor_pixel_height,
            crop_factor: config.crop_factor,
            lens_profile,
            frame_width: config.frame_width,
            frame_height: config.frame_height,
            frame_rate: video_frame_rate,
            rotation_degrees: config.rotation_degrees,
            imu_sample_rate,
            pixel_aspect_ratio: config.pixel_aspect_ratio,
            frame_readout_time_us: config.frame_readout_time_us,
            frame_readout_direction: config.frame_readout_direction,
        }
    }
}

/// Turn batches into numbered records.
///
/// Batch `i` becomes frame `i + 1`. An empty batch is skipped without
/// renumbering the ones after it. `header`, if given, goes on the first
/// record emitted.
pub fn build_records<'a, I>(segments: I, mut header: Option<StreamHeader>) -> Vec<FrameRecord>
where
    I: IntoIterator<Item = &'a [ImuSample]>,
{
    let mut records = Vec::new();

    for (index, segment) in segments.into_iter().enumerate() {
        let frame_number = index as u64 + 1;
        match FrameRecord::from_segment(frame_number, segment) {
            Some(mut record) => {
                record.header = header.take();
                records.push(record);
            }
            None => tracing::debug!(frame_number, "skipping empty segment"),
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp_us: f64) -> ImuSample {
        ImuSample {
            timestamp_us,
            gyro_x: 0.0,
            gyro_y: 0.0,
            gyro_z: 0.0,
            accel_x: 0.0,
            accel_y: 0.0,
            accel_z: 1.0,
        }
    }

    fn header() -> StreamHeader {
        StreamHeader::from_config(&HeaderConfig::default(), 60.0, 1000.0, None)
    }

    #[test]
    fn test_boundary_timestamps() {
        let samples: Vec<ImuSample> = (1..=16).map(|i| sample(i as f64 * 100.0)).collect();
        let record = FrameRecord::from_segment(1, &samples).unwrap();

        assert_eq!(record.start_timestamp_us, 100.0);
        assert_eq!(record.end_timestamp_us, 1600.0);
        assert_eq!(record.samples.len(), 16);
        assert_eq!(record.magic_string, "GyroflowProtobuf");
        assert_eq!(record.protocol_version, 1);
    }

    #[test]
    fn test_empty_segment_is_none() {
        assert!(FrameRecord::from_segment(1, &[]).is_none());
    }

    #[test]
    fn test_numbering_and_header_placement() {
        let samples: Vec<ImuSample> = (0..6).map(|i| sample(i as f64)).collect();
        let records = build_records(samples.chunks(2), Some(header()));

        let numbers: Vec<u64> = records.iter().map(|r| r.frame_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(records[0].header.is_some());
        assert!(records[1..].iter().all(|r| r.header.is_none()));
        assert_eq!(records[2].start_timestamp_us, 4.0);
        assert_eq!(records[2].end_timestamp_us, 5.0);
    }

    #[test]
    fn test_empty_segment_skipped_without_renumbering() {
        let a = [sample(1.0)];
        let b = [sample(2.0)];
        let segments: Vec<&[ImuSample]> = vec![&[][..], &a[..], &b[..]];
        let records = build_records(segments, Some(header()));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].frame_number, 2);
        assert_eq!(records[1].frame_number, 3);
        assert!(records[0].header.is_some());
    }

    #[test]
    fn test_header_takes_run_rates() {
        let header = StreamHeader::from_config(
            &HeaderConfig::default(),
            30.0,
            200.0,
            Some("{}".to_string()),
        );
        assert_eq!(header.frame_rate, 30.0);
        assert_eq!(header.imu_sample_rate, 200.0);
        assert_eq!(header.lens_profile.as_deref(), Some("{}"));
    }
}
