//! Serializing frame records as Gyroflow protobuf messages.
//!
//! Encoding is stateless and deterministic: equal records always produce
//! equal bytes. Values the wire types cannot hold are rejected rather than
//! silently clamped, and the caller aborts the run on the first rejection.

use prost::Message;

use imuframe_common::config::ReadoutDirection;
use imuframe_common::error::{ImuframeError, ImuframeResult};
use imuframe_imu_log::ImuSample;

use crate::record::{FrameRecord, StreamHeader};
use crate::schema;

/// Serialize one record.
pub fn encode_record(record: &FrameRecord) -> ImuframeResult<Vec<u8>> {
    Ok(to_message(record)?.encode_to_vec())
}

/// Parse one payload back into the wire message.
pub fn decode_record(payload: &[u8]) -> ImuframeResult<schema::Main> {
    schema::Main::decode(payload)
        .map_err(|e| ImuframeError::framing(format!("invalid frame payload: {e}")))
}

/// Map a record onto the wire schema, checking every value fits.
pub fn to_message(record: &FrameRecord) -> ImuframeResult<schema::Main> {
    let frame_number = record.frame_number;
    let wire_frame_number = u32::try_from(frame_number).map_err(|_| {
        ImuframeError::encoding(frame_number, "frame number exceeds uint32 range")
    })?;

    let imu = record
        .samples
        .iter()
        .map(|sample| to_imu_data(frame_number, sample))
        .collect::<ImuframeResult<Vec<_>>>()?;

    Ok(schema::Main {
        magic_string: record.magic_string.to_string(),
        protocol_version: record.protocol_version,
        header: record
            .header
            .as_ref()
            .map(|h| to_header(frame_number, h))
            .transpose()?,
        frame: Some(schema::FrameMetadata {
            frame_number: wire_frame_number,
            start_timestamp_us: timestamp(frame_number, record.start_timestamp_us)?,
            end_timestamp_us: timestamp(frame_number, record.end_timestamp_us)?,
            imu,
        }),
    })
}

fn to_imu_data(frame_number: u64, sample: &ImuSample) -> ImuframeResult<schema::ImuData> {
    Ok(schema::ImuData {
        sample_timestamp_us: timestamp(frame_number, sample.timestamp_us)?,
        gyroscope_x: sensor(frame_number, "gyroscope_x", sample.gyro_x)?,
        gyroscope_y: sensor(frame_number, "gyroscope_y", sample.gyro_y)?,
        gyroscope_z: sensor(frame_number, "gyroscope_z", sample.gyro_z)?,
        accelerometer_x: sensor(frame_number, "accelerometer_x", sample.accel_x)?,
        accelerometer_y: sensor(frame_number, "accelerometer_y", sample.accel_y)?,
        accelerometer_z: sensor(frame_number, "accelerometer_z", sample.accel_z)?,
    })
}

fn to_header(frame_number: u64, header: &StreamHeader) -> ImuframeResult<schema::Header> {
    let frame_rate = narrow(frame_number, "frame_rate", header.frame_rate)?;
    let direction = match header.frame_readout_direction {
        ReadoutDirection::TopToBottom => schema::FrameReadoutDirection::TopToBottom,
        ReadoutDirection::BottomToTop => schema::FrameReadoutDirection::BottomToTop,
        ReadoutDirection::LeftToRight => schema::FrameReadoutDirection::LeftToRight,
        ReadoutDirection::RightToLeft => schema::FrameReadoutDirection::RightToLeft,
    };

    Ok(schema::Header {
        camera: Some(schema::CameraMetadata {
            camera_brand: header.camera_brand.clone(),
            camera_model: header.camera_model.clone(),
            firmware_version: header.firmware_version.clone(),
            lens_brand: header.lens_brand.clone(),
            lens_model: header.lens_model.clone(),
            sensor_pixel_width: header.sensor_pixel_width,
            sensor_pixel_height: header.sensor_pixel_height,
            crop_factor: header.crop_factor,
            lens_profile: header.lens_profile.clone(),
        }),
        clip: Some(schema::ClipMetadata {
            frame_width: header.frame_width,
            frame_height: header.frame_height,
            record_frame_rate: frame_rate,
            sensor_frame_rate: frame_rate,
            file_frame_rate: frame_rate,
            rotation_degrees: header.rotation_degrees,
            imu_sample_rate: narrow(frame_number, "imu_sample_rate", header.imu_sample_rate)?,
            pixel_aspect_ratio: header.pixel_aspect_ratio,
            frame_readout_time_us: header.frame_readout_time_us,
            frame_readout_direction: direction as i32,
        }),
    })
}

fn timestamp(frame_number: u64, value: f64) -> ImuframeResult<Option<f64>> {
    if value.is_finite() {
        Ok(schema::present_f64(value))
    } else {
        Err(ImuframeError::encoding(
            frame_number,
            format!("timestamp {value} is not finite"),
        ))
    }
}

/// Narrow a sensor value and apply `float` wire presence.
fn sensor(frame_number: u64, field: &str, value: f64) -> ImuframeResult<Option<f32>> {
    narrow(frame_number, field, value).map(schema::present_f32)
}

/// Narrow to a `float` field. NaN passes through; overflow does not.
fn narrow(frame_number: u64, field: &str, value: f64) -> ImuframeResult<f32> {
    let narrowed = value as f32;
    if value.is_finite() && narrowed.is_infinite() {
        return Err(ImuframeError::encoding(
            frame_number,
            format!("{field} value {value} overflows float"),
        ));
    }
    Ok(narrowed)
}
