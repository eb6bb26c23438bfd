//! Gyroflow protobuf messages (`gyroflow.proto`, protocol version 1).
//!
//! Field tags and wire types are a fixed contract shared with Gyroflow and
//! must not be renumbered. Only the fields this tool fills are declared;
//! prost skips unknown fields when decoding.

/// Top-level message; one per video frame.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Main {
    #[prost(string, tag = "1")]
    pub magic_string: String,
    #[prost(uint32, tag = "2")]
    pub protocol_version: u32,
    #[prost(message, optional, tag = "3")]
    pub header: Option<Header>,
    #[prost(message, optional, tag = "4")]
    pub frame: Option<FrameMetadata>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Header {
    #[prost(message, optional, tag = "1")]
    pub camera: Option<CameraMetadata>,
    #[prost(message, optional, tag = "2")]
    pub clip: Option<ClipMetadata>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CameraMetadata {
    #[prost(string, tag = "1")]
    pub camera_brand: String,
    #[prost(string, tag = "2")]
    pub camera_model: String,
    #[prost(string, optional, tag = "4")]
    pub firmware_version: Option<String>,
    #[prost(string, tag = "5")]
    pub lens_brand: String,
    #[prost(string, tag = "6")]
    pub lens_model: String,
    #[prost(uint32, tag = "8")]
    pub sensor_pixel_width: u32,
    #[prost(uint32, tag = "9")]
    pub sensor_pixel_height: u32,
    #[prost(float, tag = "10")]
    pub crop_factor: f32,
    /// Lens profile JSON, embedded verbatim.
    #[prost(string, optional, tag = "11")]
    pub lens_profile: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ClipMetadata {
    #[prost(uint32, tag = "1")]
    pub frame_width: u32,
    #[prost(uint32, tag = "2")]
    pub frame_height: u32,
    #[prost(float, tag = "3")]
    pub record_frame_rate: f32,
    #[prost(float, tag = "4")]
    pub sensor_frame_rate: f32,
    #[prost(float, tag = "5")]
    pub file_frame_rate: f32,
    #[prost(int32, tag = "6")]
    pub rotation_degrees: i32,
    #[prost(float, tag = "7")]
    pub imu_sample_rate: f32,
    #[prost(float, tag = "8")]
    pub pixel_aspect_ratio: f32,
    #[prost(float, tag = "9")]
    pub frame_readout_time_us: f32,
    #[prost(enumeration = "FrameReadoutDirection", tag = "10")]
    pub frame_readout_direction: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum FrameReadoutDirection {
    TopToBottom = 0,
    BottomToTop = 1,
    LeftToRight = 2,
    RightToLeft = 3,
}

/// Per-frame data.
///
/// Floating-point fields are `optional` on the Rust side only: the wire bytes
/// equal proto3 implicit presence, which writes a value unless its bit
/// pattern is all zeros. Encoders set `Some` for every value except `+0.0`,
/// so `-0.0` still reaches the wire.
#[derive(Clone, PartialEq, prost::Message)]
pub struct FrameMetadata {
    #[prost(uint32, tag = "1")]
    pub frame_number: u32,
    #[prost(double, optional, tag = "2")]
    pub start_timestamp_us: Option<f64>,
    #[prost(double, optional, tag = "3")]
    pub end_timestamp_us: Option<f64>,
    #[prost(message, repeated, tag = "4")]
    pub imu: Vec<ImuData>,
}

/// One IMU reading. Presence follows the same rule as [`FrameMetadata`].
#[derive(Clone, PartialEq, prost::Message)]
pub struct ImuData {
    #[prost(double, optional, tag = "1")]
    pub sample_timestamp_us: Option<f64>,
    #[prost(float, optional, tag = "2")]
    pub gyroscope_x: Option<f32>,
    #[prost(float, optional, tag = "3")]
    pub gyroscope_y: Option<f32>,
    #[prost(float, optional, tag = "4")]
    pub gyroscope_z: Option<f32>,
    #[prost(float, optional, tag = "5")]
    pub accelerometer_x: Option<f32>,
    #[prost(float, optional, tag = "6")]
    pub accelerometer_y: Option<f32>,
    #[prost(float, optional, tag = "7")]
    pub accelerometer_z: Option<f32>,
}

/// Wire presence of a proto3 `double`: absent only for `+0.0`.
pub fn present_f64(value: f64) -> Option<f64> {
    (value.to_bits() != 0).then_some(value)
}

/// Wire presence of a proto3 `float`: absent only for `+0.0`.
pub fn present_f32(value: f32) -> Option<f32> {
    (value.to_bits() != 0).then_some(value)
}
