//! imuframe Framing: from IMU samples to length-prefixed frame records
//!
//! - **Segment:** cut the sample sequence into one batch per video frame
//! - **Record:** wrap a batch with its frame number and time span
//! - **Encode:** serialize a record as a Gyroflow protobuf `Main` message
//! - **Writer:** append `[u32 LE length][payload]` records to a file
//! - **Pipeline:** the whole gcsv to framed-file conversion

pub mod encode;
pub mod pipeline;
pub mod record;
pub mod schema;
pub mod segment;
pub mod writer;

pub use encode::{decode_record, encode_record};
pub use pipeline::{convert, ConversionSummary};
pub use record::{build_records, FrameRecord, StreamHeader};
pub use segment::FrameSegmenter;
pub use writer::{FramedReader, FramedWriter};
