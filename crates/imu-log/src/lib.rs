//! imuframe IMU Log: reading Gyroflow `.gcsv` logs.
//!
//! A gcsv log is a short `key,value` preamble, a column header starting
//! with `t,`, and one comma-separated IMU reading per line:
//!
//! ```text
//! GYROFLOW IMU LOG
//! version,1.3
//! tscale,0.000001
//! t,gx,gy,gz,ax,ay,az
//! 0,0.01,-0.02,0.00,0.0,0.0,1.0
//! ```
//!
//! - **Reader:** split a log into preamble, header, and data lines
//! - **Sample:** turn data lines into [`ImuSample`]s, skipping malformed ones

pub mod reader;
pub mod sample;

pub use reader::{read_log, ImuLog};
pub use sample::{parse_line, ImuSample, LineRejection, ParsedSamples, SampleParser};
