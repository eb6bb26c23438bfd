//! Converting data lines into IMU samples.
//!
//! Malformed lines never abort a conversion: they come back as a
//! [`LineRejection`], get logged, and are counted.

use serde::{Deserialize, Serialize};

/// Number of leading columns every data line must carry.
pub const REQUIRED_FIELDS: usize = 7;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

const COLUMN_NAMES: [&str; REQUIRED_FIELDS] = ["t", "gx", "gy", "gz", "ax", "ay", "az"];

/// One inertial reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImuSample {
    /// Sample time in microseconds.
    pub timestamp_us: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
}

/// Why a data line was discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineRejection {
    #[error("expected at least 7 fields, found {found}")]
    TooFewFields { found: usize },

    #[error("column `{column}` is not a number: {value:?}")]
    InvalidNumber { column: &'static str, value: String },
}

/// Parse one data line.
///
/// `time_scale` is seconds per raw timestamp unit; the raw integer timestamp
/// is scaled to seconds and then to microseconds. Columns past the seventh
/// are ignored.
pub fn parse_line(line: &str, time_scale: f64) -> Result<ImuSample, LineRejection> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if fields.len() < REQUIRED_FIELDS {
        return Err(LineRejection::TooFewFields {
            found: fields.len(),
        });
    }

    let raw_timestamp: i64 = fields[0].parse().map_err(|_| invalid(0, fields[0]))?;
    let mut values = [0.0f64; REQUIRED_FIELDS - 1];
    for (i, value) in values.iter_mut().enumerate() {
        let column = i + 1;
        *value = fields[column]
            .parse()
            .map_err(|_| invalid(column, fields[column]))?;
    }

    let [gyro_x, gyro_y, gyro_z, accel_x, accel_y, accel_z] = values;
    Ok(ImuSample {
        timestamp_us: raw_timestamp as f64 * time_scale * MICROS_PER_SECOND,
        gyro_x,
        gyro_y,
        gyro_z,
        accel_x,
        accel_y,
        accel_z,
    })
}

fn invalid(column: usize, value: &str) -> LineRejection {
    LineRejection::InvalidNumber {
        column: COLUMN_NAMES[column],
        value: value.to_string(),
    }
}

/// Samples parsed from a log, plus how many lines were thrown away.
#[derive(Debug, Clone, Default)]
pub struct ParsedSamples {
    pub samples: Vec<ImuSample>,
    pub rejected: usize,
}

/// Line-by-line sample parser with a fixed time scale.
#[derive(Debug, Clone, Copy)]
pub struct SampleParser {
    time_scale: f64,
}

impl SampleParser {
    pub fn new(time_scale: f64) -> Self {
        Self { time_scale }
    }

    /// Parse every line, keeping input order and skipping rejected lines.
    pub fn parse_lines<I, S>(&self, lines: I) -> ParsedSamples
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = ParsedSamples::default();

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            match parse_line(line, self.time_scale) {
                Ok(sample) => parsed.samples.push(sample),
                Err(rejection) => {
                    parsed.rejected += 1;
                    match rejection {
                        // Blank and trailing lines land here; not worth a warning.
                        LineRejection::TooFewFields { .. } => {
                            tracing::debug!(data_line = index, %rejection, "skipping line")
                        }
                        LineRejection::InvalidNumber { .. } => {
                            tracing::warn!(data_line = index, %rejection, line, "skipping line")
                        }
                    }
                }
            }
        }

        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_line() {
        let sample = parse_line("1000, 0.5,-0.25,1.0, 0.0,9.81,-1e-3", 1e-6).unwrap();
        assert!((sample.timestamp_us - 1000.0).abs() < 1e-9);
        assert_eq!(sample.gyro_x, 0.5);
        assert_eq!(sample.gyro_y, -0.25);
        assert_eq!(sample.gyro_z, 1.0);
        assert_eq!(sample.accel_x, 0.0);
        assert_eq!(sample.accel_y, 9.81);
        assert_eq!(sample.accel_z, -1e-3);
    }

    #[test]
    fn test_timestamp_scaling() {
        let sample = parse_line("5000000,0,0,0,0,0,0", 1e-6).unwrap();
        assert!((sample.timestamp_us - 5_000_000.0).abs() < 1e-6);

        // Millisecond ticks.
        let sample = parse_line("42,0,0,0,0,0,0", 0.001).unwrap();
        assert!((sample.timestamp_us - 42_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let sample = parse_line("1,1,2,3,4,5,6,7,8,9", 1.0).unwrap();
        assert_eq!(sample.accel_z, 6.0);
    }

    #[test]
    fn test_too_few_fields() {
        assert_eq!(
            parse_line("1,2,3,4,5,6", 1.0),
            Err(LineRejection::TooFewFields { found: 6 })
        );
        assert_eq!(
            parse_line("", 1.0),
            Err(LineRejection::TooFewFields { found: 1 })
        );
    }

    #[test]
    fn test_timestamp_must_be_integer() {
        assert_eq!(
            parse_line("1.5,0,0,0,0,0,0", 1.0),
            Err(LineRejection::InvalidNumber {
                column: "t",
                value: "1.5".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_gyro_names_column() {
        assert_eq!(
            parse_line("1,0,abc,0,0,0,0", 1.0),
            Err(LineRejection::InvalidNumber {
                column: "gy",
                value: "abc".to_string()
            })
        );
        assert!(matches!(
            parse_line("1,0,0,0,0,0,", 1.0),
            Err(LineRejection::InvalidNumber { column: "az", .. })
        ));
    }

    #[test]
    fn test_parse_lines_skips_malformed_and_keeps_order() {
        let lines = [
            "1,0,0,0,0,0,1",
            "2,0,0,0,0,0",
            "3,0,x,0,0,0,1",
            "4,0,0,0,0,0,1",
            "",
        ];
        let parsed = SampleParser::new(1e-6).parse_lines(lines);

        assert_eq!(parsed.rejected, 3);
        let timestamps: Vec<f64> = parsed.samples.iter().map(|s| s.timestamp_us).collect();
        assert_eq!(parsed.samples.len(), 2);
        assert!((timestamps[0] - 1.0).abs() < 1e-9);
        assert!((timestamps[1] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_crlf_lines() {
        let parsed = SampleParser::new(1.0).parse_lines(["7,1,2,3,4,5,6\r"]);
        assert_eq!(parsed.rejected, 0);
        assert_eq!(parsed.samples[0].accel_z, 6.0);
    }
}
