//! Summarize a framed protobuf file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use imuframe_framing::{decode_record, FramedReader};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct FrameLine {
    index: usize,
    payload_bytes: usize,
    frame_number: u32,
    start_timestamp_us: f64,
    end_timestamp_us: f64,
    samples: usize,
    has_header: bool,
}

/// Totals over every record in a file.
#[derive(Debug, Default, PartialEq)]
struct Totals {
    records: usize,
    samples: usize,
    payload_bytes: usize,
    span: Option<(f64, f64)>,
}

pub fn run(path: PathBuf, frames: bool, json: bool) -> anyhow::Result<()> {
    let totals = summarize(&path, |line| {
        if json {
            match serde_json::to_string(line) {
                Ok(text) => println!("{text}"),
                Err(e) => tracing::warn!("failed to serialize frame {}: {e}", line.index),
            }
        } else if frames {
            println!(
                "  #{:<6} {:>8} bytes  {:>4} samples  {:.1}..{:.1} us{}",
                line.frame_number,
                line.payload_bytes,
                line.samples,
                line.start_timestamp_us,
                line.end_timestamp_us,
                if line.has_header { "  [header]" } else { "" }
            );
        }
    })?;

    if json {
        return Ok(());
    }

    println!("File: {}", path.display());
    println!("  Records: {}", totals.records);
    println!("  IMU samples: {}", totals.samples);
    println!("  Payload bytes: {}", totals.payload_bytes);
    if let Some((start, end)) = totals.span {
        println!(
            "  Time span: {:.1} us .. {:.1} us ({:.3} s)",
            start,
            end,
            (end - start) / 1_000_000.0
        );
    }

    Ok(())
}

/// Decode every record, handing each to `on_frame`, and total them up.
fn summarize(path: &Path, mut on_frame: impl FnMut(&FrameLine)) -> anyhow::Result<Totals> {
    let reader =
        FramedReader::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut totals = Totals::default();

    for (index, payload) in reader.enumerate() {
        let payload = payload.with_context(|| format!("Failed to read record {index}"))?;
        let message =
            decode_record(&payload).with_context(|| format!("Failed to decode record {index}"))?;
        let has_header = message.header.is_some();
        let frame = message.frame.unwrap_or_default();

        let line = FrameLine {
            index,
            payload_bytes: payload.len(),
            frame_number: frame.frame_number,
            start_timestamp_us: frame.start_timestamp_us(),
            end_timestamp_us: frame.end_timestamp_us(),
            samples: frame.imu.len(),
            has_header,
        };
        on_frame(&line);

        totals.records += 1;
        totals.samples += line.samples;
        totals.payload_bytes += line.payload_bytes;
        totals.span = Some(match totals.span {
            None => (line.start_timestamp_us, line.end_timestamp_us),
            Some((start, _)) => (start, line.end_timestamp_us),
        });
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imuframe_common::config::ConversionConfig;

    #[test]
    fn test_summary_matches_conversion() {
        let dir = std::env::temp_dir().join("imuframe_test_cli_inspect");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let mut log = String::from("tscale,0.001\nt,gx,gy,gz,ax,ay,az\n");
        for i in 0..50 {
            log.push_str(&format!("{i},0.1,-0.0,0.2,0,0,1\n"));
        }
        let input_path = dir.join("flight.gcsv");
        std::fs::write(&input_path, log).unwrap();

        let config = ConversionConfig {
            input_path,
            output_path: dir.join("flight.bin"),
            imu_sample_rate: 1000.0,
            video_frame_rate: 60.0,
            time_scale: 0.001,
            ..ConversionConfig::default()
        };
        let summary = imuframe_framing::convert(&config).unwrap();

        let mut numbers = Vec::new();
        let totals = summarize(&config.output_path, |line| numbers.push(line.frame_number)).unwrap();

        assert_eq!(totals.records as u64, summary.frames_written);
        assert_eq!(totals.records, 3);
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(totals.samples, 48);
        assert_eq!(
            (totals.payload_bytes + 4 * totals.records) as u64,
            summary.bytes_written
        );
        let (start, end) = totals.span.unwrap();
        assert_eq!(start, 0.0);
        assert!((end - 47_000.0).abs() < 1e-6);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_truncated_file_is_an_error() {
        let dir = std::env::temp_dir().join("imuframe_test_cli_inspect_truncated");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.bin");
        std::fs::write(&path, [9u8, 0, 0, 0, 1, 2]).unwrap();

        assert!(summarize(&path, |_| {}).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
