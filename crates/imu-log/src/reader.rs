//! Locating the column header and exposing the data lines of a log.

use std::path::Path;

use imuframe_common::error::{ImuframeError, ImuframeResult};

/// Token that starts the column-header line (`t,gx,gy,gz,ax,ay,az`).
pub const HEADER_PREFIX: &str = "t,";

/// A log split around its column-header line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImuLog {
    /// Lines before the header, in order.
    pub preamble: Vec<String>,

    /// The header line itself, if one was found.
    pub header: Option<String>,

    /// Every line after the header, in order.
    pub data_lines: Vec<String>,
}

impl ImuLog {
    /// Split log text at the first line whose trimmed content starts with `t,`.
    ///
    /// Without such a line there is no data: the whole text is preamble.
    pub fn from_text(text: &str) -> Self {
        let mut lines = text.lines();
        let mut preamble = Vec::new();

        for line in lines.by_ref() {
            if line.trim().starts_with(HEADER_PREFIX) {
                return Self {
                    preamble,
                    header: Some(line.to_string()),
                    data_lines: lines.map(str::to_string).collect(),
                };
            }
            preamble.push(line.to_string());
        }

        Self {
            preamble,
            header: None,
            data_lines: Vec::new(),
        }
    }

    /// Look up a `key,value` entry in the preamble.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.preamble.iter().find_map(|line| {
            let (k, v) = line.split_once(',')?;
            (k.trim() == key).then(|| v.trim())
        })
    }

    /// The preamble `tscale` entry as seconds per raw timestamp unit.
    pub fn time_scale(&self) -> Option<f64> {
        self.metadata("tscale")?.parse().ok()
    }
}

/// Read a whole log file into memory and split it.
pub fn read_log(path: &Path) -> ImuframeResult<ImuLog> {
    let text = std::fs::read_to_string(path).map_err(|e| ImuframeError::io(path, e))?;
    let log = ImuLog::from_text(&text);

    match &log.header {
        Some(header) => tracing::debug!(
            path = %path.display(),
            header = %header.trim(),
            preamble_lines = log.preamble.len(),
            data_lines = log.data_lines.len(),
            "read IMU log"
        ),
        None => tracing::warn!(
            path = %path.display(),
            "no `t,` header line found; log has no data rows"
        ),
    }

    Ok(log)
}
