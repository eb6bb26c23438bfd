//! Error types shared across imuframe crates.

use std::path::PathBuf;

/// Top-level error type for imuframe operations.
///
/// Every variant here is fatal for a conversion run. Per-line problems in
/// the input log are not errors at this level; they are counted and skipped
/// by the sample parser.
#[derive(Debug, thiserror::Error)]
pub enum ImuframeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoding error in frame {frame_number}: {message}")]
    Encoding { frame_number: u64, message: String },

    #[error("Framing error: {message}")]
    Framing { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ImuframeError.
pub type ImuframeResult<T> = Result<T, ImuframeError>;

impl ImuframeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn encoding(frame_number: u64, msg: impl Into<String>) -> Self {
        Self::Encoding {
            frame_number,
            message: msg.into(),
        }
    }

    pub fn framing(msg: impl Into<String>) -> Self {
        Self::Framing {
            message: msg.into(),
        }
    }

    /// Wrap an I/O error with the file it happened on.
    ///
    /// A missing file is reported as [`ImuframeError::FileNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
