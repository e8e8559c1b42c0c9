//! Error types shared across Streamcut crates.
//!
//! Every variant is fatal to the run: the pipeline either produces a
//! complete, playable output file or none at all, so nothing here is
//! retried or recovered from.

use std::path::PathBuf;

/// Top-level error type for Streamcut operations.
#[derive(Debug, thiserror::Error)]
pub enum StreamcutError {
    #[error("Selection aborted by operator")]
    UserAbort,

    #[error("Source has no frames: {path}")]
    EmptySource { path: PathBuf },

    #[error("Compositor received an empty image sequence")]
    EmptyInput,

    #[error("Degenerate image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error(
        "Region (rows {row_offset}+{row_extent}, cols {col_offset}+{col_extent}) \
         exceeds frame extent {frame_width}x{frame_height}"
    )]
    RegionOutOfBounds {
        row_offset: u32,
        row_extent: u32,
        col_offset: u32,
        col_extent: u32,
        frame_width: u32,
        frame_height: u32,
    },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Encode error: {message}")]
    Encode { message: String },

    #[error("Probe error: {message}")]
    Probe { message: String },

    #[error("Remux error: {message}")]
    Remux { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using StreamcutError.
pub type StreamcutResult<T> = Result<T, StreamcutError>;

impl StreamcutError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode {
            message: msg.into(),
        }
    }

    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe {
            message: msg.into(),
        }
    }

    pub fn remux(msg: impl Into<String>) -> Self {
        Self::Remux {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
