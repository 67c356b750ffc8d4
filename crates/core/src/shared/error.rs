use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the scan pipeline.
///
/// A frame with too little skin coverage is not an error: the locator
/// returns `None` and the caller retries. `InsufficientFaceEvidence` is only
/// raised once a bounded retry policy gives up.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("malformed frame: {reason}")]
    MalformedFrame { reason: String },

    #[error("no face found after {attempts} attempt(s)")]
    InsufficientFaceEvidence { attempts: usize },

    #[error("expected {expected} landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("landmark {index} has a non-finite coordinate")]
    InvalidLandmark { index: usize },

    #[error("invalid scan config: {0}")]
    InvalidConfig(String),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("scan session is not active")]
    SessionNotActive,

    #[error("ran out of frames after {frames} frame(s) before the scan completed")]
    SequenceExhausted { frames: usize },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScanError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedFrame {
            reason: reason.into(),
        }
    }
}
