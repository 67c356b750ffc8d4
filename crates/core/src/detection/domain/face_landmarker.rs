use crate::shared::error::ScanError;
use crate::shared::frame::Frame;
use crate::shared::landmark::LandmarkSet;

/// Domain interface for per-frame facial landmark detection.
///
/// `Ok(None)` means no face was found in this frame and the caller should
/// try the next one. Errors are reserved for conditions that retrying will
/// not fix. Implementations may keep state across frames, hence `&mut self`.
pub trait FaceLandmarker: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Option<LandmarkSet>, ScanError>;
}
