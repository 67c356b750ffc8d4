use std::path::Path;

use crate::shared::error::ScanError;
use crate::shared::frame::Frame;

/// Decodes a still image into a [`Frame`].
///
/// The offline stand-in for camera capture: implementations own the file
/// format details, the pipeline only sees pixels.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<Frame, ScanError>;
}
