use std::path::Path;

use crate::shared::error::ScanError;
use crate::shared::frame::Frame;
use crate::video::domain::image_reader::ImageReader;

/// Reads image files with the `image` crate, converting to RGBA.
///
/// Every supported format ends up in the same 4-channel layout a camera
/// frame would have.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, ScanError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        log::debug!("Read {} ({width}x{height})", path.display());
        Frame::from_rgba(img.into_raw(), width, height)
    }
}
