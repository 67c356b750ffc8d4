use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::shared::error::ScanError;
use crate::shared::frame::{Frame, RGBA_CHANNELS};
use crate::video::domain::image_writer::ImageWriter;

/// Writes a frame to an image file using the `image` crate.
///
/// The format follows the file extension.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), ScanError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let (w, h, data) = (frame.width(), frame.height(), frame.data().to_vec());
        let img = if frame.channels() == RGBA_CHANNELS {
            RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8)
        } else {
            RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8)
        }
        .ok_or_else(|| ScanError::malformed("buffer does not fit image dimensions"))?;

        // JPEG has no alpha channel.
        let img = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
                DynamicImage::ImageRgb8(img.to_rgb8())
            }
            _ => img,
        };

        img.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::domain::image_reader::ImageReader;
    use crate::video::infrastructure::image_file_reader::ImageFileReader;

    #[test]
    fn test_png_roundtrip_preserves_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let frame = Frame::filled(6, 4, [200, 150, 120]).unwrap();

        ImageFileWriter::new().write(&path, &frame).unwrap();
        let back = ImageFileReader::new().read(&path).unwrap();

        assert_eq!(back.width(), 6);
        assert_eq!(back.height(), 4);
        assert_eq!(back.data(), frame.data());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.png");
        let frame = Frame::filled(2, 2, [1, 2, 3]).unwrap();
        ImageFileWriter::new().write(&path, &frame).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let frame = Frame::filled(8, 8, [200, 150, 120]).unwrap();
        ImageFileWriter::new().write(&path, &frame).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_rgb_frame_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        let frame = Frame::new(vec![10, 20, 30, 40, 50, 60], 2, 1, 3, 0).unwrap();
        ImageFileWriter::new().write(&path, &frame).unwrap();
        let back = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(back.rgb_at(1, 0), [40, 50, 60]);
    }
}
