use ndarray::{ArrayView3, ArrayViewMut3};

use super::error::ScanError;

/// RGBA, as delivered by camera capture.
pub const RGBA_CHANNELS: u8 = 4;
pub const RGB_CHANNELS: u8 = 3;

/// A single captured frame: contiguous 8-bit pixels in row-major order.
///
/// Construction validates the buffer against the claimed dimensions, so the
/// pipeline stages downstream never see a malformed frame. Only the first
/// three channels are read; alpha is carried but ignored.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u8,
        index: usize,
    ) -> Result<Self, ScanError> {
        if width == 0 || height == 0 {
            return Err(ScanError::malformed(format!(
                "zero dimension ({width}x{height})"
            )));
        }
        if channels != RGB_CHANNELS && channels != RGBA_CHANNELS {
            return Err(ScanError::malformed(format!(
                "unsupported channel count {channels}"
            )));
        }
        let expected = (width as usize) * (height as usize) * (channels as usize);
        if data.len() != expected {
            return Err(ScanError::malformed(format!(
                "buffer holds {} bytes, {width}x{height}x{channels} needs {expected}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            index,
        })
    }

    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self, ScanError> {
        Self::new(data, width, height, RGBA_CHANNELS, 0)
    }

    /// Frame of a single repeated color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, ScanError> {
        let pixel = [rgb[0], rgb[1], rgb[2], 255];
        let count = (width as usize) * (height as usize);
        let data = pixel.iter().copied().cycle().take(count * 4).collect();
        Self::from_rgba(data, width, height)
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// RGB of the pixel at column `x`, row `y`.
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y as usize) * (self.width as usize) + x as usize) * self.channels as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
