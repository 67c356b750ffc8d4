use crate::shared::config::ScanConfig;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

use super::skin_classifier::is_skin_color;

/// Finds the bounding box of skin-colored pixels in a frame.
///
/// Frames where skin covers less than `min_coverage` of the scanned pixels
/// yield `None`; the caller is expected to try again on the next frame.
/// With a sampling stride above 1 only every Nth pixel on each axis is
/// scanned, and coverage is measured against the scanned pixel count so the
/// threshold keeps its meaning.
#[derive(Clone, Debug)]
pub struct FaceRegionLocator {
    stride: u32,
    min_coverage: f64,
}

impl FaceRegionLocator {
    pub fn new(stride: u32, min_coverage: f64) -> Self {
        Self {
            stride: stride.max(1),
            min_coverage,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.sample_stride, config.min_coverage)
    }

    pub fn locate(&self, frame: &Frame) -> Option<FaceRegion> {
        let pixels = frame.as_ndarray();
        let (width, height) = (frame.width(), frame.height());
        let step = self.stride as usize;

        let mut min_x = width;
        let mut max_x = 0;
        let mut min_y = height;
        let mut max_y = 0;
        let mut skin_pixels: u64 = 0;
        let mut scanned: u64 = 0;

        for y in (0..height as usize).step_by(step) {
            for x in (0..width as usize).step_by(step) {
                scanned += 1;
                let (r, g, b) = (pixels[[y, x, 0]], pixels[[y, x, 1]], pixels[[y, x, 2]]);
                if !is_skin_color(r, g, b) {
                    continue;
                }
                skin_pixels += 1;
                let (x, y) = (x as u32, y as u32);
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }

        if skin_pixels == 0 || (skin_pixels as f64) < scanned as f64 * self.min_coverage {
            log::trace!(
                "Frame {}: {skin_pixels}/{scanned} skin pixels, below coverage floor",
                frame.index()
            );
            return None;
        }

        Some(FaceRegion::from_bounds(min_x, max_x, min_y, max_y))
    }
}

impl Default for FaceRegionLocator {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}
