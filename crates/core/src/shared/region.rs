/// Pixel bounding box of the skin-colored area believed to contain a face.
///
/// Bounds are inclusive pixel coordinates; `width`/`height` are the spans
/// `max - min`, so a single-pixel region has zero width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceRegion {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceRegion {
    /// Builds a region from inclusive bounds, deriving the spans.
    pub fn from_bounds(min_x: u32, max_x: u32, min_y: u32, max_y: u32) -> Self {
        debug_assert!(min_x <= max_x && min_y <= max_y, "bounds must be ordered");
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// The central box covering `fraction` of each span, as `(x1, y1, x2, y2)`.
    pub fn central_box(&self, fraction: f64) -> (f64, f64, f64, f64) {
        let margin = (1.0 - fraction) / 2.0;
        let (x0, y0) = (self.min_x as f64, self.min_y as f64);
        let (w, h) = (self.width as f64, self.height as f64);
        (
            x0 + w * margin,
            y0 + h * margin,
            x0 + w * (1.0 - margin),
            y0 + h * (1.0 - margin),
        )
    }
}
