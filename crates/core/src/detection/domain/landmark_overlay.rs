use crate::shared::constants::KEY_POINTS;
use crate::shared::frame::Frame;
use crate::shared::landmark::LandmarkSet;

pub const MARKER_RADIUS: i64 = 3;
pub const MARKER_COLOR: [u8; 3] = [0, 255, 0];

/// Paints a filled disc at each measurement key point.
///
/// Discs are clipped at the frame edge. Alpha, when present, is left as is.
pub fn draw_key_points(frame: &mut Frame, landmarks: &LandmarkSet) {
    let (w, h) = (frame.width() as i64, frame.height() as i64);
    let mut pixels = frame.as_ndarray_mut();

    for &idx in KEY_POINTS.iter() {
        let lm = landmarks[idx];
        let cx = (lm.x * w as f64) as i64;
        let cy = (lm.y * h as f64) as i64;

        for dy in -MARKER_RADIUS..=MARKER_RADIUS {
            for dx in -MARKER_RADIUS..=MARKER_RADIUS {
                if dx * dx + dy * dy > MARKER_RADIUS * MARKER_RADIUS {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x < 0 || y < 0 || x >= w || y >= h {
                    continue;
                }
                for (c, value) in MARKER_COLOR.iter().enumerate() {
                    pixels[[y as usize, x as usize, c]] = *value;
                }
            }
        }
    }
}
