use palette::white_point::D65;
use palette::{FromColor, Lab, LinSrgb, Srgb};
use serde::{Deserialize, Serialize};

use crate::shared::constants::SKIN_SAMPLE_POINTS;
use crate::shared::context::AnalysisContext;
use crate::shared::frame::Frame;
use crate::shared::landmark::LandmarkSet;

/// Lightness buckets on CIELAB L*, lower bounds inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinToneCategory {
    VeryLight,
    Light,
    Medium,
    Tan,
    Brown,
    Dark,
}

impl SkinToneCategory {
    pub fn from_lightness(l: f64) -> Self {
        if l >= 80.0 {
            SkinToneCategory::VeryLight
        } else if l >= 70.0 {
            SkinToneCategory::Light
        } else if l >= 60.0 {
            SkinToneCategory::Medium
        } else if l >= 50.0 {
            SkinToneCategory::Tan
        } else if l >= 40.0 {
            SkinToneCategory::Brown
        } else {
            SkinToneCategory::Dark
        }
    }
}

impl std::fmt::Display for SkinToneCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SkinToneCategory::VeryLight => "very-light",
            SkinToneCategory::Light => "light",
            SkinToneCategory::Medium => "medium",
            SkinToneCategory::Tan => "tan",
            SkinToneCategory::Brown => "brown",
            SkinToneCategory::Dark => "dark",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkinTone {
    pub rgb: [u8; 3],
    /// `[L*, a*, b*]`, D65.
    pub lab: [f64; 3],
    pub category: SkinToneCategory,
    /// `#RRGGBB`, uppercase.
    pub hex: String,
}

impl SkinTone {
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let lab = rgb_to_lab(rgb);
        Self {
            rgb,
            lab,
            category: SkinToneCategory::from_lightness(lab[0]),
            hex: to_hex(rgb),
        }
    }
}

/// sRGB → linear RGB → XYZ (D65) → CIELAB.
pub fn rgb_to_lab(rgb: [u8; 3]) -> [f64; 3] {
    let srgb: Srgb<f64> = Srgb::new(rgb[0], rgb[1], rgb[2]).into_format();
    let linear: LinSrgb<f64> = srgb.into_linear();
    let lab = Lab::<D65, f64>::from_color(linear);
    [lab.l, lab.a, lab.b]
}

pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

/// Parses `#RRGGBB` (case-insensitive).
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Averages small pixel windows around fixed cheek, forehead, nose and
/// cheekbone landmarks into one color.
///
/// Windows are clamped to the frame and only in-bounds pixels are averaged,
/// so landmarks near the border still sample real skin.
#[derive(Clone, Debug)]
pub struct SkinToneExtractor {
    window: u32,
}

impl SkinToneExtractor {
    pub fn new(window: u32) -> Self {
        Self {
            window: window.max(1),
        }
    }

    pub fn from_context(context: &AnalysisContext) -> Self {
        Self::new(context.config().sample_window)
    }

    pub fn extract(&self, frame: &Frame, landmarks: &LandmarkSet) -> SkinTone {
        let mut sum = [0.0f64; 3];
        for &idx in SKIN_SAMPLE_POINTS.iter() {
            let mean = self.window_mean(frame, landmarks[idx].x, landmarks[idx].y);
            for c in 0..3 {
                sum[c] += mean[c];
            }
        }

        let n = SKIN_SAMPLE_POINTS.len() as f64;
        let rgb = sum.map(|s| (s / n).round().clamp(0.0, 255.0) as u8);
        SkinTone::from_rgb(rgb)
    }

    fn window_mean(&self, frame: &Frame, x: f64, y: f64) -> [f64; 3] {
        let (w, h) = (frame.width() as i64, frame.height() as i64);
        let cx = ((x * w as f64).floor() as i64).clamp(0, w - 1);
        let cy = ((y * h as f64).floor() as i64).clamp(0, h - 1);
        let half = (self.window / 2) as i64;

        let pixels = frame.as_ndarray();
        let mut sum = [0u64; 3];
        let mut count = 0u64;
        for row in (cy - half).max(0)..=(cy + half).min(h - 1) {
            for col in (cx - half).max(0)..=(cx + half).min(w - 1) {
                for (c, total) in sum.iter_mut().enumerate() {
                    *total += pixels[[row as usize, col as usize, c]] as u64;
                }
                count += 1;
            }
        }

        sum.map(|s| s as f64 / count as f64)
    }
}

impl Default for SkinToneExtractor {
    fn default() -> Self {
        Self::from_context(&AnalysisContext::default())
    }
}
