//! Procedural landmark layout inside a located face region.
//!
//! Stands in for a trained landmark model: points are placed at fixed
//! fractional offsets of the region so that index ranges keep their
//! anatomical meaning (contour, eyes, nose, mouth), and the remaining
//! indices fill the middle of the face on a jittered grid.

use std::f64::consts::PI;

use crate::shared::constants::{FILLER_RANGE, LANDMARK_COUNT};
use crate::shared::landmark::{Landmark, LandmarkSet};
use crate::shared::region::FaceRegion;

const CONTOUR_POINTS: usize = 17;
const EYE_POINTS: usize = 20;
const NOSE_POINTS: usize = 10;
const MOUTH_POINTS: usize = 40;

const EYE_RADIUS_X: f64 = 0.05;
const EYE_RADIUS_Y: f64 = 0.03;
const LEFT_EYE_CENTER: (f64, f64) = (0.3, 0.3);
const RIGHT_EYE_CENTER: (f64, f64) = (0.7, 0.3);

/// Filler points occupy this central fraction of the region on each axis.
const FILLER_BOX: f64 = 0.6;
/// 19 x 19 = 361 filler points.
const FILLER_GRID: usize = 19;

/// Region-relative layout, scaled to pixels then normalized by frame size.
#[derive(Clone, Debug, Default)]
pub struct LandmarkSynthesizer;

impl LandmarkSynthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn synthesize(&self, region: &FaceRegion, frame_w: u32, frame_h: u32) -> LandmarkSet {
        let x0 = region.min_x as f64;
        let y0 = region.min_y as f64;
        let w = region.width as f64;
        let h = region.height as f64;

        let mut pixels: Vec<(f64, f64)> = Vec::with_capacity(LANDMARK_COUNT);

        for i in 0..CONTOUR_POINTS {
            let t = i as f64 / (CONTOUR_POINTS - 1) as f64;
            pixels.push((
                x0 + w * (0.2 + 0.6 * t),
                y0 + h * (0.1 + 0.4 * (t * PI).sin()),
            ));
        }

        for (cx, cy) in [LEFT_EYE_CENTER, RIGHT_EYE_CENTER] {
            let (cx, cy) = (x0 + w * cx, y0 + h * cy);
            for i in 0..EYE_POINTS {
                let angle = i as f64 / EYE_POINTS as f64 * 2.0 * PI;
                pixels.push((
                    cx + angle.cos() * w * EYE_RADIUS_X,
                    cy + angle.sin() * h * EYE_RADIUS_Y,
                ));
            }
        }

        let nose_x = x0 + w * 0.5;
        for i in 0..NOSE_POINTS {
            let offset = i as f64 - 5.0;
            pixels.push((nose_x + offset * w * 0.01, y0 + h * (0.4 + i as f64 * 0.03)));
        }

        let mouth_y = y0 + h * 0.7;
        for i in 0..MOUTH_POINTS {
            let t = i as f64 / MOUTH_POINTS as f64;
            pixels.push((
                x0 + w * (0.25 + 0.5 * t),
                mouth_y + (t * PI).sin() * h * 0.05,
            ));
        }

        debug_assert_eq!(pixels.len(), FILLER_RANGE.start);
        pixels.extend(filler_grid(region));

        let points = pixels
            .into_iter()
            .map(|(px, py)| Landmark::normalized(px, py, frame_w, frame_h))
            .collect();
        LandmarkSet::new(points).expect("synthesized layout always has LANDMARK_COUNT points")
    }
}

/// Jittered grid over the central box of the region.
///
/// Each cell holds one point offset within the cell by a pseudo-random
/// amount keyed on the region and the point index, so the same region
/// always yields the same points.
fn filler_grid(region: &FaceRegion) -> impl Iterator<Item = (f64, f64)> + '_ {
    let (bx1, by1, bx2, by2) = region.central_box(FILLER_BOX);
    let cell_w = (bx2 - bx1) / FILLER_GRID as f64;
    let cell_h = (by2 - by1) / FILLER_GRID as f64;
    let seed = region_seed(region);

    (0..FILLER_GRID * FILLER_GRID).map(move |k| {
        let (row, col) = (k / FILLER_GRID, k % FILLER_GRID);
        let mut state = seed ^ (k as u64).wrapping_mul(0xA24B_AED4_963E_E407);
        let jx = unit_interval(splitmix64(&mut state));
        let jy = unit_interval(splitmix64(&mut state));
        (
            bx1 + (col as f64 + jx) * cell_w,
            by1 + (row as f64 + jy) * cell_h,
        )
    })
}

fn region_seed(region: &FaceRegion) -> u64 {
    let mut state = 0x5EED_F00D_u64;
    for v in [region.min_x, region.min_y, region.width, region.height] {
        let mixed = splitmix64(&mut state).wrapping_add(v as u64);
        state ^= mixed;
    }
    state
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Maps to `[0, 1)` using the top 53 bits.
fn unit_interval(bits: u64) -> f64 {
    (bits >> 11) as f64 / (1u64 << 53) as f64
}
