//! Pixel-level skin color test.
//!
//! A crude RGB threshold heuristic, not a skin detection model. The region
//! locator's coverage floor and the downstream face-shape thresholds were
//! tuned against exactly this rule, so it must not be changed in isolation.

const MIN_RED: u8 = 60;
const MIN_GREEN: u8 = 40;
const MIN_BLUE: u8 = 20;
/// Minimum channel spread for `|r - g|` and `r - b`.
const MIN_SPREAD: i16 = 15;

pub fn is_skin_color(r: u8, g: u8, b: u8) -> bool {
    let (ri, gi, bi) = (r as i16, g as i16, b as i16);
    r > MIN_RED
        && g > MIN_GREEN
        && b > MIN_BLUE
        && r > b
        && r > g
        && (ri - gi).abs() > MIN_SPREAD
        && ri - bi > MIN_SPREAD
}
