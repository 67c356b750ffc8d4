//! Face shape classification from landmark geometry.
//!
//! Widths are measured between paired landmarks (temples, cheekbones, jaw
//! corners), height from the top of the head to the chin. Shape rules are
//! evaluated in a fixed order and the first match wins; the categories
//! overlap, so the order is part of the contract.

use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    CHIN, LEFT_CHEEKBONE, LEFT_JAW, LEFT_TEMPLE, RIGHT_CHEEKBONE, RIGHT_JAW, RIGHT_TEMPLE,
    TOP_OF_HEAD,
};
use crate::shared::landmark::LandmarkSet;

const ROUND_MIN_RATIO: f64 = 0.85;
const ROUND_MAX_WIDTH_SPREAD: f64 = 0.1;
const SQUARE_MIN_RATIO: f64 = 0.8;
const SQUARE_MIN_JAW: f64 = 0.9;
const HEART_MAX_JAW: f64 = 0.85;
const DIAMOND_MAX_WIDTH: f64 = 0.9;
const OBLONG_MAX_RATIO: f64 = 0.75;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Heart,
    Diamond,
    Oblong,
}

impl FaceShape {
    pub const ALL: &[FaceShape] = &[
        FaceShape::Oval,
        FaceShape::Round,
        FaceShape::Square,
        FaceShape::Heart,
        FaceShape::Diamond,
        FaceShape::Oblong,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            FaceShape::Oval => {
                "Balanced proportions with gently rounded edges. Forehead is slightly wider than chin."
            }
            FaceShape::Round => {
                "Equal width and length with soft, curved lines. Full cheeks and rounded chin."
            }
            FaceShape::Square => {
                "Angular jawline with similar width across forehead, cheeks, and jaw."
            }
            FaceShape::Heart => {
                "Wider forehead tapering to a narrow, pointed chin. High cheekbones."
            }
            FaceShape::Diamond => "Narrow forehead and jaw with wide, high cheekbones.",
            FaceShape::Oblong => {
                "Longer than it is wide with a straight cheek line and rounded chin."
            }
        }
    }
}

impl std::fmt::Display for FaceShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FaceShape::Oval => "oval",
            FaceShape::Round => "round",
            FaceShape::Square => "square",
            FaceShape::Heart => "heart",
            FaceShape::Diamond => "diamond",
            FaceShape::Oblong => "oblong",
        };
        f.write_str(name)
    }
}

/// Distances in normalized landmark units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceMeasurements {
    pub face_width: f64,
    pub face_height: f64,
    pub forehead_width: f64,
    pub cheekbone_width: f64,
    pub jawline_width: f64,
    pub width_to_height_ratio: f64,
}

impl FaceMeasurements {
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Self {
        let span = |a: usize, b: usize| landmarks[a].distance(&landmarks[b]);

        let face_height = span(TOP_OF_HEAD, CHIN);
        let forehead_width = span(LEFT_TEMPLE, RIGHT_TEMPLE);
        let cheekbone_width = span(LEFT_CHEEKBONE, RIGHT_CHEEKBONE);
        let jawline_width = span(LEFT_JAW, RIGHT_JAW);
        let face_width = forehead_width.max(cheekbone_width).max(jawline_width);

        Self {
            face_width,
            face_height,
            forehead_width,
            cheekbone_width,
            jawline_width,
            width_to_height_ratio: face_width / face_height,
        }
    }

    /// Forehead and jaw widths relative to the cheekbones.
    pub fn width_ratios(&self) -> (f64, f64) {
        (
            self.forehead_width / self.cheekbone_width,
            self.jawline_width / self.cheekbone_width,
        )
    }

    /// Ordered rule evaluation. Non-finite ratios match no rule and fall
    /// through to oval.
    pub fn shape(&self) -> FaceShape {
        let ratio = self.width_to_height_ratio;
        let (forehead, jaw) = self.width_ratios();

        if ratio > ROUND_MIN_RATIO && (forehead - jaw).abs() < ROUND_MAX_WIDTH_SPREAD {
            FaceShape::Round
        } else if ratio > SQUARE_MIN_RATIO && jaw > SQUARE_MIN_JAW {
            FaceShape::Square
        } else if forehead > jaw && jaw < HEART_MAX_JAW {
            FaceShape::Heart
        } else if forehead < DIAMOND_MAX_WIDTH && jaw < DIAMOND_MAX_WIDTH {
            FaceShape::Diamond
        } else if ratio < OBLONG_MAX_RATIO {
            FaceShape::Oblong
        } else {
            FaceShape::Oval
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceGeometry {
    pub shape: FaceShape,
    pub measurements: FaceMeasurements,
}

pub fn classify(landmarks: &LandmarkSet) -> FaceGeometry {
    let measurements = FaceMeasurements::from_landmarks(landmarks);
    FaceGeometry {
        shape: measurements.shape(),
        measurements,
    }
}
